use std::collections::VecDeque;

use anyhow::Result;

use crate::detect::backend::GestureDetector;
use crate::BoundingBox;

/// Scripted detector for tests and demos.
///
/// Plays back a fixed per-frame sequence of candidate lists in order, then
/// reports empty frames forever.
pub struct ScriptedDetector {
    frames: VecDeque<Vec<BoundingBox>>,
}

impl ScriptedDetector {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<BoundingBox>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Detector that never reports a candidate.
    pub fn silent() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }
}

impl GestureDetector for ScriptedDetector {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn detect(&mut self, _luma: &[u8], _width: u32, _height: u32) -> Result<Vec<BoundingBox>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
