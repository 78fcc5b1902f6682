use anyhow::Result;

use crate::BoundingBox;

/// Gesture candidate detector.
///
/// Implementations receive the current frame's luma plane and report every
/// plausible match for their gesture class, one rectangle per candidate.
/// They do not track, gate or deduplicate; reduction to a single target
/// happens downstream in [`crate::TargetTracker`].
pub trait GestureDetector: Send {
    /// Detector identifier for logs.
    fn name(&self) -> &'static str;

    /// Report every candidate rectangle found in the luma plane.
    ///
    /// The pixel slice is read-only and only valid for the duration of the
    /// call. Implementations may keep internal state between calls.
    fn detect(&mut self, luma: &[u8], width: u32, height: u32) -> Result<Vec<BoundingBox>>;
}
