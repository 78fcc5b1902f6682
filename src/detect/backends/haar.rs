#![cfg(feature = "detect-opencv")]

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::{CascadeClassifier, CASCADE_DO_CANNY_PRUNING};
use opencv::prelude::*;

use crate::detect::backend::GestureDetector;
use crate::{BoundingBox, GestureClass};

const SCALE_FACTOR: f64 = 1.1;
const MIN_NEIGHBORS: i32 = 2;
const MIN_SIZE: i32 = 24;

/// Haar cascade detector backed by OpenCV.
///
/// Loads a cascade XML profile from disk and scans each luma plane with
/// Canny pruning enabled and a 24x24 minimum window. No I/O happens after
/// loading.
pub struct HaarDetector {
    gesture: GestureClass,
    classifier: CascadeClassifier,
}

impl HaarDetector {
    /// Load a cascade profile from disk.
    pub fn load<P: AsRef<Path>>(gesture: GestureClass, path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("profile path {} is not valid UTF-8", path.display()))?;
        let classifier = CascadeClassifier::new(path_str)
            .with_context(|| format!("failed to load cascade profile {}", path.display()))?;
        let empty = classifier
            .empty()
            .with_context(|| format!("failed to inspect cascade profile {}", path.display()))?;
        if empty {
            return Err(anyhow!(
                "cascade profile {} loaded empty or malformed",
                path.display()
            ));
        }
        Ok(Self {
            gesture,
            classifier,
        })
    }
}

impl GestureDetector for HaarDetector {
    fn name(&self) -> &'static str {
        match self.gesture {
            GestureClass::Fist => "haar-fist",
            GestureClass::Palm => "haar-palm",
        }
    }

    fn detect(&mut self, luma: &[u8], width: u32, height: u32) -> Result<Vec<BoundingBox>> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| anyhow!("frame dimensions overflow"))?;
        if luma.len() != expected {
            return Err(anyhow!(
                "expected {} luma bytes for {}x{}, received {}",
                expected,
                width,
                height,
                luma.len()
            ));
        }

        let image = Mat::new_rows_cols_with_data(height as i32, width as i32, luma)
            .context("failed to wrap luma plane for cascade scan")?;
        let mut objects = Vector::<Rect>::new();
        self.classifier
            .detect_multi_scale(
                &*image,
                &mut objects,
                SCALE_FACTOR,
                MIN_NEIGHBORS,
                CASCADE_DO_CANNY_PRUNING,
                Size::new(MIN_SIZE, MIN_SIZE),
                Size::new(0, 0),
            )
            .context("cascade scan failed")?;

        // Rect fields are i32; in-image rects are never negative.
        Ok(objects
            .iter()
            .map(|rect| {
                BoundingBox::new(
                    rect.x.max(0) as u32,
                    rect.y.max(0) as u32,
                    rect.width.max(0) as u32,
                    rect.height.max(0) as u32,
                )
            })
            .collect())
    }
}
