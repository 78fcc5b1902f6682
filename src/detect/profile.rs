use std::path::Path;

use anyhow::Result;

use super::backend::GestureDetector;
use crate::GestureClass;

/// Load the cascade profile for a gesture class.
///
/// Profile files are OpenCV Haar cascade XML. Builds without the
/// `detect-opencv` feature cannot load any profile; callers are expected to
/// degrade rather than abort when loading fails.
#[cfg(feature = "detect-opencv")]
pub fn load_detector(gesture: GestureClass, path: &Path) -> Result<Box<dyn GestureDetector>> {
    let detector = super::backends::HaarDetector::load(gesture, path)?;
    Ok(Box::new(detector))
}

#[cfg(not(feature = "detect-opencv"))]
pub fn load_detector(gesture: GestureClass, path: &Path) -> Result<Box<dyn GestureDetector>> {
    let _ = gesture;
    Err(anyhow::anyhow!(
        "cannot load cascade profile {}: built without the detect-opencv feature",
        path.display()
    ))
}
