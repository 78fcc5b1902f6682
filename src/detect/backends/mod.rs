pub mod scripted;

#[cfg(feature = "detect-opencv")]
pub mod haar;

pub use scripted::ScriptedDetector;

#[cfg(feature = "detect-opencv")]
pub use haar::HaarDetector;
