mod backend;
mod backends;
mod profile;

pub use backend::GestureDetector;
pub use backends::ScriptedDetector;
pub use profile::load_detector;

#[cfg(feature = "detect-opencv")]
pub use backends::HaarDetector;
