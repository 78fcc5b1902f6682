//! Frame pixel model.
//!
//! Two containers cross the filter boundary:
//!
//! - `VideoFrame`: packed RGB24 frame, mutated in place when the overlay is on.
//! - `GrayPlane`: pre-allocated luma plane the detector reads from.
//!
//! The luma plane is allocated once per negotiated frame size and refilled
//! every frame, so the steady-state per-frame path performs no allocation.

use anyhow::{anyhow, Result};

// ----------------------------------------------------------------------------
// VideoFrame: packed RGB24
// ----------------------------------------------------------------------------

/// Owned RGB24 frame. Three bytes per pixel, rows packed without padding.
///
/// The buffer length is always exactly `width * height * 3`; both
/// constructors enforce it, so downstream code may index freely.
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl VideoFrame {
    /// Allocate a black frame of the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = rgb_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Wrap an existing RGB24 buffer. The length must match the dimensions.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = rgb_len(width, height)?;
        if data.len() != expected {
            return Err(anyhow!(
                "rgb buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_rgb(&self) -> &[u8] {
        &self.data
    }

    pub fn as_rgb_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame and return the pixel buffer.
    pub fn into_rgb(self) -> Vec<u8> {
        self.data
    }
}

// ----------------------------------------------------------------------------
// GrayPlane: luma scratch buffer
// ----------------------------------------------------------------------------

/// Single-channel 8-bit luma plane, same dimensions as the frames it is
/// filled from.
pub struct GrayPlane {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl GrayPlane {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| anyhow!("luma plane {}x{} overflows", width, height))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Refill the plane from an RGB frame using BT.601 luma weights.
    ///
    /// The frame must have the dimensions this plane was allocated for.
    pub fn fill_from(&mut self, frame: &VideoFrame) -> Result<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(anyhow!(
                "frame is {}x{} but luma plane was allocated for {}x{}",
                frame.width,
                frame.height,
                self.width,
                self.height
            ));
        }
        for (luma, rgb) in self.data.iter_mut().zip(frame.as_rgb().chunks_exact(3)) {
            *luma = luma_of(rgb[0], rgb[1], rgb[2]);
        }
        Ok(())
    }

    pub fn as_luma(&self) -> &[u8] {
        &self.data
    }
}

/// BT.601 luma: Y = 0.299 R + 0.587 G + 0.114 B, rounded to nearest.
fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    y.round() as u8
}

fn rgb_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(|| anyhow!("rgb frame {}x{} overflows", width, height))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_black_and_sized() {
        let frame = VideoFrame::new(4, 3).unwrap();
        assert_eq!(frame.as_rgb().len(), 4 * 3 * 3);
        assert!(frame.as_rgb().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_rgb_rejects_wrong_length() {
        let err = VideoFrame::from_rgb(2, 2, vec![0u8; 11]).err().unwrap();
        assert!(err.to_string().contains("expected 12"));
    }

    #[test]
    fn luma_matches_bt601_weights() {
        assert_eq!(luma_of(255, 0, 0), 76);
        assert_eq!(luma_of(0, 255, 0), 150);
        assert_eq!(luma_of(0, 0, 255), 29);
        assert_eq!(luma_of(0, 0, 0), 0);
        assert_eq!(luma_of(255, 255, 255), 255);
        assert_eq!(luma_of(128, 128, 128), 128);
    }

    #[test]
    fn fill_from_converts_every_pixel() {
        let mut rgb = Vec::new();
        rgb.extend_from_slice(&[255, 0, 0]);
        rgb.extend_from_slice(&[0, 255, 0]);
        rgb.extend_from_slice(&[0, 0, 255]);
        rgb.extend_from_slice(&[255, 255, 255]);
        let frame = VideoFrame::from_rgb(2, 2, rgb).unwrap();

        let mut plane = GrayPlane::new(2, 2).unwrap();
        plane.fill_from(&frame).unwrap();
        assert_eq!(plane.as_luma(), &[76, 150, 29, 255]);
    }

    #[test]
    fn fill_from_rejects_mismatched_dimensions() {
        let frame = VideoFrame::new(4, 4).unwrap();
        let mut plane = GrayPlane::new(2, 2).unwrap();
        let err = plane.fill_from(&frame).unwrap_err();
        assert!(err.to_string().contains("allocated for 2x2"));
    }
}
