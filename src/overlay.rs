//! Marker rendering.
//!
//! Draws the tracked-target indicator directly into the caller's RGB frame.
//! Rendering is confirmation feedback only; event emission never depends on
//! whether the marker was drawn.

use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_hollow_circle_mut;

use crate::frame::VideoFrame;
use crate::BoundingBox;

/// Marker color, RGB (0, 0, 200).
pub const MARKER_COLOR: Rgb<u8> = Rgb([0, 0, 200]);

/// Draw a hollow circle around the target: centered on the target's center,
/// radius `(width + height) / 4`. Ring pixels falling outside the frame are
/// clipped, not wrapped.
pub fn draw_marker(frame: &mut VideoFrame, target: &BoundingBox) {
    let (cx, cy) = target.center();
    let radius = (u64::from(target.width) + u64::from(target.height)) / 4;
    let (width, height) = (frame.width, frame.height);
    let Some(mut canvas) =
        ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, frame.as_rgb_mut())
    else {
        // Unreachable: VideoFrame guarantees buffer length matches dimensions.
        return;
    };
    draw_hollow_circle_mut(
        &mut canvas,
        (cx as i32, cy as i32),
        radius as i32,
        MARKER_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &VideoFrame, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * frame.width + x) * 3) as usize;
        let rgb = frame.as_rgb();
        [rgb[idx], rgb[idx + 1], rgb[idx + 2]]
    }

    #[test]
    fn marker_rings_the_target_center() {
        let mut frame = VideoFrame::new(100, 100).unwrap();
        let target = BoundingBox::new(40, 40, 20, 20);
        draw_marker(&mut frame, &target);

        // Center (50, 50), radius 10: the cardinal ring points are drawn,
        // the center itself is left alone.
        assert_eq!(pixel(&frame, 60, 50), [0, 0, 200]);
        assert_eq!(pixel(&frame, 40, 50), [0, 0, 200]);
        assert_eq!(pixel(&frame, 50, 60), [0, 0, 200]);
        assert_eq!(pixel(&frame, 50, 40), [0, 0, 200]);
        assert_eq!(pixel(&frame, 50, 50), [0, 0, 0]);
        assert_eq!(pixel(&frame, 0, 0), [0, 0, 0]);
    }

    #[test]
    fn marker_clips_at_frame_edges() {
        // Center (10, 10), radius 10 on a 15x15 frame: the right half of
        // the ring falls outside and must be dropped without panicking.
        let mut frame = VideoFrame::new(15, 15).unwrap();
        let target = BoundingBox::new(0, 0, 20, 20);
        draw_marker(&mut frame, &target);

        assert_eq!(pixel(&frame, 0, 10), [0, 0, 200]);
        assert_eq!(pixel(&frame, 10, 0), [0, 0, 200]);
    }

    #[test]
    fn degenerate_target_marks_a_single_point() {
        let mut frame = VideoFrame::new(10, 10).unwrap();
        let target = BoundingBox::new(5, 5, 0, 0);
        draw_marker(&mut frame, &target);

        assert_eq!(pixel(&frame, 5, 5), [0, 0, 200]);
        assert_eq!(pixel(&frame, 6, 5), [0, 0, 0]);
    }
}
