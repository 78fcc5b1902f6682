//! Single-hypothesis nearest-neighbor target tracker.
//!
//! The detector reports every plausible candidate in a frame; this module
//! reduces them to at most one target by picking the candidate whose top-left
//! corner is nearest to the previous frame's target. Distance is Euclidean,
//! truncated to whole pixels before comparison.
//!
//! The comparison is seeded with `frame_width + frame_height`. For two
//! rectangles inside the same frame the corner distance can never exceed that
//! sum, so every in-frame candidate is eligible; the seed only rejects
//! candidates when the remembered target came from a larger frame than the
//! current one.

use crate::BoundingBox;

/// Tracks one target across frames by top-left-corner proximity.
///
/// State is a single remembered rectangle. The all-zero rectangle doubles as
/// the uninitialized state, which biases the very first selection toward the
/// frame's top-left corner.
#[derive(Debug, Default)]
pub struct TargetTracker {
    previous: BoundingBox,
}

impl TargetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce `candidates` to at most one target.
    ///
    /// Selection rules:
    ///
    /// - a candidate is eligible when its corner distance to the previous
    ///   target is at most `frame_width + frame_height`;
    /// - among eligible candidates, a later one replaces the current best
    ///   only when strictly closer, so exact ties keep the earliest;
    /// - the winner becomes the remembered target for the next call.
    ///
    /// With no candidates, or none eligible, returns `None` and leaves the
    /// remembered target untouched, preserving continuity across detection
    /// dropouts.
    pub fn track(
        &mut self,
        candidates: &[BoundingBox],
        frame_width: u32,
        frame_height: u32,
    ) -> Option<BoundingBox> {
        if candidates.is_empty() {
            return None;
        }
        let seed = frame_width.saturating_add(frame_height);
        let mut best: Option<(u32, BoundingBox)> = None;
        for candidate in candidates {
            let distance = corner_distance(&self.previous, candidate);
            let accept = match &best {
                None => distance <= seed,
                Some((best_distance, _)) => distance < *best_distance,
            };
            if accept {
                best = Some((distance, *candidate));
            }
        }
        let (_, target) = best?;
        self.previous = target;
        Some(target)
    }

    /// The remembered target, or `None` before the first selection.
    pub fn previous_target(&self) -> Option<BoundingBox> {
        if self.previous.is_degenerate() {
            None
        } else {
            Some(self.previous)
        }
    }
}

/// Euclidean distance between the top-left corners, truncated to whole
/// pixels. Truncation means near-ties collapse to the same value and the
/// earliest candidate keeps the win.
fn corner_distance(a: &BoundingBox, b: &BoundingBox) -> u32 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    (dx * dx + dy * dy).sqrt() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: u32, y: u32) -> BoundingBox {
        BoundingBox::new(x, y, 20, 20)
    }

    #[test]
    fn empty_candidates_preserve_state_and_yield_none() {
        let mut tracker = TargetTracker::new();
        tracker.track(&[rect(50, 50)], 320, 240);

        assert_eq!(tracker.track(&[], 320, 240), None);
        assert_eq!(tracker.previous_target(), Some(rect(50, 50)));
    }

    #[test]
    fn single_candidate_becomes_target() {
        let mut tracker = TargetTracker::new();
        assert_eq!(tracker.track(&[rect(100, 100)], 320, 240), Some(rect(100, 100)));
        assert_eq!(tracker.previous_target(), Some(rect(100, 100)));
    }

    #[test]
    fn first_selection_favors_top_left() {
        // Uninitialized state is the zero rectangle, so the candidate
        // nearest the origin wins the opening frame.
        let mut tracker = TargetTracker::new();
        let picked = tracker.track(&[rect(100, 100), rect(10, 10)], 320, 240);
        assert_eq!(picked, Some(rect(10, 10)));
    }

    #[test]
    fn nearest_candidate_to_previous_target_wins() {
        let mut tracker = TargetTracker::new();
        tracker.track(&[rect(100, 100)], 320, 240);

        let picked = tracker.track(&[rect(200, 200), rect(110, 105)], 320, 240);
        assert_eq!(picked, Some(rect(110, 105)));
    }

    #[test]
    fn exact_tie_prefers_earliest_candidate() {
        // Both corners are distance 5 from the origin state.
        let mut tracker = TargetTracker::new();
        let picked = tracker.track(&[rect(3, 4), rect(4, 3)], 320, 240);
        assert_eq!(picked, Some(rect(3, 4)));
    }

    #[test]
    fn truncation_collapses_near_ties() {
        // sqrt(100^2 + 100^2) = 141.42.. and sqrt(141^2) = 141.0 both
        // truncate to 141, so the earlier candidate keeps the win even
        // though the later one is geometrically closer.
        let mut tracker = TargetTracker::new();
        let picked = tracker.track(&[rect(100, 100), rect(141, 0)], 320, 240);
        assert_eq!(picked, Some(rect(100, 100)));
    }

    #[test]
    fn state_survives_detection_dropout() {
        let mut tracker = TargetTracker::new();
        tracker.track(&[rect(50, 50)], 320, 240);
        for _ in 0..5 {
            assert_eq!(tracker.track(&[], 320, 240), None);
        }

        let picked = tracker.track(&[rect(300, 200), rect(55, 55)], 320, 240);
        assert_eq!(picked, Some(rect(55, 55)));
    }

    #[test]
    fn any_in_frame_candidate_is_eligible() {
        // Corner-to-corner is the worst case and still under width + height.
        let mut tracker = TargetTracker::new();
        tracker.track(&[rect(319, 239)], 320, 240);
        assert_eq!(tracker.track(&[rect(0, 0)], 320, 240), Some(rect(0, 0)));
    }

    #[test]
    fn seed_rejects_candidates_after_shrinking_frames() {
        // A target remembered from a large frame can sit farther away than
        // a small frame's width + height; then nothing is eligible and the
        // state stays put.
        let mut tracker = TargetTracker::new();
        tracker.track(&[rect(4000, 4000)], 5000, 5000);

        assert_eq!(tracker.track(&[rect(0, 0)], 100, 100), None);
        assert_eq!(tracker.previous_target(), Some(rect(4000, 4000)));
    }
}
