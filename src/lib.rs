//! Hand gesture tracking filter.
//!
//! This crate implements the analysis stage of a gesture-controlled video
//! pipeline: every frame is handed to an external candidate detector, the
//! detections are reduced to one tracked target per gesture class, and
//! qualifying targets are published as events and optionally highlighted in
//! the output frame.
//!
//! # Architecture
//!
//! Per-frame control flow through [`GestureFilter::process_frame`]:
//!
//! 1. the RGB frame is converted into a pre-allocated grayscale plane;
//! 2. the fist detector returns zero or more candidate rectangles;
//! 3. [`TargetTracker`] keeps the candidate nearest to the previous frame's
//!    target (single-hypothesis nearest-neighbor continuity);
//! 4. the [`RegionOfInterest`] gate decides whether the target's center
//!    qualifies for notification;
//! 5. a [`GestureEvent`] is posted fire-and-forget to the [`EventSink`];
//! 6. with display enabled, a circular marker is drawn into the frame.
//!
//! Detection itself is an external collaborator behind the
//! [`GestureDetector`] trait; the crate ships a deterministic scripted
//! implementation for tests and demos plus an optional OpenCV Haar cascade
//! backend (feature `detect-opencv`).
//!
//! # Module Structure
//!
//! - `config`: filter configuration (display flag, ROI, cascade profiles)
//! - `frame`: frame pixel model (`VideoFrame`, `GrayPlane`)
//! - `detect`: detector collaborator seam and bundled backends
//! - `track`: nearest-neighbor target tracker
//! - `roi`: region-of-interest gate
//! - `event`: gesture events and fire-and-forget sinks
//! - `overlay`: marker rendering
//! - `filter`: the per-frame pipeline stage tying the above together

use serde::{Deserialize, Serialize};

pub mod config;
pub mod detect;
pub mod event;
pub mod filter;
pub mod frame;
pub mod overlay;
pub mod roi;
pub mod track;

pub use config::FilterConfig;
pub use detect::{GestureDetector, ScriptedDetector};
pub use event::{ChannelSink, EventSink, GestureEvent, InMemorySink};
pub use filter::GestureFilter;
pub use frame::{GrayPlane, VideoFrame};
pub use roi::RegionOfInterest;
pub use track::TargetTracker;

// -------------------- Gesture Classes --------------------

/// Gesture classes the filter can report.
///
/// Only [`GestureClass::Fist`] detection is implemented. The palm cascade
/// profile is loaded for configuration parity but never consulted per frame;
/// see [`GestureFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureClass {
    Fist,
    Palm,
}

impl GestureClass {
    /// Label used in emitted events and log messages.
    pub fn as_str(self) -> &'static str {
        match self {
            GestureClass::Fist => "fist",
            GestureClass::Palm => "palm",
        }
    }
}

// -------------------- Bounding Boxes --------------------

/// Axis-aligned rectangle in frame-pixel coordinates.
///
/// Used both for detector candidates (ephemeral, produced fresh every frame)
/// and for the tracked target, of which [`TargetTracker`] keeps an owned copy
/// between frames. The all-zero value doubles as the "uninitialized" tracker
/// state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// The degenerate all-zero rectangle.
    pub const ZERO: BoundingBox = BoundingBox {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point, with flooring integer division.
    ///
    /// The ROI gate, the event payload and the overlay marker all go through
    /// this one formula, so the reported position and the drawn marker can
    /// never disagree.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// True for the all-zero rectangle.
    pub fn is_degenerate(&self) -> bool {
        self.x == 0 && self.y == 0 && self.width == 0 && self.height == 0
    }
}
