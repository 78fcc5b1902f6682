//! The per-frame pipeline stage.
//!
//! `GestureFilter` owns the tracker state, the loaded detectors and the
//! event sink, and runs the whole reduction for each incoming frame:
//! grayscale conversion, candidate detection, nearest-neighbor selection,
//! ROI gating with event emission, and the optional overlay marker.
//!
//! Lifecycle is two calls: [`GestureFilter::setup`] once per negotiated
//! frame size, then [`GestureFilter::process_frame`] once per frame, in
//! arrival order. Instances serve a single stream; frame calls must not run
//! concurrently.

use anyhow::{anyhow, Result};

use crate::config::FilterConfig;
use crate::detect::{load_detector, GestureDetector};
use crate::event::{EventSink, GestureEvent};
use crate::frame::{GrayPlane, VideoFrame};
use crate::overlay;
use crate::track::TargetTracker;
use crate::{BoundingBox, GestureClass};

/// Frames larger than this are scanned anyway, just slowly.
const ADVISORY_WIDTH: u32 = 320;
const ADVISORY_HEIGHT: u32 = 240;

pub struct GestureFilter {
    config: FilterConfig,
    fist: Option<Box<dyn GestureDetector>>,
    /// Loaded for configuration parity; no per-frame path consults it.
    palm: Option<Box<dyn GestureDetector>>,
    tracker: TargetTracker,
    gray: Option<GrayPlane>,
    sink: Option<Box<dyn EventSink>>,
}

impl GestureFilter {
    /// Filter with no detectors attached. Degraded until a fist detector is
    /// supplied via [`Self::with_fist_detector`].
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            fist: None,
            palm: None,
            tracker: TargetTracker::new(),
            gray: None,
            sink: None,
        }
    }

    /// Filter with detectors loaded from the configured cascade profiles.
    ///
    /// A profile that fails to load is logged once and leaves the filter
    /// degraded (fist) or merely unloaded (palm); construction itself never
    /// fails. Degraded filters pass every frame through untouched.
    pub fn from_config(config: FilterConfig) -> Self {
        let fist = match load_detector(GestureClass::Fist, &config.fist_profile) {
            Ok(detector) => Some(detector),
            Err(err) => {
                log::warn!(
                    "fist profile {} unavailable, detection disabled: {}",
                    config.fist_profile.display(),
                    err
                );
                None
            }
        };
        let palm = match load_detector(GestureClass::Palm, &config.palm_profile) {
            Ok(detector) => Some(detector),
            Err(err) => {
                log::warn!(
                    "palm profile {} unavailable: {}",
                    config.palm_profile.display(),
                    err
                );
                None
            }
        };
        let mut filter = Self::new(config);
        filter.fist = fist;
        filter.palm = palm;
        filter
    }

    pub fn with_fist_detector<D: GestureDetector + 'static>(mut self, detector: D) -> Self {
        self.fist = Some(Box::new(detector));
        self
    }

    /// Attach a palm detector. It is stored but never consulted; palm
    /// detection is an unimplemented placeholder.
    pub fn with_palm_detector<D: GestureDetector + 'static>(mut self, detector: D) -> Self {
        self.palm = Some(Box::new(detector));
        self
    }

    pub fn with_sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// False when no fist detector is loaded; every frame then passes
    /// through untouched.
    pub fn is_operational(&self) -> bool {
        self.fist.is_some()
    }

    /// True when a palm profile was loaded. Informational only.
    pub fn is_palm_loaded(&self) -> bool {
        self.palm.is_some()
    }

    /// The target remembered from earlier frames, if any.
    pub fn tracked_target(&self) -> Option<BoundingBox> {
        self.tracker.previous_target()
    }

    /// (Re)allocate per-frame buffers for a negotiated frame size.
    ///
    /// Must be called before the first frame and again after every
    /// resolution change. Tracker state deliberately survives
    /// renegotiation.
    pub fn setup(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(anyhow!(
                "frame dimensions must be nonzero, got {}x{}",
                width,
                height
            ));
        }
        log::info!("gesture filter configured for {}x{} frames", width, height);
        if width > ADVISORY_WIDTH || height > ADVISORY_HEIGHT {
            log::info!(
                "scanning is fastest at {}x{} or below",
                ADVISORY_WIDTH,
                ADVISORY_HEIGHT
            );
        }
        self.gray = Some(GrayPlane::new(width, height)?);
        Ok(())
    }

    /// Run the full per-frame pipeline on one RGB frame.
    ///
    /// Returns this frame's tracked target, if any. The frame is mutated in
    /// place only when display is enabled and a target was selected. Event
    /// emission is gated by the ROI; the marker is not.
    pub fn process_frame(&mut self, frame: &mut VideoFrame) -> Result<Option<BoundingBox>> {
        let gray = self
            .gray
            .as_mut()
            .ok_or_else(|| anyhow!("process_frame called before setup"))?;
        if frame.width != gray.width || frame.height != gray.height {
            return Err(anyhow!(
                "frame is {}x{} but filter was set up for {}x{}",
                frame.width,
                frame.height,
                gray.width,
                gray.height
            ));
        }

        // Degraded mode: no fist detector means no processing at all, not a
        // per-frame error.
        let Some(fist) = self.fist.as_mut() else {
            return Ok(None);
        };

        gray.fill_from(frame)?;
        let candidates = fist.detect(gray.as_luma(), frame.width, frame.height)?;
        if !candidates.is_empty() {
            log::debug!("{}: {} candidate(s)", fist.name(), candidates.len());
        }

        let Some(target) = self.tracker.track(&candidates, frame.width, frame.height) else {
            return Ok(None);
        };

        let (cx, cy) = target.center();
        if self.config.roi.admits(cx, cy) {
            let event = GestureEvent::for_target(GestureClass::Fist, &target);
            log::debug!(
                "fist at ({}, {}) size {}x{}",
                cx,
                cy,
                target.width,
                target.height
            );
            if let Some(sink) = &self.sink {
                sink.publish(event);
            }
        }
        if self.config.display {
            overlay::draw_marker(frame, &target);
        }
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ScriptedDetector;

    #[test]
    fn process_before_setup_is_an_error() {
        let mut filter =
            GestureFilter::new(FilterConfig::default()).with_fist_detector(ScriptedDetector::silent());
        let mut frame = VideoFrame::new(8, 8).unwrap();
        let err = filter.process_frame(&mut frame).unwrap_err();
        assert!(err.to_string().contains("before setup"));
    }

    #[test]
    fn setup_rejects_zero_dimensions() {
        let mut filter = GestureFilter::new(FilterConfig::default());
        assert!(filter.setup(0, 240).is_err());
        assert!(filter.setup(320, 0).is_err());
        assert!(filter.setup(320, 240).is_ok());
    }

    #[test]
    fn mismatched_frame_size_is_an_error() {
        let mut filter =
            GestureFilter::new(FilterConfig::default()).with_fist_detector(ScriptedDetector::silent());
        filter.setup(320, 240).unwrap();
        let mut frame = VideoFrame::new(64, 64).unwrap();
        let err = filter.process_frame(&mut frame).unwrap_err();
        assert!(err.to_string().contains("set up for 320x240"));
    }

    #[test]
    fn degraded_filter_passes_frames_through() {
        let mut filter = GestureFilter::new(FilterConfig::default());
        assert!(!filter.is_operational());
        filter.setup(8, 8).unwrap();

        let mut frame = VideoFrame::new(8, 8).unwrap();
        let before = frame.as_rgb().to_vec();
        assert_eq!(filter.process_frame(&mut frame).unwrap(), None);
        assert_eq!(frame.as_rgb(), &before[..]);
    }

    #[test]
    fn setup_keeps_tracker_state() {
        let mut filter = GestureFilter::new(FilterConfig::default())
            .with_fist_detector(ScriptedDetector::new([vec![BoundingBox::new(4, 4, 2, 2)]]));
        filter.setup(16, 16).unwrap();
        let mut frame = VideoFrame::new(16, 16).unwrap();
        filter.process_frame(&mut frame).unwrap();
        assert_eq!(filter.tracked_target(), Some(BoundingBox::new(4, 4, 2, 2)));

        filter.setup(32, 32).unwrap();
        assert_eq!(filter.tracked_target(), Some(BoundingBox::new(4, 4, 2, 2)));
    }
}
