//! Gesture events and notification sinks.
//!
//! Emission is strictly fire-and-forget: the per-frame path never blocks on
//! or fails because of a consumer. A sink whose consumer is gone drops the
//! event and logs at debug level.

use std::sync::{mpsc, Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, GestureClass};

/// One qualifying detection, emitted at most once per frame.
///
/// `x` and `y` carry the target's center, not its corner; `width` and
/// `height` are the full rectangle extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub gesture: GestureClass,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GestureEvent {
    pub fn for_target(gesture: GestureClass, target: &BoundingBox) -> Self {
        let (x, y) = target.center();
        Self {
            gesture,
            x,
            y,
            width: target.width,
            height: target.height,
        }
    }
}

// ----------------------------------------------------------------------------
// Sinks
// ----------------------------------------------------------------------------

/// Where qualifying detections go. Implementations must not block the
/// per-frame path.
pub trait EventSink: Send {
    fn publish(&self, event: GestureEvent);
}

impl<S: EventSink + Sync + ?Sized> EventSink for Arc<S> {
    fn publish(&self, event: GestureEvent) {
        (**self).publish(event);
    }
}

/// Sink backed by a standard channel. The pipeline owns the sink; whoever
/// consumes events owns the receiver.
pub struct ChannelSink {
    tx: mpsc::Sender<GestureEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<GestureEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving end.
    pub fn channel() -> (Self, mpsc::Receiver<GestureEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn publish(&self, event: GestureEvent) {
        if let Err(err) = self.tx.send(event) {
            log::debug!("gesture event dropped, receiver disconnected: {}", err);
        }
    }
}

/// Sink that records events in memory, for tests and the demo binary.
#[derive(Default)]
pub struct InMemorySink {
    events: Mutex<Vec<GestureEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GestureEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for InMemorySink {
    fn publish(&self, event: GestureEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
