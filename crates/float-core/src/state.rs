//! Shared input state and lifecycle.
//!
//! `FloatState` is the single record that event handlers write and the
//! per-frame update reads. It holds no element data.

use floatfx_scene_model::{EventKind, InputSample, ViewportSize};

use crate::normalize::MOTION_SCALE;

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; waiting for the document-ready signal.
    Uninitialized,
    /// Rendering every frame.
    Running,
    /// Stopped through a stop handle. Terminal.
    Stopped,
}

/// Result of the device-motion capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationSupport {
    /// No device-motion event seen yet.
    Unknown,
    /// First motion event carried a horizontal reading.
    Supported,
    /// First motion event had a null horizontal reading.
    Unsupported,
}

/// What applying an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Event had no effect in the current state.
    Ignored,
    /// Input sample changed.
    InputUpdated,
    /// Viewport size changed.
    ViewportUpdated,
    /// The loop transitioned to running.
    Started,
    /// The orientation probe resolved.
    ProbeResolved(OrientationSupport),
}

/// Input sample, viewport, and lifecycle shared by event handlers and the
/// frame update.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatState {
    input: InputSample,
    viewport: ViewportSize,
    lifecycle: Lifecycle,
    orientation: OrientationSupport,
    /// Set once the probe resolves to supported.
    motion_input: bool,
}

impl FloatState {
    /// Fresh state with the input resting at the viewport center.
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            input: viewport.center(),
            viewport,
            lifecycle: Lifecycle::Uninitialized,
            orientation: OrientationSupport::Unknown,
            motion_input: false,
        }
    }

    pub fn input(&self) -> InputSample {
        self.input
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn orientation(&self) -> OrientationSupport {
        self.orientation
    }

    /// Whether device motion (rather than the pointer) feeds the input.
    pub fn uses_motion_input(&self) -> bool {
        self.motion_input
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Transition to running. Returns false if already started or stopped.
    pub fn start(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Uninitialized {
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        tracing::info!(
            motion_input = self.motion_input,
            viewport_width = self.viewport.width,
            viewport_height = self.viewport.height,
            "Float loop started"
        );
        true
    }

    /// Stop for good. Later events are ignored.
    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::Stopped {
            tracing::info!("Float loop stopped");
        }
        self.lifecycle = Lifecycle::Stopped;
    }

    /// Apply one host event.
    ///
    /// Pointer and resize events only count once running. The motion probe
    /// listens from construction, so the first motion event decides
    /// capability whenever it arrives.
    pub fn apply(&mut self, event: &EventKind) -> EventOutcome {
        if self.lifecycle == Lifecycle::Stopped {
            return EventOutcome::Ignored;
        }

        match *event {
            EventKind::DocumentReady => {
                if self.start() {
                    EventOutcome::Started
                } else {
                    EventOutcome::Ignored
                }
            }
            EventKind::PointerMove { x, y } => {
                if !self.is_running() {
                    return EventOutcome::Ignored;
                }
                self.input = InputSample::new(x, y);
                EventOutcome::InputUpdated
            }
            EventKind::Resize { width, height } => {
                if !self.is_running() {
                    return EventOutcome::Ignored;
                }
                self.viewport = ViewportSize::new(width, height);
                EventOutcome::ViewportUpdated
            }
            EventKind::DeviceMotion { x, y } => {
                let probe = self.resolve_probe(x);
                if !(self.is_running() && self.motion_input) {
                    return probe.map_or(EventOutcome::Ignored, EventOutcome::ProbeResolved);
                }
                // Null axes read as zero, like `null * 100`.
                let ax = x.unwrap_or(0.0);
                let ay = y.unwrap_or(0.0);
                self.input = InputSample::new(ax * MOTION_SCALE, ay * MOTION_SCALE * -1.0);
                probe.map_or(EventOutcome::InputUpdated, EventOutcome::ProbeResolved)
            }
        }
    }

    /// Settle orientation support from the first motion event. A supported
    /// device feeds the input while running, on either side of document-ready.
    fn resolve_probe(&mut self, x: Option<f64>) -> Option<OrientationSupport> {
        if self.orientation != OrientationSupport::Unknown {
            return None;
        }
        self.orientation = if x.is_some() {
            OrientationSupport::Supported
        } else {
            OrientationSupport::Unsupported
        };
        self.motion_input = self.orientation == OrientationSupport::Supported;
        tracing::debug!(orientation = ?self.orientation, "Orientation probe resolved");
        Some(self.orientation)
    }
}
