//! Input event types consumed by the float loop.
//!
//! Events are exchanged as JSONL, one object per line. Lines starting
//! with `#` carry a header or comments and are skipped on parse.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since the driver's epoch.
pub type TimestampNs = u64;

/// A single host input event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Monotonic nanoseconds since the epoch.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of host events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Pointer moved; client coordinates in pixels.
    PointerMove { x: f64, y: f64 },

    /// Device motion reading (acceleration including gravity, m/s²).
    ///
    /// Hosts without an accelerometer report `null` axes.
    DeviceMotion {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },

    /// Viewport resized to the given inner size in pixels.
    Resize { width: f64, height: f64 },

    /// The document finished loading; starts the loop.
    DocumentReady,
}

impl InputEvent {
    /// Create a pointer-move event.
    pub fn pointer(timestamp_ns: TimestampNs, x: f64, y: f64) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::PointerMove { x, y },
        }
    }

    /// Create a device-motion event.
    pub fn motion(timestamp_ns: TimestampNs, x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::DeviceMotion { x, y },
        }
    }

    /// Create a resize event.
    pub fn resize(timestamp_ns: TimestampNs, width: f64, height: f64) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Resize { width, height },
        }
    }

    /// Create a document-ready event.
    pub fn ready(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::DocumentReady,
        }
    }

    /// Timestamp as fractional seconds since the epoch.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }

    /// Event type name as written on the wire.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::PointerMove { .. } => "pointer_move",
            EventKind::DeviceMotion { .. } => "device_motion",
            EventKind::Resize { .. } => "resize",
            EventKind::DocumentReady => "document_ready",
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[InputEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
