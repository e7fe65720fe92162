//! Frame clock and timing utilities.
//!
//! Input events and rendered frames share one timeline: nanoseconds since
//! the clock epoch. Replayed event files carry these timestamps directly;
//! the live driver stamps events and frames with `FrameClock::elapsed_ns`.

use std::time::{Duration, Instant};

/// A monotonic clock anchored at the moment the float loop was created.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Nanoseconds elapsed since the epoch.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Nanoseconds between frames at the given rate. A rate of zero is treated
/// as one frame per second; the interval never drops below 1 ns.
pub fn frame_interval_ns(fps: u32) -> u64 {
    (1_000_000_000 / u64::from(fps.max(1))).max(1)
}

/// Frame interval as a `Duration`.
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_nanos(frame_interval_ns(fps))
}
