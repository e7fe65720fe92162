//! floatfx Core - the float update loop
//!
//! Moves marked elements in response to pointer or device-motion input:
//! - **Normalization:** deceleration and per-element strength math
//! - **State:** the shared input sample, viewport, and lifecycle
//! - **Engine:** per-frame exponential smoothing of every element's offset
//! - **Format:** `translate3d` strings with fixed decimal precision
//! - **Surface:** the host document the engine reads markers from and
//!   writes transforms to, plus an in-memory implementation
//!
//! The engine does no I/O and never sleeps. Callers feed events into
//! [`FloatState`] and call [`FloatEngine::update_frame`] once per tick.

pub mod engine;
pub mod format;
pub mod normalize;
pub mod state;
pub mod surface;

pub use engine::{ElementTransform, FloatEngine, TrackedElement};
pub use state::{EventOutcome, FloatState, Lifecycle, OrientationSupport};
pub use surface::{HeadlessSurface, MarkedElement, Surface};
