//! floatfx Scene Model
//!
//! Defines the data contracts shared by the engine, the driver, and the CLI:
//! - **Events:** Timestamped host input (pointer, device motion, resize, ready)
//! - **Viewport:** Viewport size, input samples, and element offsets
//! - **Scene:** A headless description of a page: viewport plus elements
//!   and their attributes
//!
//! Coordinates are CSS-pixel-equivalent units with the origin at the
//! top-left of the viewport.

pub mod event;
pub mod scene;
pub mod viewport;

pub use event::*;
pub use scene::*;
pub use viewport::*;
