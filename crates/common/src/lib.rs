//! floatfx Common Utilities
//!
//! Shared infrastructure for all floatfx crates:
//! - Error types and result aliases
//! - Frame clock and timing helpers
//! - Tracing/logging initialization
//! - Configuration loading (float options, frame rate, logging)

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
