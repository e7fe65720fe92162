//! Error types shared across floatfx crates.
//!
//! The frame loop itself never fails: bad marker values and missing
//! orientation hardware degrade silently. These errors cover the edges
//! around it (option validation, file loading, frame output).

use std::path::PathBuf;

/// Top-level error type for floatfx operations.
#[derive(Debug, thiserror::Error)]
pub enum FloatError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Surface error: {message}")]
    Surface { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using FloatError.
pub type FloatResult<T> = Result<T, FloatError>;

impl FloatError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors_render_messages() {
        let err = FloatError::config("precision out of range");
        assert_eq!(
            err.to_string(),
            "Configuration error: precision out of range"
        );

        let err = FloatError::surface("unknown element 'ghost'");
        assert_eq!(err.to_string(), "Surface error: unknown element 'ghost'");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: FloatError = parse.unwrap_err().into();
        assert!(matches!(err, FloatError::Json(_)));
    }
}
