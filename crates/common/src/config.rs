//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FloatError, FloatResult};

/// Default marker attribute used to select floating elements.
pub const DEFAULT_ATTRIBUTE: &str = "data-float";

/// Largest precision accepted by `toFixed`-style formatting.
pub const MAX_PRECISION: u32 = 100;

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Float engine options.
    pub float: FloatOptions,

    /// Frame driver defaults.
    pub frames: FrameDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Startup options for the float engine. Immutable once the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatOptions {
    /// Attribute that marks tracked elements and carries their strength.
    pub attribute: String,

    /// Raw deceleration; normalized to `max(1, raw * 100 / 6)`.
    pub deceleration: f64,

    /// Global strength factor; each element's marker value is scaled by
    /// `strength / 2.5`.
    pub strength: f64,

    /// Decimal places used when formatting translations.
    pub precision: u32,

    /// Travel direction relative to input: `-1` inverts, `1` follows.
    pub direction: i32,

    /// Reject non-numeric marker values at discovery instead of letting the
    /// element's offset go NaN.
    pub strict_markers: bool,
}

/// Frame driver parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameDefaults {
    /// Target frames per second for the headless driver.
    pub fps: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "floatfx_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            deceleration: 0.5,
            strength: 0.5,
            precision: 2,
            direction: -1,
            strict_markers: false,
        }
    }
}

impl FloatOptions {
    /// Check the options that have no sensible fallback.
    pub fn validate(&self) -> FloatResult<()> {
        if self.attribute.trim().is_empty() {
            return Err(FloatError::config("marker attribute name is empty"));
        }
        if self.precision > MAX_PRECISION {
            return Err(FloatError::config(format!(
                "precision {} exceeds maximum of {MAX_PRECISION}",
                self.precision
            )));
        }
        if self.direction != 1 && self.direction != -1 {
            return Err(FloatError::config(format!(
                "direction must be 1 or -1, got {}",
                self.direction
            )));
        }
        Ok(())
    }

    /// Direction as a float multiplier.
    pub fn direction_sign(&self) -> f64 {
        f64::from(self.direction)
    }
}

impl Default for FrameDefaults {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Missing fields take defaults.
    pub fn load_from(path: &Path) -> FloatResult<Self> {
        if !path.exists() {
            return Err(FloatError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.float.validate()?;
        if config.frames.fps == 0 {
            return Err(FloatError::config("frames.fps must be greater than zero"));
        }
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("floatfx").join("config.json")
}
