//! Headless scene description.
//!
//! A scene stands in for a rendered page: a viewport plus an ordered list of
//! elements with their attributes. Element order is document order, which
//! is also the order offsets are tracked in.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::viewport::ViewportSize;

/// Viewport and elements of a headless page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Initial viewport size.
    pub viewport: ViewportSize,

    /// Elements in document order.
    #[serde(default)]
    pub elements: Vec<SceneElement>,
}

/// One element of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    /// Unique element identifier.
    pub id: String,

    /// Attribute name to value. A `null` value means the attribute is
    /// present but carries no readable value.
    #[serde(default)]
    pub attributes: BTreeMap<String, Option<String>>,
}

impl SceneElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Some(value.into()));
        self
    }

    /// Whether the element carries the attribute at all.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute value, `None` when absent or unreadable.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_deref())
    }
}

impl Scene {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
        }
    }

    /// A small three-layer scene used by `floatfx init`.
    pub fn sample() -> Self {
        Self {
            viewport: ViewportSize::new(1280.0, 720.0),
            elements: vec![
                SceneElement::new("background").with_attribute("data-float", "0.5"),
                SceneElement::new("midground").with_attribute("data-float", "1"),
                SceneElement::new("foreground").with_attribute("data-float", "2"),
                SceneElement::new("caption"),
            ],
        }
    }

    /// Elements carrying `attribute`, in document order.
    pub fn marked<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a SceneElement> {
        self.elements
            .iter()
            .filter(move |element| element.has_attribute(attribute))
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let scene: Scene = serde_json::from_str(&json).map_err(|e| SceneError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        scene.validate()?;
        Ok(scene)
    }

    /// Save the scene as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SceneError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SceneError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check viewport dimensions and element id uniqueness.
    pub fn validate(&self) -> Result<(), SceneError> {
        let vp = self.viewport;
        if !(vp.width.is_finite() && vp.height.is_finite()) || vp.width < 0.0 || vp.height < 0.0
        {
            return Err(SceneError::ValidationError {
                message: format!("invalid viewport {}x{}", vp.width, vp.height),
            });
        }

        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(SceneError::ValidationError {
                    message: format!("duplicate element id '{}'", element.id),
                });
            }
        }
        Ok(())
    }
}

/// Errors that can occur when working with scenes.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid scene: {message}")]
    ValidationError { message: String },
}
