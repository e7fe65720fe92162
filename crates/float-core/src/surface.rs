//! Host surface abstraction.
//!
//! A surface is whatever owns the elements: a browser document, a UI tree,
//! or the in-memory [`HeadlessSurface`] used by the CLI and tests.

use std::collections::HashMap;

use floatfx_common::error::{FloatError, FloatResult};
use floatfx_scene_model::{Scene, ViewportSize};

/// An element found by marker-attribute discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedElement {
    /// Host identifier used when applying transforms.
    pub id: String,
    /// Raw marker attribute value; `None` when unreadable.
    pub marker: Option<String>,
}

/// Host document the engine reads markers from and writes transforms to.
pub trait Surface: Send {
    /// Current inner viewport size.
    fn viewport(&self) -> ViewportSize;

    /// Every element carrying `attribute`, in document order.
    fn query_marked(&self, attribute: &str) -> Vec<MarkedElement>;

    /// Replace the element's transform. Other styling is left alone.
    fn set_transform(&mut self, element_id: &str, transform: &str) -> FloatResult<()>;

    /// Surface name for logging.
    fn name(&self) -> &str;
}

/// In-memory surface backed by a [`Scene`].
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    scene: Scene,
    transforms: HashMap<String, String>,
    writes: u64,
}

impl HeadlessSurface {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            transforms: HashMap::new(),
            writes: 0,
        }
    }

    /// Last transform applied to an element.
    pub fn transform(&self, element_id: &str) -> Option<&str> {
        self.transforms.get(element_id).map(String::as_str)
    }

    /// Total number of transform writes.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Resize the backing viewport (what a host window resize would do).
    pub fn resize(&mut self, viewport: ViewportSize) {
        self.scene.viewport = viewport;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Surface for HeadlessSurface {
    fn viewport(&self) -> ViewportSize {
        self.scene.viewport
    }

    fn query_marked(&self, attribute: &str) -> Vec<MarkedElement> {
        self.scene
            .marked(attribute)
            .map(|element| MarkedElement {
                id: element.id.clone(),
                marker: element.attribute(attribute).map(str::to_string),
            })
            .collect()
    }

    fn set_transform(&mut self, element_id: &str, transform: &str) -> FloatResult<()> {
        if !self.scene.elements.iter().any(|e| e.id == element_id) {
            return Err(FloatError::surface(format!(
                "no element with id '{element_id}'"
            )));
        }
        self.transforms
            .insert(element_id.to_string(), transform.to_string());
        self.writes += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_marked_reads_values() {
        let surface = HeadlessSurface::new(Scene::sample());
        let marked = surface.query_marked("data-float");
        assert_eq!(marked.len(), 3);
        assert_eq!(marked[2].id, "foreground");
        assert_eq!(marked[2].marker.as_deref(), Some("2"));
    }

    #[test]
    fn test_other_attribute_finds_nothing() {
        let surface = HeadlessSurface::new(Scene::sample());
        assert!(surface.query_marked("data-parallax").is_empty());
    }

    #[test]
    fn test_set_transform_records_last_value() {
        let mut surface = HeadlessSurface::new(Scene::sample());
        surface.set_transform("midground", "a").unwrap();
        surface.set_transform("midground", "b").unwrap();
        assert_eq!(surface.transform("midground"), Some("b"));
        assert_eq!(surface.writes(), 2);
    }

    #[test]
    fn test_set_transform_unknown_element() {
        let mut surface = HeadlessSurface::new(Scene::sample());
        assert!(matches!(
            surface.set_transform("nope", "x"),
            Err(FloatError::Surface { .. })
        ));
    }
}
