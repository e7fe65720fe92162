//! The float engine: per-element decelerated offsets.
//!
//! Each frame, every tracked element moves a fraction `1 / d` of the way
//! from its current offset toward its target
//! `(input - center) * direction * strength`, where `d` is the normalized
//! deceleration. With `d >= 1` this is a first-order low-pass filter that
//! approaches the target geometrically and never overshoots.

use floatfx_common::config::FloatOptions;
use floatfx_common::error::{FloatError, FloatResult};
use floatfx_scene_model::Offset;
use serde::Serialize;

use crate::format::translate3d;
use crate::normalize::{normalize_deceleration, normalize_strength, parse_marker};
use crate::state::FloatState;
use crate::surface::{MarkedElement, Surface};

/// An element discovered at startup and the offset the engine owns for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedElement {
    /// Host identifier.
    pub id: String,
    /// Marker value as read from the attribute.
    pub marker: Option<String>,
    /// Marker value coerced to a number; NaN when not numeric.
    pub raw_strength: f64,
    /// Current translation.
    pub offset: Offset,
}

impl TrackedElement {
    fn from_marked(marked: MarkedElement) -> Self {
        let raw_strength = parse_marker(marked.marker.as_deref());
        Self {
            id: marked.id,
            marker: marked.marker,
            raw_strength,
            offset: Offset::ZERO,
        }
    }

    /// Whether the marker parsed as a number.
    pub fn has_numeric_marker(&self) -> bool {
        !self.raw_strength.is_nan()
    }
}

/// A formatted transform for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementTransform {
    pub id: String,
    pub transform: String,
}

/// Owns the tracked elements and advances their offsets once per frame.
#[derive(Debug, Clone)]
pub struct FloatEngine {
    options: FloatOptions,
    deceleration: f64,
    elements: Vec<TrackedElement>,
    frames: u64,
}

impl FloatEngine {
    /// Validate options and discover marked elements on `surface`.
    pub fn attach(options: FloatOptions, surface: &dyn Surface) -> FloatResult<Self> {
        options.validate()?;
        let marked = surface.query_marked(&options.attribute);
        tracing::debug!(
            surface = %surface.name(),
            attribute = %options.attribute,
            count = marked.len(),
            "Discovered marked elements"
        );
        Self::from_marked(options, marked)
    }

    /// Build an engine from an already-discovered element list.
    pub fn from_marked(options: FloatOptions, marked: Vec<MarkedElement>) -> FloatResult<Self> {
        options.validate()?;

        let elements: Vec<TrackedElement> =
            marked.into_iter().map(TrackedElement::from_marked).collect();

        let bad: Vec<&str> = elements
            .iter()
            .filter(|e| !e.has_numeric_marker())
            .map(|e| e.id.as_str())
            .collect();
        if !bad.is_empty() {
            if options.strict_markers {
                return Err(FloatError::config(format!(
                    "non-numeric '{}' value on: {}",
                    options.attribute,
                    bad.join(", ")
                )));
            }
            for id in &bad {
                tracing::warn!(element = %id, "Marker value is not a number; offset will be NaN");
            }
        }

        let deceleration = normalize_deceleration(options.deceleration);
        tracing::debug!(
            deceleration,
            strength = options.strength,
            direction = options.direction,
            elements = elements.len(),
            "Float engine ready"
        );

        Ok(Self {
            options,
            deceleration,
            elements,
            frames: 0,
        })
    }

    /// Advance every offset by one frame against `state`.
    ///
    /// All elements see the same input and viewport snapshot.
    pub fn step(&mut self, state: &FloatState) {
        let input = state.input();
        let viewport = state.viewport();
        let direction = self.options.direction_sign();
        let d = self.deceleration;

        for element in &mut self.elements {
            let s = normalize_strength(element.raw_strength, self.options.strength);
            let dx = (input.x - viewport.width / 2.0) * (direction * s) - element.offset.x;
            let dy = (input.y - viewport.height / 2.0) * (direction * s) - element.offset.y;
            element.offset.x += dx / d;
            element.offset.y += dy / d;
        }
        self.frames += 1;
    }

    /// Current transforms, formatted to the configured precision.
    pub fn transforms(&self) -> Vec<ElementTransform> {
        self.elements
            .iter()
            .map(|element| ElementTransform {
                id: element.id.clone(),
                transform: translate3d(element.offset, self.options.precision),
            })
            .collect()
    }

    /// Step once and return the resulting transforms.
    pub fn update_frame(&mut self, state: &FloatState) -> Vec<ElementTransform> {
        self.step(state);
        self.transforms()
    }

    /// Step once and write every transform to `surface`.
    ///
    /// Does nothing unless the state is running. Returns what was written.
    pub fn render(
        &mut self,
        state: &FloatState,
        surface: &mut dyn Surface,
    ) -> FloatResult<Vec<ElementTransform>> {
        if !state.is_running() {
            return Ok(Vec::new());
        }
        let transforms = self.update_frame(state);
        for t in &transforms {
            surface.set_transform(&t.id, &t.transform)?;
        }
        Ok(transforms)
    }

    /// The offset target for an element under `state`.
    pub fn target(&self, index: usize, state: &FloatState) -> Option<Offset> {
        let element = self.elements.get(index)?;
        let s = normalize_strength(element.raw_strength, self.options.strength);
        let direction = self.options.direction_sign();
        let input = state.input();
        let viewport = state.viewport();
        Some(Offset::new(
            (input.x - viewport.width / 2.0) * (direction * s),
            (input.y - viewport.height / 2.0) * (direction * s),
        ))
    }

    pub fn elements(&self) -> &[TrackedElement] {
        &self.elements
    }

    pub fn offset(&self, index: usize) -> Option<Offset> {
        self.elements.get(index).map(|e| e.offset)
    }

    pub fn options(&self) -> &FloatOptions {
        &self.options
    }

    /// Normalized deceleration (smoothing denominator).
    pub fn deceleration(&self) -> f64 {
        self.deceleration
    }

    /// Frames stepped so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floatfx_scene_model::{EventKind, Scene, SceneElement, ViewportSize};

    use crate::surface::HeadlessSurface;

    fn marked(id: &str, value: Option<&str>) -> MarkedElement {
        MarkedElement {
            id: id.to_string(),
            marker: value.map(str::to_string),
        }
    }

    fn running_state(input_x: f64, input_y: f64) -> FloatState {
        let mut state = FloatState::new(ViewportSize::new(1000.0, 800.0));
        state.start();
        state.apply(&EventKind::PointerMove {
            x: input_x,
            y: input_y,
        });
        state
    }

    #[test]
    fn test_worked_example_two_frames() {
        let mut engine =
            FloatEngine::from_marked(FloatOptions::default(), vec![marked("a", Some("1"))])
                .unwrap();
        let state = running_state(600.0, 400.0);

        engine.step(&state);
        let first = engine.offset(0).unwrap();
        assert!((first.x - (-2.4)).abs() < 1e-9);
        assert_eq!(first.y, 0.0);

        engine.step(&state);
        let second = engine.offset(0).unwrap();
        assert!((second.x - (-4.512)).abs() < 1e-9);
        assert_eq!(engine.frames(), 2);
    }

    #[test]
    fn test_transforms_use_precision() {
        let mut engine =
            FloatEngine::from_marked(FloatOptions::default(), vec![marked("a", Some("1"))])
                .unwrap();
        let state = running_state(600.0, 400.0);
        let transforms = engine.update_frame(&state);
        assert_eq!(transforms[0].transform, "translate3d(-2.40px, 0.00px, 0)");
    }

    #[test]
    fn test_direction_positive_follows_input() {
        let options = FloatOptions {
            direction: 1,
            ..Default::default()
        };
        let mut engine = FloatEngine::from_marked(options, vec![marked("a", Some("1"))]).unwrap();
        engine.step(&running_state(600.0, 300.0));
        let offset = engine.offset(0).unwrap();
        assert!(offset.x > 0.0);
        assert!(offset.y < 0.0);
    }

    #[test]
    fn test_missing_marker_stays_nan() {
        let mut engine = FloatEngine::from_marked(
            FloatOptions::default(),
            vec![marked("ok", Some("1")), marked("broken", None)],
        )
        .unwrap();
        let state = running_state(600.0, 400.0);
        for _ in 0..10 {
            engine.step(&state);
            assert!(engine.offset(1).unwrap().is_nan());
        }
        assert!(!engine.offset(0).unwrap().is_nan());
        assert_eq!(
            engine.transforms()[1].transform,
            "translate3d(NaNpx, NaNpx, 0)"
        );
    }

    #[test]
    fn test_strict_markers_rejects_nan() {
        let options = FloatOptions {
            strict_markers: true,
            ..Default::default()
        };
        let result = FloatEngine::from_marked(options, vec![marked("broken", Some("abc"))]);
        assert!(matches!(result, Err(FloatError::Config { .. })));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = FloatOptions {
            direction: 2,
            ..Default::default()
        };
        assert!(FloatEngine::from_marked(options, vec![]).is_err());
    }

    #[test]
    fn test_resize_changes_center_next_frame() {
        let mut engine =
            FloatEngine::from_marked(FloatOptions::default(), vec![marked("a", Some("1"))])
                .unwrap();
        // Input at old center: no movement.
        let mut state = running_state(500.0, 400.0);
        engine.step(&state);
        assert_eq!(engine.offset(0).unwrap().x, 0.0);

        state.apply(&EventKind::Resize {
            width: 800.0,
            height: 800.0,
        });
        engine.step(&state);
        // New center 400: dx = 100 * -0.2 = -20, offset = -20 / d.
        let expected = -20.0 / engine.deceleration();
        assert!((engine.offset(0).unwrap().x - expected).abs() < 1e-9);
    }

    #[test]
    fn test_render_requires_running() {
        let scene = Scene {
            viewport: ViewportSize::new(1000.0, 800.0),
            elements: vec![SceneElement::new("a").with_attribute("data-float", "1")],
        };
        let mut surface = HeadlessSurface::new(scene);
        let mut engine = FloatEngine::attach(FloatOptions::default(), &surface).unwrap();
        let mut state = FloatState::new(surface.viewport());

        assert!(engine.render(&state, &mut surface).unwrap().is_empty());
        assert_eq!(surface.writes(), 0);

        state.apply(&EventKind::DocumentReady);
        assert_eq!(engine.render(&state, &mut surface).unwrap().len(), 1);
        assert_eq!(
            surface.transform("a"),
            Some("translate3d(0.00px, 0.00px, 0)")
        );
    }

    #[test]
    fn test_element_count_is_fixed_at_discovery() {
        let mut surface = HeadlessSurface::new(Scene::sample());
        let engine = FloatEngine::attach(FloatOptions::default(), &surface).unwrap();
        surface.resize(ViewportSize::new(10.0, 10.0));
        assert_eq!(engine.elements().len(), 3);
        assert!(engine
            .elements()
            .iter()
            .all(|e| e.offset == Offset::ZERO));
    }

    #[test]
    fn test_custom_attribute() {
        let scene = Scene {
            viewport: ViewportSize::new(100.0, 100.0),
            elements: vec![
                SceneElement::new("a").with_attribute("data-depth", "3"),
                SceneElement::new("b").with_attribute("data-float", "1"),
            ],
        };
        let surface = HeadlessSurface::new(scene);
        let options = FloatOptions {
            attribute: "data-depth".to_string(),
            ..Default::default()
        };
        let engine = FloatEngine::attach(options, &surface).unwrap();
        assert_eq!(engine.elements().len(), 1);
        assert_eq!(engine.elements()[0].raw_strength, 3.0);
    }
}
