//! Scene state and core simulation types
//!
//! A `Scene` is rebuilt from scratch whenever the dimensions change; only the
//! ray source angle and the traced path change between ticks.

use serde::{Deserialize, Serialize};

use super::line::{BoundedSegment, Point};
use crate::consts::*;
use crate::error::EngineError;

/// Mirror length and separation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub thickness: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl Dimensions {
    /// Create validated dimensions
    pub fn new(length: f64, thickness: f64) -> Result<Self, EngineError> {
        let dimensions = Self { length, thickness };
        dimensions.validate()?;
        Ok(dimensions)
    }

    /// Both values must be finite and strictly positive
    pub fn validate(&self) -> Result<(), EngineError> {
        check_positive("length", self.length)?;
        check_positive("thickness", self.thickness)
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidDimension {
            field,
            value: value.to_string(),
        })
    }
}

/// A CSS color string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mirror() -> Self {
        Self::new("red")
    }

    pub fn source() -> Self {
        Self::new("black")
    }

    pub fn ray() -> Self {
        Self::new("rgb(255,255,128)")
    }

    pub fn guide() -> Self {
        Self::new("white")
    }
}

/// A horizontal mirror surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub segment: BoundedSegment,
    pub color: Color,
}

impl Mirror {
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            segment: BoundedSegment::new(start, end),
            color,
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.segment.p1
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.segment.p2
    }

    /// Whether a hit at `x` keeps the ray inside the cavity.
    /// Left-exclusive, right-inclusive.
    #[inline]
    pub fn spans(&self, x: f64) -> bool {
        self.start().x < x && x <= self.end().x
    }
}

/// The ray emitter at the left edge, midway between the mirrors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaySource {
    pub point: Point,
    /// Incidence angle in degrees, kept within [MIN_ANGLE, MAX_ANGLE]
    pub angle: f64,
    pub color: Color,
}

/// Complete scene (geometry plus the most recent trace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub dimensions: Dimensions,
    pub top_mirror: Mirror,
    pub bottom_mirror: Mirror,
    pub ray_source: RaySource,
    pub ray_color: Color,
    /// Positive angle: the ray heads for the top mirror first
    pub first_intersection_on_top_mirror: bool,
    /// Path traced on the last tick or reset (not persisted)
    #[serde(skip)]
    pub path: Vec<BoundedSegment>,
}

impl Scene {
    /// Recompute the first target from the current angle's sign
    pub fn update_first_target(&mut self) {
        self.first_intersection_on_top_mirror = self.ray_source.angle > 0.0;
    }

    /// Number of segments in the current path
    pub fn bounce_count(&self) -> usize {
        self.path.len()
    }

    /// Geometry equality, ignoring the angle and the traced path
    pub fn same_geometry(&self, other: &Scene) -> bool {
        self.dimensions == other.dimensions
            && self.top_mirror == other.top_mirror
            && self.bottom_mirror == other.bottom_mirror
            && self.ray_source.point == other.ray_source.point
            && self.ray_source.color == other.ray_source.color
            && self.ray_color == other.ray_color
    }
}

/// Build a fresh scene anchored at `origin` (top left corner of the top mirror)
pub fn build_scene(dimensions: Dimensions, origin: Point) -> Scene {
    let Dimensions { length, thickness } = dimensions;

    let top_mirror = Mirror::new(
        origin,
        Point::new(origin.x + length, origin.y),
        Color::mirror(),
    );
    let bottom_mirror = Mirror::new(
        Point::new(origin.x, origin.y + thickness),
        Point::new(origin.x + length, origin.y + thickness),
        Color::mirror(),
    );
    let ray_source = RaySource {
        point: Point::new(origin.x, origin.y + thickness / 2.0),
        angle: INITIAL_ANGLE,
        color: Color::source(),
    };

    let mut scene = Scene {
        dimensions,
        top_mirror,
        bottom_mirror,
        ray_source,
        ray_color: Color::ray(),
        first_intersection_on_top_mirror: true,
        path: Vec::new(),
    };
    scene.update_first_target();
    scene
}

/// Fixed scene origin
pub fn default_origin() -> Point {
    Point::new(START_X, START_Y)
}
