//! Line geometry for the intersection solver
//!
//! Two distinct types share the same two-point representation:
//! - `InfiniteLine`: extends forever, only used for intersection math
//! - `BoundedSegment`: the span `[p1, p2]`, used for drawing and range checks

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D coordinate
pub type Point = DVec2;

/// A line through two points, infinite in both directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfiniteLine {
    pub p1: Point,
    pub p2: Point,
}

impl InfiniteLine {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }
}

/// A segment bounded by its two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedSegment {
    pub p1: Point,
    pub p2: Point,
}

impl BoundedSegment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// The infinite line this segment lies on
    #[inline]
    pub fn as_line(&self) -> InfiniteLine {
        InfiniteLine::new(self.p1, self.p2)
    }

    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).length()
    }
}

impl From<BoundedSegment> for InfiniteLine {
    fn from(segment: BoundedSegment) -> Self {
        segment.as_line()
    }
}

/// Result of intersecting two infinite lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The lines meet at a single finite point
    At(Point),
    /// Parallel or degenerate lines
    None,
}

impl Intersection {
    pub fn point(self) -> Option<Point> {
        match self {
            Intersection::At(p) => Some(p),
            Intersection::None => None,
        }
    }
}

/// Intersect two infinite lines using the two-point determinant form
pub fn intersect(l1: &InfiniteLine, l2: &InfiniteLine) -> Intersection {
    let a = l1.p2.x * l1.p1.y - l1.p1.x * l1.p2.y;
    let b = l2.p2.x * l2.p1.y - l2.p1.x * l2.p2.y;
    let xa = l1.p2.x - l1.p1.x;
    let xb = l2.p2.x - l2.p1.x;
    let ya = l1.p2.y - l1.p1.y;
    let yb = l2.p2.y - l2.p1.y;

    let denom = xa * yb - xb * ya;
    if denom == 0.0 {
        return Intersection::None;
    }

    let p = Point::new((a * xb - b * xa) / denom, (a * yb - b * ya) / denom);
    if p.is_finite() {
        Intersection::At(p)
    } else {
        Intersection::None
    }
}
