//! Bounce tracing between the two mirrors
//!
//! The ray direction is approximated by a second point `DX` to the right of
//! the current origin, which turns each leg into a two-point line for the
//! intersection solver. The trace is a lazy iterator so callers can stop
//! early; it always ends, at the latest when the bounce cap is reached.

use super::line::{BoundedSegment, InfiniteLine, Point, intersect};
use super::state::Mirror;
use crate::consts::{DX, MAX_BOUNCES};
use crate::error::EngineError;
use crate::tan_degrees;

/// Lazy sequence of path segments from the ray source to the cavity exit
#[derive(Debug, Clone)]
pub struct BounceTrace<'a> {
    origin: Point,
    target_is_top: bool,
    slope: f64,
    top: &'a Mirror,
    bottom: &'a Mirror,
    emitted: usize,
    limit: usize,
    done: bool,
}

impl<'a> BounceTrace<'a> {
    /// Override the bounce cap
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Segments yielded so far
    #[cfg(test)]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn target(&self) -> &'a Mirror {
        if self.target_is_top {
            self.top
        } else {
            self.bottom
        }
    }

    /// Two-point approximation of the current leg
    fn leg(&self) -> InfiniteLine {
        // Screen y grows downward: heading for the top mirror means y decreases
        let sign = if self.target_is_top { -1.0 } else { 1.0 };
        InfiniteLine::new(
            self.origin,
            Point::new(self.origin.x + DX, self.origin.y + sign * DX * self.slope),
        )
    }
}

impl Iterator for BounceTrace<'_> {
    type Item = Result<BoundedSegment, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.emitted >= self.limit {
            self.done = true;
            return Some(Err(EngineError::BounceLimitExceeded { limit: self.limit }));
        }

        let mirror = self.target();
        let Some(hit) = intersect(&self.leg(), &mirror.segment.as_line()).point() else {
            // Ray parallel to its target: nothing more to draw
            self.done = true;
            return None;
        };

        let segment = BoundedSegment::new(self.origin, hit);
        self.emitted += 1;
        log::trace!(
            "bounce {} on {} mirror at ({:.3}, {:.3}), leg {:.3}",
            self.emitted,
            if self.target_is_top { "top" } else { "bottom" },
            hit.x,
            hit.y,
            segment.length()
        );

        if mirror.spans(hit.x) {
            self.origin = hit;
            self.target_is_top = !self.target_is_top;
        } else {
            // Left the cavity
            self.done = true;
        }
        Some(Ok(segment))
    }
}

/// Trace the ray from `origin` at `angle` degrees, first heading for the top
/// mirror if `target_is_top`
pub fn trace_ray<'a>(
    origin: Point,
    target_is_top: bool,
    angle: f64,
    top: &'a Mirror,
    bottom: &'a Mirror,
) -> BounceTrace<'a> {
    BounceTrace {
        origin,
        target_is_top,
        slope: tan_degrees(angle.abs()),
        top,
        bottom,
        emitted: 0,
        limit: MAX_BOUNCES,
        done: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Color, Dimensions, build_scene, default_origin};
    use approx::assert_abs_diff_eq;

    fn collect(trace: BounceTrace<'_>) -> Result<Vec<BoundedSegment>, EngineError> {
        trace.collect()
    }

    #[test]
    fn test_first_intersection_at_45_degrees() {
        let scene = build_scene(Dimensions::new(400.0, 100.0).unwrap(), default_origin());
        let origin = scene.ray_source.point;
        assert_eq!(origin, Point::new(10.0, 100.0));

        let mut trace = trace_ray(origin, true, 45.0, &scene.top_mirror, &scene.bottom_mirror);
        let first = trace.next().unwrap().unwrap();

        assert_eq!(first.p1, origin);
        assert_abs_diff_eq!(first.p2.x, 10.0 + 50.0 * tan_degrees(45.0), epsilon = 1e-6);
        assert_abs_diff_eq!(first.p2.x, 60.0, epsilon = 1e-6);
        assert_abs_diff_eq!(first.p2.y, 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_path_alternates_mirrors_and_exits() {
        let scene = build_scene(Dimensions::default(), default_origin());
        let path = collect(trace_ray(
            scene.ray_source.point,
            true,
            45.0,
            &scene.top_mirror,
            &scene.bottom_mirror,
        ))
        .unwrap();

        // Hits at x = 60, 160, 260, 360 stay inside, 460 exits
        assert_eq!(path.len(), 5);
        for (i, segment) in path.iter().enumerate() {
            let expected_y = if i % 2 == 0 { 50.0 } else { 150.0 };
            assert_abs_diff_eq!(segment.p2.y, expected_y, epsilon = 1e-6);
            if i > 0 {
                assert_eq!(segment.p1, path[i - 1].p2);
            }
        }
        assert!(path.last().unwrap().p2.x > scene.top_mirror.end().x);
    }

    #[test]
    fn test_negative_angle_heads_for_bottom() {
        let scene = build_scene(Dimensions::default(), default_origin());
        let mut trace = trace_ray(
            scene.ray_source.point,
            false,
            -45.0,
            &scene.top_mirror,
            &scene.bottom_mirror,
        );
        let first = trace.next().unwrap().unwrap();
        assert_abs_diff_eq!(first.p2.x, 60.0, epsilon = 1e-6);
        assert_abs_diff_eq!(first.p2.y, 150.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hit_on_mirror_edges() {
        // Top mirror on y = 0 with a power-of-two width: the hit x does not
        // depend on where the mirror starts, so it can be reused exactly
        let origin = Point::new(0.0, 70.0);
        let top_at = |start: f64, end: f64| {
            Mirror::new(Point::new(start, 0.0), Point::new(end, 0.0), Color::mirror())
        };
        let bottom = Mirror::new(
            Point::new(-1000.0, 140.0),
            Point::new(1000.0, 140.0),
            Color::mirror(),
        );

        let reference_top = top_at(0.0, 32.0);
        let first = trace_ray(origin, true, 45.0, &reference_top, &bottom)
            .next()
            .unwrap()
            .unwrap();
        let hit_x = first.p2.x;
        assert!((64.0..96.0).contains(&hit_x));

        // Hit exactly on the end: still inside, the ray bounces on
        let ends_at_hit = top_at(hit_x - 32.0, hit_x);
        let path = collect(trace_ray(origin, true, 45.0, &ends_at_hit, &bottom)).unwrap();
        assert_eq!(path[0].p2.x, hit_x);
        assert_eq!(path.len(), 3);

        // Hit exactly on the start: outside, the trace stops
        let starts_at_hit = top_at(hit_x, hit_x + 32.0);
        let path = collect(trace_ray(origin, true, 45.0, &starts_at_hit, &bottom)).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].p2.x, hit_x);
    }

    #[test]
    fn test_zero_angle_yields_nothing() {
        let scene = build_scene(Dimensions::default(), default_origin());
        let mut trace = trace_ray(
            scene.ray_source.point,
            false,
            0.0,
            &scene.top_mirror,
            &scene.bottom_mirror,
        );
        assert!(trace.next().is_none());
        assert!(trace.next().is_none());
        assert_eq!(trace.emitted(), 0);
    }

    #[test]
    fn test_hit_left_of_mirror_stops_trace() {
        // Origin left of the cavity: the first hit lands before the mirror starts
        let scene = build_scene(Dimensions::default(), default_origin());
        let origin = Point::new(-50.0, 100.0);
        let path = collect(trace_ray(
            origin,
            true,
            45.0,
            &scene.top_mirror,
            &scene.bottom_mirror,
        ))
        .unwrap();

        assert_eq!(path.len(), 1);
        assert_abs_diff_eq!(path[0].p2.x, 0.0, epsilon = 1e-6);
        assert!(!scene.top_mirror.spans(path[0].p2.x));
    }

    #[test]
    fn test_terminates_for_all_positive_angles() {
        let scene = build_scene(Dimensions::new(400.0, 100.0).unwrap(), default_origin());
        for angle in 1..=60 {
            let path = collect(trace_ray(
                scene.ray_source.point,
                true,
                angle as f64,
                &scene.top_mirror,
                &scene.bottom_mirror,
            ))
            .unwrap();
            assert!(!path.is_empty());
            assert!(path.len() < MAX_BOUNCES, "angle {angle}: {} bounces", path.len());
        }
    }

    #[test]
    fn test_bounce_limit_is_an_error() {
        let scene = build_scene(Dimensions::default(), default_origin());
        let mut trace = trace_ray(
            scene.ray_source.point,
            true,
            60.0,
            &scene.top_mirror,
            &scene.bottom_mirror,
        )
        .with_limit(2);

        assert!(trace.next().unwrap().is_ok());
        assert!(trace.next().unwrap().is_ok());
        let err = trace.next().unwrap().unwrap_err();
        assert!(matches!(err, EngineError::BounceLimitExceeded { limit: 2 }));
        assert!(trace.next().is_none());
    }

    #[test]
    fn test_thin_long_cavity_hits_cap() {
        let scene = build_scene(Dimensions::new(1.0e9, 0.01).unwrap(), default_origin());
        let result = collect(trace_ray(
            scene.ray_source.point,
            true,
            60.0,
            &scene.top_mirror,
            &scene.bottom_mirror,
        ));
        assert!(matches!(result, Err(EngineError::BounceLimitExceeded { .. })));
    }
}
