//! Incidence angle oscillation
//!
//! The angle sweeps back and forth between the limits one step per tick. The
//! direction is held explicitly: at exactly ±60 either direction is valid for
//! a moment, so it cannot be recovered from the angle alone.

use serde::{Deserialize, Serialize};

use crate::consts::{ANGLE_STEP, MAX_ANGLE, MIN_ANGLE};
use crate::error::EngineError;

/// Which way the angle is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OscillationDirection {
    #[default]
    Increasing,
    Decreasing,
}

/// Oscillator state, owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AngleOscillator {
    pub direction: OscillationDirection,
}

impl AngleOscillator {
    pub fn new(direction: OscillationDirection) -> Self {
        Self { direction }
    }

    /// Compute the angle for the next tick, flipping direction at the limits
    pub fn next_angle(&mut self, current: f64) -> Result<f64, EngineError> {
        if current >= MAX_ANGLE {
            self.direction = OscillationDirection::Decreasing;
        }
        if current <= MIN_ANGLE {
            self.direction = OscillationDirection::Increasing;
        }

        let next = match self.direction {
            OscillationDirection::Increasing => current + ANGLE_STEP,
            OscillationDirection::Decreasing => current - ANGLE_STEP,
        };

        if !(MIN_ANGLE..=MAX_ANGLE).contains(&next) {
            return Err(EngineError::InvariantViolation(format!(
                "angle {next} left [{MIN_ANGLE}, {MAX_ANGLE}] after oscillation from {current}"
            )));
        }
        Ok(next)
    }

    /// Back to the default direction
    pub fn reset(&mut self) {
        self.direction = OscillationDirection::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(osc: &mut AngleOscillator, mut angle: f64, ticks: usize) -> f64 {
        for _ in 0..ticks {
            angle = osc.next_angle(angle).unwrap();
        }
        angle
    }

    #[test]
    fn test_default_direction_is_increasing() {
        let mut osc = AngleOscillator::default();
        assert_eq!(osc.direction, OscillationDirection::Increasing);
        assert_eq!(osc.next_angle(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_oscillation_symmetry() {
        let mut osc = AngleOscillator::default();

        let angle = run(&mut osc, 0.0, 60);
        assert_eq!(angle, 60.0);

        // Flip happens on the tick that starts at the limit
        let angle = run(&mut osc, angle, 1);
        assert_eq!(angle, 59.0);
        assert_eq!(osc.direction, OscillationDirection::Decreasing);

        let angle = run(&mut osc, angle, 59);
        assert_eq!(angle, 0.0);

        let angle = run(&mut osc, angle, 60);
        assert_eq!(angle, -60.0);

        let angle = run(&mut osc, angle, 1);
        assert_eq!(angle, -59.0);
        assert_eq!(osc.direction, OscillationDirection::Increasing);
    }

    #[test]
    fn test_flip_at_upper_limit_from_initial_angle() {
        let mut osc = AngleOscillator::default();
        assert_eq!(osc.next_angle(60.0).unwrap(), 59.0);
        assert_eq!(osc.direction, OscillationDirection::Decreasing);
    }

    #[test]
    fn test_out_of_range_input_is_reported() {
        let mut osc = AngleOscillator::new(OscillationDirection::Increasing);
        // 70 forces Decreasing, but 69 is still outside the range
        let err = osc.next_angle(70.0).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_reset_restores_default() {
        let mut osc = AngleOscillator::new(OscillationDirection::Decreasing);
        osc.reset();
        assert_eq!(osc.direction, OscillationDirection::Increasing);
    }

    proptest! {
        #[test]
        fn prop_angle_stays_in_range(
            start in -60i32..=60,
            increasing in any::<bool>(),
            ticks in 0usize..500,
        ) {
            let direction = if increasing {
                OscillationDirection::Increasing
            } else {
                OscillationDirection::Decreasing
            };
            let mut osc = AngleOscillator::new(direction);
            let mut angle = start as f64;
            for _ in 0..ticks {
                angle = osc.next_angle(angle).unwrap();
                prop_assert!((MIN_ANGLE..=MAX_ANGLE).contains(&angle));
            }
        }
    }
}
