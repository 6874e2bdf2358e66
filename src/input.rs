//! Dimension input handling
//!
//! Text from the length/thickness boxes is parsed the way a browser's
//! `parseFloat` reads it (leading number, trailing junk ignored). Anything
//! that does not yield a finite positive number leaves the engine untouched.

use crate::engine::RayTracerEngine;
use crate::error::EngineError;
use crate::sim::Dimensions;

/// Which input box changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionField {
    Length,
    Thickness,
}

impl DimensionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionField::Length => "length",
            DimensionField::Thickness => "thickness",
        }
    }

    /// DOM id of the input element
    pub fn input_id(&self) -> &'static str {
        match self {
            DimensionField::Length => "length-input",
            DimensionField::Thickness => "thickness-input",
        }
    }

    fn apply(&self, dimensions: Dimensions, value: f64) -> Dimensions {
        match self {
            DimensionField::Length => Dimensions {
                length: value,
                ..dimensions
            },
            DimensionField::Thickness => Dimensions {
                thickness: value,
                ..dimensions
            },
        }
    }
}

/// Length of the leading decimal literal in `s` (sign, digits, fraction, exponent)
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

    // Exponent only counts if at least one digit follows
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// Parse a dimension from raw input text
pub fn parse_dimension(field: DimensionField, raw: &str) -> Result<f64, EngineError> {
    let invalid = || EngineError::InvalidDimension {
        field: field.as_str(),
        value: raw.to_string(),
    };

    let trimmed = raw.trim_start();
    let len = numeric_prefix_len(trimmed);
    if len == 0 {
        return Err(invalid());
    }
    let value: f64 = trimmed[..len].parse().map_err(|_| invalid())?;

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Apply one input box change: on success the engine gets the new dimensions
/// and is reset. Returns whether the input took effect. A failed reset
/// leaves the engine on its previous dimensions.
pub fn apply_dimension_input(
    engine: &mut RayTracerEngine,
    field: DimensionField,
    raw: &str,
) -> Result<bool, EngineError> {
    let value = match parse_dimension(field, raw) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("Ignoring input: {e}");
            return Ok(false);
        }
    };

    let dimensions = field.apply(engine.dimensions(), value);
    if let Err(e) = engine.set_dimensions(dimensions) {
        log::debug!("Ignoring input: {e}");
        return Ok(false);
    }
    engine.reset()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::default_origin;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_dimension(DimensionField::Length, "400").unwrap(), 400.0);
        assert_eq!(parse_dimension(DimensionField::Length, " 12.5").unwrap(), 12.5);
        assert_eq!(parse_dimension(DimensionField::Length, ".5").unwrap(), 0.5);
        assert_eq!(parse_dimension(DimensionField::Length, "5.").unwrap(), 5.0);
        assert_eq!(parse_dimension(DimensionField::Length, "1e2").unwrap(), 100.0);
        assert_eq!(parse_dimension(DimensionField::Length, "+7").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_ignores_trailing_text() {
        assert_eq!(parse_dimension(DimensionField::Thickness, "120px").unwrap(), 120.0);
        assert_eq!(parse_dimension(DimensionField::Thickness, "3e").unwrap(), 3.0);
        assert_eq!(parse_dimension(DimensionField::Thickness, "2.5.1").unwrap(), 2.5);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for raw in ["", "   ", "abc", "-5", "0", "0.0", "-", ".", "e5", "1e999"] {
            let err = parse_dimension(DimensionField::Length, raw).unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidDimension { field: "length", .. }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_apply_valid_input_resets_scene() {
        let mut engine =
            RayTracerEngine::initialize(Dimensions::default(), default_origin()).unwrap();
        engine.tick().unwrap();

        assert!(apply_dimension_input(&mut engine, DimensionField::Thickness, "60").unwrap());
        let scene = engine.scene();
        assert_eq!(scene.dimensions.thickness, 60.0);
        assert_eq!(scene.dimensions.length, 400.0);
        assert_eq!(scene.ray_source.angle, 60.0);
        assert_eq!(scene.ray_source.point.y, 80.0);
    }

    #[test]
    fn test_apply_invalid_input_is_ignored() {
        let mut engine =
            RayTracerEngine::initialize(Dimensions::default(), default_origin()).unwrap();
        engine.tick().unwrap();

        assert!(!apply_dimension_input(&mut engine, DimensionField::Length, "-10").unwrap());
        assert!(!apply_dimension_input(&mut engine, DimensionField::Length, "abc").unwrap());
        assert_eq!(engine.dimensions(), Dimensions::default());
        // No reset happened
        assert_eq!(engine.scene().ray_source.angle, 59.0);
    }

    #[test]
    fn test_failed_reset_keeps_previous_dimensions() {
        let mut engine =
            RayTracerEngine::initialize(Dimensions::default(), default_origin()).unwrap();

        let result = apply_dimension_input(&mut engine, DimensionField::Thickness, "0.01");
        assert!(matches!(result, Err(EngineError::BounceLimitExceeded { .. })));
        assert_eq!(engine.dimensions(), engine.scene().dimensions);
        assert_eq!(engine.dimensions(), Dimensions::default());
        assert_eq!(
            engine.dashboard().to_string(),
            "length 400 | thickness 100 | angle 60°"
        );

        // The next edit starts from the thickness still on screen
        assert!(apply_dimension_input(&mut engine, DimensionField::Length, "300").unwrap());
        assert_eq!(engine.scene().dimensions.length, 300.0);
        assert_eq!(engine.scene().dimensions.thickness, 100.0);
    }
}
