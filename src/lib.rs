//! Mirror Cavity - a light ray bouncing between two parallel mirrors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, angle oscillation, bounce tracing)
//! - `engine`: Scene owner and the surface consumed by the front-ends
//! - `renderer`: Draw commands and the render target abstraction
//! - `input`: Validation of user-entered dimensions
//! - `settings`: Persisted configuration

pub mod dashboard;
pub mod engine;
pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use dashboard::DashboardReadout;
pub use engine::{LoopState, RayTracerEngine};
pub use error::EngineError;
pub use settings::Settings;

/// Scene configuration constants
pub mod consts {
    /// x-coordinate of the top left corner of the top mirror
    pub const START_X: f64 = 10.0;
    /// y-coordinate of the top left corner of the top mirror
    pub const START_Y: f64 = 50.0;

    /// Step along x used to turn the ray angle into a two-point line.
    /// Must stay small (<= 0.01) or the traced path drifts visibly.
    pub const DX: f64 = 0.001;

    /// Angle limits (degrees)
    pub const MAX_ANGLE: f64 = 60.0;
    pub const MIN_ANGLE: f64 = -MAX_ANGLE;
    /// Angle the ray source starts at after every reset
    pub const INITIAL_ANGLE: f64 = 60.0;
    /// Angle change per tick (degrees)
    pub const ANGLE_STEP: f64 = 1.0;

    /// Hard cap on segments per trace
    pub const MAX_BOUNCES: usize = 10_000;

    /// Mirror defaults
    pub const DEFAULT_LENGTH: f64 = 400.0;
    pub const DEFAULT_THICKNESS: f64 = 100.0;

    /// Canvas defaults (pixels)
    pub const CANVAS_WIDTH: u32 = 800;
    pub const CANVAS_HEIGHT: u32 = 500;

    /// Repaint timer interval
    pub const DEFAULT_INTERVAL_MS: u32 = 1000;
    /// Maximum ticks run by a single `advance` call
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Dash pattern for the vertical guides at the mirror ends
    pub const GUIDE_DASH: [f64; 2] = [5.0, 7.0];
}

/// Tangent of an angle given in degrees
#[inline]
pub fn tan_degrees(angle: f64) -> f64 {
    angle.to_radians().tan()
}

/// Format a number the way it reads in a text box: `400`, `12.5`, `-3`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{value}")
}
