//! Deterministic simulation module
//!
//! All scene logic lives here. This module must be pure and deterministic:
//! - One tick advances the angle by a fixed step
//! - Every tick retraces the full path from the ray source
//! - No rendering or platform dependencies

pub mod line;
pub mod oscillator;
pub mod state;
pub mod tick;
pub mod trace;

pub use line::{BoundedSegment, InfiniteLine, Intersection, Point, intersect};
pub use oscillator::{AngleOscillator, OscillationDirection};
pub use state::{Color, Dimensions, Mirror, RaySource, Scene, build_scene, default_origin};
pub use tick::{retrace, tick};
pub use trace::{BounceTrace, trace_ray};
