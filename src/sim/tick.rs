//! Simulation tick
//!
//! One tick advances the incidence angle and retraces the full path.

use super::oscillator::AngleOscillator;
use super::state::Scene;
use super::trace::trace_ray;
use crate::error::EngineError;

/// Advance the scene by one tick
///
/// On error the scene keeps its previous angle and path.
pub fn tick(scene: &mut Scene, oscillator: &mut AngleOscillator) -> Result<(), EngineError> {
    let mut next_osc = *oscillator;
    let angle = next_osc.next_angle(scene.ray_source.angle)?;

    let previous = scene.ray_source.angle;
    scene.ray_source.angle = angle;
    if let Err(e) = retrace(scene) {
        scene.ray_source.angle = previous;
        scene.update_first_target();
        return Err(e);
    }

    *oscillator = next_osc;
    log::debug!(
        "tick: angle {} -> {}, {} segments",
        previous,
        angle,
        scene.path.len()
    );
    Ok(())
}

/// Recompute the first target and the path for the current angle
pub fn retrace(scene: &mut Scene) -> Result<(), EngineError> {
    scene.update_first_target();
    let path = trace_ray(
        scene.ray_source.point,
        scene.first_intersection_on_top_mirror,
        scene.ray_source.angle,
        &scene.top_mirror,
        &scene.bottom_mirror,
    )
    .collect::<Result<Vec<_>, _>>()?;
    scene.path = path;
    Ok(())
}
