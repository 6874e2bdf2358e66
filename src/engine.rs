//! Ray tracer engine
//!
//! Owns the scene, the oscillator and the loop state. The engine holds no
//! timer: front-ends call `advance` with elapsed wall time (or `tick`
//! directly) and render the scene afterwards.

use crate::consts::MAX_CATCHUP_TICKS;
use crate::dashboard::DashboardReadout;
use crate::error::EngineError;
use crate::sim::{self, AngleOscillator, Dimensions, Point, Scene, build_scene};

/// Whether the repaint loop is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running { interval_ms: u32 },
}

/// Scene owner and the surface used by the render, input and dashboard adapters
#[derive(Debug, Clone)]
pub struct RayTracerEngine {
    scene: Scene,
    origin: Point,
    /// Applied on the next `reset`
    dimensions: Dimensions,
    oscillator: AngleOscillator,
    loop_state: LoopState,
    /// Elapsed time not yet consumed by a tick
    accumulator_ms: f64,
}

impl RayTracerEngine {
    /// Build the scene and trace the initial path
    pub fn initialize(dimensions: Dimensions, origin: Point) -> Result<Self, EngineError> {
        dimensions.validate()?;
        let mut engine = Self {
            scene: build_scene(dimensions, origin),
            origin,
            dimensions,
            oscillator: AngleOscillator::default(),
            loop_state: LoopState::Stopped,
            accumulator_ms: 0.0,
        };
        sim::retrace(&mut engine.scene)?;
        log::info!(
            "Engine initialized: length {}, thickness {}, {} segments",
            dimensions.length,
            dimensions.thickness,
            engine.scene.path.len()
        );
        Ok(engine)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Dimensions the next `reset` will use
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn oscillator(&self) -> AngleOscillator {
        self.oscillator
    }

    /// Store new dimensions; they take effect on the next `reset`.
    /// Invalid values are rejected and the previous ones kept.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> Result<(), EngineError> {
        dimensions.validate()?;
        self.dimensions = dimensions;
        Ok(())
    }

    /// Discard the scene and rebuild it from the stored dimensions.
    /// The angle returns to its initial value and is not advanced.
    /// On failure the scene is kept and the stored dimensions revert to it.
    pub fn reset(&mut self) -> Result<&Scene, EngineError> {
        let mut scene = build_scene(self.dimensions, self.origin);
        if let Err(e) = sim::retrace(&mut scene) {
            log::warn!(
                "Reset failed, keeping length {}, thickness {}: {e}",
                self.scene.dimensions.length,
                self.scene.dimensions.thickness
            );
            self.dimensions = self.scene.dimensions;
            return Err(e);
        }
        if scene.same_geometry(&self.scene) {
            log::debug!("Reset with unchanged geometry");
        }
        self.scene = scene;
        self.oscillator.reset();
        self.accumulator_ms = 0.0;
        log::info!(
            "Scene reset: length {}, thickness {}",
            self.dimensions.length,
            self.dimensions.thickness
        );
        Ok(&self.scene)
    }

    /// Advance the angle and retrace
    pub fn tick(&mut self) -> Result<&Scene, EngineError> {
        sim::tick(&mut self.scene, &mut self.oscillator)?;
        Ok(&self.scene)
    }

    /// Start ticking every `interval_ms`. Restarting with a new interval
    /// replaces the old one; starting again with the same one is a no-op.
    pub fn start_loop(&mut self, interval_ms: u32) -> Result<(), EngineError> {
        if interval_ms == 0 {
            return Err(EngineError::InvalidInterval(interval_ms));
        }
        let next = LoopState::Running { interval_ms };
        if self.loop_state != next {
            self.loop_state = next;
            self.accumulator_ms = 0.0;
            log::info!("Loop started ({interval_ms} ms)");
        }
        Ok(())
    }

    /// Stop ticking; idempotent
    pub fn stop_loop(&mut self) {
        if self.loop_state != LoopState::Stopped {
            self.loop_state = LoopState::Stopped;
            self.accumulator_ms = 0.0;
            log::info!("Loop stopped");
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.loop_state, LoopState::Running { .. })
    }

    /// Feed elapsed wall time; runs every tick that became due, capped per
    /// call. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<u32, EngineError> {
        let LoopState::Running { interval_ms } = self.loop_state else {
            return Ok(0);
        };
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return Ok(0);
        }

        let interval = f64::from(interval_ms);
        self.accumulator_ms += elapsed_ms;

        let mut ticks = 0;
        while self.accumulator_ms >= interval && ticks < MAX_CATCHUP_TICKS {
            self.accumulator_ms -= interval;
            self.tick()?;
            ticks += 1;
        }
        if ticks == MAX_CATCHUP_TICKS && self.accumulator_ms >= interval {
            // Drop backlog (e.g. after the tab was hidden)
            log::debug!("Dropping {:.0} ms of tick backlog", self.accumulator_ms);
            self.accumulator_ms %= interval;
        }
        Ok(ticks)
    }

    /// Display strings for the dashboard, from the scene as drawn
    pub fn dashboard(&self) -> DashboardReadout {
        DashboardReadout::new(self.scene.dimensions, self.scene.ray_source.angle)
    }
}
