//! Engine error taxonomy
//!
//! Degenerate geometry (a ray parallel to its mirror) is not an error; the
//! solver reports it as `Intersection::None` and the trace simply ends.

use thiserror::Error;

/// Errors surfaced by the engine and its adapters
#[derive(Debug, Error)]
pub enum EngineError {
    /// Non-positive, non-finite or non-numeric mirror dimension
    #[error("invalid {field}: {value:?} (must be a positive number)")]
    InvalidDimension { field: &'static str, value: String },

    /// Timer interval of zero
    #[error("invalid loop interval: {0} ms")]
    InvalidInterval(u32),

    /// The trace produced more segments than the safety cap allows
    #[error("ray trace exceeded {limit} bounces")]
    BounceLimitExceeded { limit: usize },

    /// A state invariant broke (logic or precision defect)
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Fatal errors abort the tick; everything else is recovered locally
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::BounceLimitExceeded { .. } | EngineError::InvariantViolation(_)
        )
    }
}
