use crate::controller::Phase;
use thiserror::Error;

/// Rejected commands. State is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("command requires {expected:?} phase, current phase is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("invalid window dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("eye tracker is not available")]
    EyeTrackerUnavailable,
    #[error("calibration needs at least one round and one target")]
    EmptySequence,
}

pub type CoreResult<T> = Result<T, CoreError>;
