//! Error taxonomy shared by every crate in the workspace.

use thiserror::Error;

use crate::types::ObjectId;

/// Errors raised by vector arithmetic, the solver, and the engine.
///
/// `Configuration`, `DimensionMismatch` and `DuplicateIdentifier` reach the
/// caller. `InsufficientMeasurements` and `SolveFailure` are absorbed by the
/// engine's step and only show up as per-target sentinels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlatError {
    /// Invalid dimension, bounds, or tick duration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operand dimensions disagree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An object with this id is already registered.
    #[error("object with id {0} already exists")]
    DuplicateIdentifier(ObjectId),

    /// Fewer measurements than the linearised system needs.
    #[error("insufficient measurements: got {got}, need at least {required}")]
    InsufficientMeasurements { got: usize, required: usize },

    /// The least-squares solve produced no usable candidate.
    #[error("least-squares solve failed: {0}")]
    SolveFailure(String),

    /// A position required for a comparison is absent or empty.
    #[error("position is absent or empty")]
    MissingPosition,

    /// No object with this id is registered.
    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),
}

pub type MlatResult<T> = Result<T, MlatError>;

impl MlatError {
    /// Shorthand for [`MlatError::DimensionMismatch`].
    pub fn mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
