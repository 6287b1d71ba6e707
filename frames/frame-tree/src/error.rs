//! Error types for frame operations.

use thiserror::Error;

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that can occur when building or mutating frames.
///
/// Transform queries themselves never fail: every frame's parent chain ends
/// at the root of its dimensionality, so a path always exists.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// A coordinate slice does not have the frame's dimensionality.
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch {
        /// Number of components required by the space.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// A rotation operator is malformed (zero quaternion, non-orthonormal matrix).
    #[error("invalid rotation: {0}")]
    InvalidRotation(String),

    /// The root frame has a fixed identity pose and cannot be mutated.
    #[error("the root frame is immutable")]
    RootImmutable,

    /// A comparison tolerance is negative or not finite.
    #[error("invalid tolerance: relative {relative}, absolute {absolute}")]
    InvalidTolerance {
        /// Requested relative tolerance.
        relative: f64,
        /// Requested absolute tolerance.
        absolute: f64,
    },
}

impl FrameError {
    /// Creates a dimension mismatch error.
    #[must_use]
    pub const fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates an invalid rotation error.
    #[must_use]
    pub fn invalid_rotation(reason: impl Into<String>) -> Self {
        Self::InvalidRotation(reason.into())
    }
}
