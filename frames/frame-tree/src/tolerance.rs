//! Comparison tolerances for frame-bound values.

use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Relative tolerance used by every closeness check unless overridden.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Absolute floor used by every closeness check unless overridden.
///
/// Needed so that values which should be exactly zero still compare equal
/// after a few rotations, including through frames placed far from the
/// origin where round-off in the translation leaks into small components.
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-8;

const fn is_valid(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Tolerance for element-wise vector comparison.
///
/// Two vectors are close when every component pair differs by at most
/// `absolute`, or by at most `relative` times the larger magnitude.
///
/// # Example
///
/// ```
/// use frame_tree::Tolerance;
/// use nalgebra::Vector2;
///
/// let tol = Tolerance::default().with_relative(1e-3);
/// assert!(tol.is_close(&Vector2::new(1000.0, 0.0), &Vector2::new(1000.5, 0.0)));
/// assert!(!tol.is_close(&Vector2::new(1.0, 0.0), &Vector2::new(1.1, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerance {
    /// Maximum difference relative to the larger magnitude.
    pub relative: f64,
    /// Maximum absolute difference, regardless of magnitude.
    pub absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: DEFAULT_RELATIVE_TOLERANCE,
            absolute: DEFAULT_ABSOLUTE_TOLERANCE,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance.
    ///
    /// Values are only checked in debug builds; use [`Tolerance::checked`]
    /// for untrusted input. A `NaN` tolerance makes every comparison fail.
    ///
    /// # Panics
    ///
    /// In debug builds, if either value is negative, `NaN` or infinite.
    #[must_use]
    pub const fn new(relative: f64, absolute: f64) -> Self {
        debug_assert!(is_valid(relative), "relative tolerance must be finite and non-negative");
        debug_assert!(is_valid(absolute), "absolute tolerance must be finite and non-negative");
        Self { relative, absolute }
    }

    /// Creates a tolerance, rejecting negative or non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidTolerance`] if either value is negative,
    /// `NaN` or infinite.
    pub fn checked(relative: f64, absolute: f64) -> FrameResult<Self> {
        if is_valid(relative) && is_valid(absolute) {
            Ok(Self { relative, absolute })
        } else {
            Err(FrameError::InvalidTolerance { relative, absolute })
        }
    }

    /// Set the relative tolerance.
    ///
    /// # Panics
    ///
    /// In debug builds, if `relative` is negative, `NaN` or infinite.
    #[must_use]
    pub const fn with_relative(mut self, relative: f64) -> Self {
        debug_assert!(is_valid(relative), "relative tolerance must be finite and non-negative");
        self.relative = relative;
        self
    }

    /// Set the absolute tolerance.
    ///
    /// # Panics
    ///
    /// In debug builds, if `absolute` is negative, `NaN` or infinite.
    #[must_use]
    pub const fn with_absolute(mut self, absolute: f64) -> Self {
        debug_assert!(is_valid(absolute), "absolute tolerance must be finite and non-negative");
        self.absolute = absolute;
        self
    }

    /// Returns true if `a` and `b` agree component-wise within this tolerance.
    #[must_use]
    pub fn is_close<V>(&self, a: &V, b: &V) -> bool
    where
        V: AbsDiffEq<Epsilon = f64> + RelativeEq,
    {
        a.relative_eq(b, self.absolute, self.relative)
    }
}
