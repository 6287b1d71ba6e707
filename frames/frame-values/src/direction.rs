//! Free vectors bound to a reference frame.

use std::ops::{Add, Mul, MulAssign, Neg};

use frame_tree::{Frame, FrameResult, Planar, Space, Spatial, Tolerance};

/// A planar direction.
pub type Direction2d = Direction<Planar>;

/// A spatial direction.
pub type Direction3d = Direction<Spatial>;

/// A displacement expressed in a reference frame.
///
/// Unlike a [`crate::Position`], a direction has no anchor point: changing
/// the frame only rotates it, translations between frames never apply.
#[derive(Debug, Clone)]
pub struct Direction<S: Space> {
    /// Components in `reference`.
    pub vector: S::Vector,
    /// Frame the components are expressed in.
    pub reference: Frame<S>,
    /// Tolerance used when comparing with other directions.
    pub tolerance: Tolerance,
}

impl<S: Space> Direction<S> {
    /// Creates a direction with the default tolerance.
    #[must_use]
    pub fn new(vector: S::Vector, reference: &Frame<S>) -> Self {
        Self {
            vector,
            reference: reference.clone(),
            tolerance: Tolerance::default(),
        }
    }

    /// Creates a direction from runtime-sized components.
    ///
    /// # Errors
    ///
    /// Returns [`frame_tree::FrameError::DimensionMismatch`] if `vector` does
    /// not have exactly `S::DIM` components.
    pub fn from_slice(vector: &[f64], reference: &Frame<S>) -> FrameResult<Self> {
        Ok(Self::new(S::vector_from_slice(vector)?, reference))
    }

    /// Replaces the comparison tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the components of this direction in `reference`.
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tree::{Frame2d, Rotation2d};
    /// use frame_values::Direction2d;
    /// use nalgebra::Vector2;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// // Translation is ignored, only the quarter turn applies.
    /// let turned = Frame2d::new(Vector2::new(5.0, 5.0), Rotation2d::new(FRAC_PI_2));
    /// let d = Direction2d::new(Vector2::new(1.0, 0.0), &turned);
    /// let seen = d.transform_to(&Frame2d::root());
    /// assert!((seen - Vector2::new(0.0, 1.0)).norm() < 1e-12);
    /// ```
    #[must_use]
    pub fn transform_to(&self, reference: &Frame<S>) -> S::Vector {
        self.reference.rotate_to(reference, &self.vector)
    }

    /// Returns the same direction expressed in `reference`.
    #[must_use]
    pub fn expressed_in(&self, reference: &Frame<S>) -> Self {
        Self {
            vector: self.transform_to(reference),
            reference: reference.clone(),
            tolerance: self.tolerance,
        }
    }

    /// Multiplies the components by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        self.vector *= factor;
    }

    /// Adds `other` to this direction in place, keeping this reference frame.
    pub fn apply_direction(&mut self, other: &Self) {
        self.vector += other.transform_to(&self.reference);
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        S::norm(&self.vector)
    }

    /// Returns true if `other` points the same way with the same length,
    /// within this tolerance.
    #[must_use]
    pub fn is_close(&self, other: &Self) -> bool {
        self.tolerance
            .is_close(&self.vector, &other.transform_to(&self.reference))
    }
}

impl<S: Space> PartialEq for Direction<S> {
    fn eq(&self, other: &Self) -> bool {
        self.is_close(other)
    }
}

impl<S: Space> Mul<f64> for Direction<S> {
    type Output = Self;

    fn mul(mut self, factor: f64) -> Self {
        self.scale(factor);
        self
    }
}

impl<S: Space> Mul<Direction<S>> for f64 {
    type Output = Direction<S>;

    fn mul(self, direction: Direction<S>) -> Direction<S> {
        direction * self
    }
}

impl<S: Space> MulAssign<f64> for Direction<S> {
    fn mul_assign(&mut self, factor: f64) {
        self.scale(factor);
    }
}

impl<S: Space> Neg for Direction<S> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.vector = -self.vector;
        self
    }
}

impl<S: Space> Add<&Direction<S>> for Direction<S> {
    type Output = Self;

    fn add(mut self, other: &Self) -> Self {
        self.apply_direction(other);
        self
    }
}
