//! Anchored vectors that can be summed across frames.

use std::ops::Add;

use frame_tree::{Frame, FrameResult, Planar, Space, Spatial};
use tracing::trace;

/// A planar vector.
pub type Vector2d = Vector<Planar>;

/// A spatial vector.
pub type Vector3d = Vector<Spatial>;

/// Coordinates in a reference frame that transform like a point.
///
/// Addition expresses both operands in their nearest common parent frame,
/// sums them there, and returns the sum expressed in the left operand's
/// frame.
///
/// # Example
///
/// ```
/// use frame_tree::{Frame2d, Rotation2d};
/// use frame_values::Vector2d;
/// use nalgebra::Vector2;
///
/// let base = Frame2d::new(Vector2::new(1.0, 0.0), Rotation2d::identity());
/// let a = Vector2d::new(Vector2::new(1.0, 0.0), &Frame2d::root());
/// let b = Vector2d::new(Vector2::new(0.0, 1.0), &base);
///
/// let sum = &a + &b;
/// assert_eq!(sum.reference, Frame2d::root());
/// assert!((sum.coordinates - Vector2::new(2.0, 1.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Vector<S: Space> {
    /// Coordinates in `reference`.
    pub coordinates: S::Vector,
    /// Frame the coordinates are expressed in.
    pub reference: Frame<S>,
}

impl<S: Space> Vector<S> {
    /// Creates a vector.
    #[must_use]
    pub fn new(coordinates: S::Vector, reference: &Frame<S>) -> Self {
        Self {
            coordinates,
            reference: reference.clone(),
        }
    }

    /// Creates a vector from runtime-sized coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`frame_tree::FrameError::DimensionMismatch`] if `coordinates`
    /// does not have exactly `S::DIM` components.
    pub fn from_slice(coordinates: &[f64], reference: &Frame<S>) -> FrameResult<Self> {
        Ok(Self::new(S::vector_from_slice(coordinates)?, reference))
    }

    /// Returns the coordinates in `reference`.
    #[must_use]
    pub fn transform_to(&self, reference: &Frame<S>) -> S::Vector {
        self.reference.transform_to(reference, &self.coordinates)
    }
}

impl<S: Space> Add for &Vector<S> {
    type Output = Vector<S>;

    fn add(self, other: Self) -> Vector<S> {
        let common = self.reference.find_common_parent(&other.reference);
        trace!(
            space = S::NAME,
            common_depth = common.depth(),
            "adding vectors in common parent"
        );
        let sum = self.transform_to(&common) + other.transform_to(&common);
        Vector {
            coordinates: common.transform_to(&self.reference, &sum),
            reference: self.reference.clone(),
        }
    }
}

impl<S: Space> Add for Vector<S> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}
