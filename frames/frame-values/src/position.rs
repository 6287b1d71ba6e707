//! Points bound to a reference frame.

use frame_tree::{Frame, FrameResult, Planar, Space, Spatial, Tolerance};
use tracing::trace;

use crate::direction::Direction;

/// A planar position.
pub type Position2d = Position<Planar>;

/// A spatial position.
pub type Position3d = Position<Spatial>;

/// A point in space, given by coordinates in a reference frame.
///
/// Changing the frame applies both rotation and translation. Two positions
/// are equal when they describe the same point within the left operand's
/// tolerance, whatever frames they are expressed in.
///
/// # Example
///
/// ```
/// use frame_tree::{Frame2d, Rotation2d};
/// use frame_values::Position2d;
/// use nalgebra::Vector2;
///
/// let shifted = Frame2d::new(Vector2::new(1.0, 0.0), Rotation2d::identity());
/// let a = Position2d::new(Vector2::new(2.0, 1.0), &Frame2d::root());
/// let b = Position2d::new(Vector2::new(1.0, 1.0), &shifted);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Position<S: Space> {
    /// Coordinates in `reference`.
    pub coordinates: S::Vector,
    /// Frame the coordinates are expressed in.
    pub reference: Frame<S>,
    /// Tolerance used when comparing with other positions.
    pub tolerance: Tolerance,
}

impl<S: Space> Position<S> {
    /// Creates a position with the default tolerance.
    #[must_use]
    pub fn new(coordinates: S::Vector, reference: &Frame<S>) -> Self {
        Self {
            coordinates,
            reference: reference.clone(),
            tolerance: Tolerance::default(),
        }
    }

    /// Creates a position from runtime-sized coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`frame_tree::FrameError::DimensionMismatch`] if `coordinates`
    /// does not have exactly `S::DIM` components.
    pub fn from_slice(coordinates: &[f64], reference: &Frame<S>) -> FrameResult<Self> {
        Ok(Self::new(S::vector_from_slice(coordinates)?, reference))
    }

    /// Replaces the comparison tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the coordinates of this point in `reference`.
    #[must_use]
    pub fn transform_to(&self, reference: &Frame<S>) -> S::Vector {
        self.reference.transform_to(reference, &self.coordinates)
    }

    /// Returns the same point expressed in `reference`.
    #[must_use]
    pub fn expressed_in(&self, reference: &Frame<S>) -> Self {
        Self {
            coordinates: self.transform_to(reference),
            reference: reference.clone(),
            tolerance: self.tolerance,
        }
    }

    /// Returns the direction from this point to `other`, in this point's frame.
    ///
    /// Adding the result to `self.coordinates` yields `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tree::{Frame2d, Rotation2d};
    /// use frame_values::Position2d;
    /// use nalgebra::Vector2;
    ///
    /// let root = Frame2d::root();
    /// let shifted = Frame2d::new(Vector2::new(1.0, 0.0), Rotation2d::identity());
    /// let a = Position2d::new(Vector2::new(1.0, 1.0), &root);
    /// let b = Position2d::new(Vector2::new(1.0, 1.0), &shifted);
    ///
    /// let d = a.direction_to(&b);
    /// assert_eq!(d.reference, root);
    /// assert!((d.vector - Vector2::new(1.0, 0.0)).norm() < 1e-12);
    /// ```
    #[must_use]
    pub fn direction_to(&self, other: &Self) -> Direction<S> {
        let target = other.transform_to(&self.reference);
        trace!(depth = self.reference.depth(), "direction between positions");
        Direction::new(target - self.coordinates, &self.reference).with_tolerance(self.tolerance)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.direction_to(other).length()
    }

    /// Returns this point displaced by `direction`, in this point's frame.
    #[must_use]
    pub fn moved_by(&self, direction: &Direction<S>) -> Self {
        Self {
            coordinates: self.coordinates + direction.transform_to(&self.reference),
            reference: self.reference.clone(),
            tolerance: self.tolerance,
        }
    }

    /// Returns true if `other` describes the same point within this tolerance.
    #[must_use]
    pub fn is_close(&self, other: &Self) -> bool {
        self.tolerance
            .is_close(&self.coordinates, &other.transform_to(&self.reference))
    }
}

impl<S: Space> PartialEq for Position<S> {
    fn eq(&self, other: &Self) -> bool {
        self.is_close(other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use frame_tree::{
        DEFAULT_RELATIVE_TOLERANCE, Frame2d, Frame3d, FrameError, Rotation2d, Rotation3d,
    };
    use nalgebra::{Vector2, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn frame2d(x: f64, y: f64, angle: f64) -> Frame2d {
        Frame2d::new(Vector2::new(x, y), Rotation2d::new(angle))
    }

    fn frame3d(position: Vector3<f64>, rotvec: Vector3<f64>) -> Frame3d {
        Frame3d::new(position, Rotation3d::from_rotvec(rotvec))
    }

    #[test]
    fn constructor_assigns_fields() {
        let frame = frame2d(0.2, 0.4, 1.0);
        let position = Position2d::new(Vector2::new(0.5, 0.6), &frame);
        assert_eq!(position.coordinates, Vector2::new(0.5, 0.6));
        assert_eq!(position.reference, frame);
        assert_eq!(position.tolerance.relative, DEFAULT_RELATIVE_TOLERANCE);
    }

    #[test]
    fn constructor_rejects_wrong_shape() {
        let frame = frame2d(0.0, 0.0, 0.0);
        assert!(matches!(
            Position2d::from_slice(&[1.0, 2.0, 3.0], &frame),
            Err(FrameError::DimensionMismatch { expected: 2, actual: 3 })
        ));
        assert!(Position3d::from_slice(&[1.0, 2.0], &Frame3d::root()).is_err());
        assert!(Position3d::from_slice(&[1.0, 2.0, 3.0], &Frame3d::root()).is_ok());
    }

    #[test]
    fn tolerance_override() {
        let tol = Tolerance::default().with_relative(1e-3);
        let position = Position2d::new(Vector2::zeros(), &Frame2d::root()).with_tolerance(tol);
        assert_eq!(position.tolerance, tol);
    }

    #[test]
    fn transform_to_matches_frame() {
        let frame = frame2d(0.3, -0.2, 0.9);
        let foreign = frame2d(-1.0, 2.0, -2.2);
        let coords = Vector2::new(0.7, 0.1);
        let position = Position2d::new(coords, &frame);
        assert_eq!(position.transform_to(&foreign), frame.transform_to(&foreign, &coords));
    }

    #[test]
    fn equality_across_frames() {
        let a_frame = frame2d(0.3, -0.2, 0.9);
        let b_frame = frame2d(-1.0, 2.0, -2.2);
        let coords = Vector2::new(0.7, 0.1);
        let a = Position2d::new(coords, &a_frame);
        let b = Position2d::new(b_frame.transform_from(&a_frame, &coords), &b_frame);
        assert_eq!(a, b);
        assert_eq!(b, a);

        let c = Position2d::new(coords + Vector2::new(1e-3, 0.0), &a_frame);
        assert_ne!(a, c);
    }

    #[test]
    fn direction_static_2d() {
        let root = Frame2d::root();
        let shifted = frame2d(1.0, 0.0, 0.0);
        let a = Position2d::new(Vector2::new(1.0, 1.0), &root);
        let b = Position2d::new(Vector2::new(1.0, 1.0), &shifted);
        let d = a.direction_to(&b);
        assert_relative_eq!(d.vector, Vector2::new(1.0, 0.0), epsilon = 1e-12);
        assert_eq!(d.reference, root);

        let turned = frame2d(0.0, 0.0, FRAC_PI_2);
        let a = Position2d::new(Vector2::new(0.0, 1.0), &root);
        let b = Position2d::new(Vector2::new(1.0, 0.0), &turned);
        let d = a.direction_to(&b);
        assert_relative_eq!(d.vector, Vector2::zeros(), epsilon = 1e-12);
        assert_eq!(d.reference, root);
    }

    #[test]
    fn direction_static_3d() {
        let root = Frame3d::root();
        let shifted = frame3d(Vector3::new(1.0, 0.0, 0.0), Vector3::zeros());
        let a = Position3d::new(Vector3::new(1.0, 1.0, 0.0), &root);
        let b = Position3d::new(Vector3::new(1.0, 1.0, 0.0), &shifted);
        assert_relative_eq!(a.direction_to(&b).vector, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);

        let turned = frame3d(Vector3::zeros(), Vector3::new(0.0, 0.0, FRAC_PI_2));
        let a = Position3d::new(Vector3::new(0.0, 1.0, 0.0), &root);
        let b = Position3d::new(Vector3::new(1.0, 0.0, 0.0), &turned);
        assert_relative_eq!(a.direction_to(&b).vector, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn direction_leads_to_other_position() {
        let a = Position3d::new(
            Vector3::new(0.2, 0.5, 0.9),
            &frame3d(Vector3::new(0.1, 0.8, 0.3), Vector3::new(0.4, 0.2, 0.6)),
        );
        let b = Position3d::new(
            Vector3::new(0.6, 0.3, 0.1),
            &frame3d(Vector3::new(0.9, 0.5, 0.7), Vector3::new(0.3, 0.9, 0.1)),
        );
        let d = a.direction_to(&b);
        let control = Position3d::new(a.coordinates + d.vector, &a.reference);
        assert_eq!(b, control);
        assert_eq!(a.moved_by(&d), b);
    }

    #[test]
    fn distance_is_frame_independent() {
        let a = Position2d::new(Vector2::new(3.0, 0.0), &frame2d(5.0, -1.0, 0.7));
        let b = Position2d::new(Vector2::new(0.0, 4.0), &frame2d(5.0, -1.0, 0.7));
        assert_relative_eq!(a.distance_to(&b), 5.0, epsilon = 1e-12);
        let b_elsewhere = b.expressed_in(&frame2d(-3.0, 8.0, -1.1));
        assert_relative_eq!(a.distance_to(&b_elsewhere), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn expressed_in_keeps_the_point() {
        let a = Position2d::new(Vector2::new(1.0, 2.0), &frame2d(1.0, 1.0, 0.3));
        let target = frame2d(-2.0, 0.5, 2.0);
        let moved = a.expressed_in(&target);
        assert_eq!(moved.reference, target);
        assert_eq!(moved, a);
    }
}
