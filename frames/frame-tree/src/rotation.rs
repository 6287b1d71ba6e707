//! Orientations of a frame relative to its parent.
//!
//! [`Rotation2d`] stores a planar angle together with its cached 2x2 matrix,
//! [`Rotation3d`] wraps a unit quaternion and is treated as immutable: build
//! a new one instead of mutating it.

use std::fmt;

use nalgebra::{
    Matrix2, Matrix3, Quaternion, Rotation2, Rotation3, Unit, UnitQuaternion, Vector2, Vector3,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Deviation from orthonormality accepted by [`Rotation3d::from_matrix`].
const ORTHONORMAL_TOLERANCE: f64 = 1e-9;

/// Common contract of planar and spatial rotations.
///
/// Neither application method mutates its argument.
pub trait Rotation: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Vector type the rotation acts on.
    type Vector;
    /// Square matrix representation.
    type Matrix;

    /// The rotation that leaves every vector unchanged.
    fn identity() -> Self;

    /// Returns `matrix * vector`.
    fn apply(&self, vector: &Self::Vector) -> Self::Vector;

    /// Returns `matrix^T * vector`, undoing [`Rotation::apply`].
    fn apply_inverse(&self, vector: &Self::Vector) -> Self::Vector;

    /// Returns the rotation matrix.
    fn as_matrix(&self) -> Self::Matrix;

    /// Returns the opposite rotation.
    #[must_use]
    fn inverse(&self) -> Self;
}

/// A rotation in the plane, counter-clockwise by an angle in radians.
///
/// # Example
///
/// ```
/// use frame_tree::{Rotation, Rotation2d};
/// use nalgebra::Vector2;
///
/// let mut rot = Rotation2d::from_degrees(90.0);
/// let v = rot.apply(&Vector2::new(1.0, 0.0));
/// assert!((v - Vector2::new(0.0, 1.0)).norm() < 1e-12);
///
/// rot.update(0.0);
/// assert_eq!(rot.apply(&Vector2::new(1.0, 0.0)), Vector2::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Rotation2d {
    angle: f64,
    matrix: Matrix2<f64>,
}

impl Rotation2d {
    /// The zero-angle rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(0.0)
    }

    /// Creates a rotation from an angle in radians.
    #[must_use]
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            matrix: Rotation2::new(angle).into_inner(),
        }
    }

    /// Creates a rotation from an angle in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Returns the angle in radians.
    #[must_use]
    pub const fn as_rad(&self) -> f64 {
        self.angle
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn as_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Replaces the angle and recomputes the matrix.
    pub fn update(&mut self, angle: f64) {
        *self = Self::new(angle);
    }
}

impl Default for Rotation2d {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<f64> for Rotation2d {
    fn from(angle: f64) -> Self {
        Self::new(angle)
    }
}

impl From<Rotation2d> for f64 {
    fn from(rotation: Rotation2d) -> Self {
        rotation.angle
    }
}

impl Rotation for Rotation2d {
    type Vector = Vector2<f64>;
    type Matrix = Matrix2<f64>;

    fn identity() -> Self {
        Rotation2d::identity()
    }

    fn apply(&self, vector: &Vector2<f64>) -> Vector2<f64> {
        self.matrix * vector
    }

    fn apply_inverse(&self, vector: &Vector2<f64>) -> Vector2<f64> {
        self.matrix.tr_mul(vector)
    }

    fn as_matrix(&self) -> Matrix2<f64> {
        self.matrix
    }

    fn inverse(&self) -> Self {
        Self::new(-self.angle)
    }
}

/// A rotation in space, stored as a unit quaternion.
///
/// # Example
///
/// ```
/// use frame_tree::{Rotation, Rotation3d};
/// use nalgebra::Vector3;
/// use std::f64::consts::FRAC_PI_2;
///
/// // Quarter turn about +Z
/// let rot = Rotation3d::from_rotvec(Vector3::new(0.0, 0.0, FRAC_PI_2));
/// let v = rot.apply(&Vector3::x());
/// assert!((v - Vector3::y()).norm() < 1e-12);
/// assert!((rot.apply_inverse(&v) - Vector3::x()).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation3d {
    rotation: UnitQuaternion<f64>,
}

impl Rotation3d {
    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Creates a rotation from a rotation vector (unit axis scaled by the angle in radians).
    #[must_use]
    pub fn from_rotvec(rotvec: Vector3<f64>) -> Self {
        Self {
            rotation: UnitQuaternion::from_scaled_axis(rotvec),
        }
    }

    /// Creates a rotation of `angle` radians about `axis`.
    #[must_use]
    pub fn from_axis_angle(axis: &Unit<Vector3<f64>>, angle: f64) -> Self {
        Self {
            rotation: UnitQuaternion::from_axis_angle(axis, angle),
        }
    }

    /// Creates a rotation from roll, pitch and yaw in radians.
    #[must_use]
    pub fn from_euler_angles(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            rotation: UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        }
    }

    /// Wraps an existing unit quaternion.
    #[must_use]
    pub const fn from_unit_quaternion(rotation: UnitQuaternion<f64>) -> Self {
        Self { rotation }
    }

    /// Creates a rotation from a quaternion `[w, x, y, z]`, normalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidRotation`] if the quaternion has (near) zero
    /// norm or non-finite components.
    pub fn from_quaternion(wxyz: [f64; 4]) -> FrameResult<Self> {
        let [w, x, y, z] = wxyz;
        if wxyz.iter().any(|c| !c.is_finite()) {
            return Err(FrameError::invalid_rotation(format!(
                "non-finite quaternion {wxyz:?}"
            )));
        }
        UnitQuaternion::try_new(Quaternion::new(w, x, y, z), 1e-12)
            .map(|rotation| Self { rotation })
            .ok_or_else(|| FrameError::invalid_rotation("quaternion has zero norm"))
    }

    /// Creates a rotation from a 3x3 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidRotation`] if the matrix is not orthonormal
    /// or is a reflection (determinant -1).
    pub fn from_matrix(matrix: &Matrix3<f64>) -> FrameResult<Self> {
        let drift = (matrix.tr_mul(matrix) - Matrix3::identity()).norm();
        if !drift.is_finite() || drift > ORTHONORMAL_TOLERANCE {
            return Err(FrameError::invalid_rotation(format!(
                "matrix is not orthonormal (deviation {drift:e})"
            )));
        }
        if matrix.determinant() < 0.0 {
            return Err(FrameError::invalid_rotation("matrix is a reflection"));
        }
        let rotation = Rotation3::from_matrix_unchecked(*matrix);
        Ok(Self {
            rotation: UnitQuaternion::from_rotation_matrix(&rotation),
        })
    }

    /// Returns the quaternion as `[w, x, y, z]`.
    #[must_use]
    pub fn as_quaternion(&self) -> [f64; 4] {
        let q = self.rotation.quaternion();
        [q.w, q.i, q.j, q.k]
    }

    /// Returns the rotation vector (axis scaled by angle).
    #[must_use]
    pub fn as_rotvec(&self) -> Vector3<f64> {
        self.rotation.scaled_axis()
    }

    /// Returns the underlying unit quaternion.
    #[must_use]
    pub const fn as_unit_quaternion(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }
}

impl Default for Rotation3d {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation for Rotation3d {
    type Vector = Vector3<f64>;
    type Matrix = Matrix3<f64>;

    fn identity() -> Self {
        Rotation3d::identity()
    }

    fn apply(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector
    }

    fn apply_inverse(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse_transform_vector(vector)
    }

    fn as_matrix(&self) -> Matrix3<f64> {
        self.rotation.to_rotation_matrix().into_inner()
    }

    fn inverse(&self) -> Self {
        Self {
            rotation: self.rotation.inverse(),
        }
    }
}
