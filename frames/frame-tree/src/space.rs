//! Dimensionality markers for frame trees.
//!
//! A [`Space`] ties together the vector type, the rotation type and the
//! process-wide root frame of one dimensionality. Frames, paths and all
//! frame-bound values are generic over it, so 2D and 3D trees share one
//! implementation and can never be mixed.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};
use std::sync::OnceLock;

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;
use crate::rotation::{Rotation, Rotation2d, Rotation3d};

/// Root of every planar frame tree, created on first access.
static PLANAR_ROOT: OnceLock<Frame<Planar>> = OnceLock::new();

/// Root of every spatial frame tree, created on first access.
static SPATIAL_ROOT: OnceLock<Frame<Spatial>> = OnceLock::new();

/// A coordinate space of fixed dimensionality.
///
/// Implemented by the zero-sized markers [`Planar`] and [`Spatial`].
pub trait Space: Copy + fmt::Debug + PartialEq + Eq + Default + Send + Sync + 'static {
    /// Number of coordinate components.
    const DIM: usize;

    /// Short name used in diagnostics (`"2d"`, `"3d"`).
    const NAME: &'static str;

    /// Coordinate vector type.
    type Vector: Copy
        + fmt::Debug
        + PartialEq
        + Send
        + Sync
        + 'static
        + Add<Output = Self::Vector>
        + Sub<Output = Self::Vector>
        + Neg<Output = Self::Vector>
        + Mul<f64, Output = Self::Vector>
        + AddAssign
        + MulAssign<f64>
        + AbsDiffEq<Epsilon = f64>
        + RelativeEq;

    /// Rotation matrix type.
    type Matrix: Copy + fmt::Debug + PartialEq;

    /// Orientation type of frames in this space.
    type Rotation: Rotation<Vector = Self::Vector, Matrix = Self::Matrix>;

    /// The shared root frame of this space.
    fn root() -> &'static Frame<Self>;

    /// The zero vector.
    fn zero() -> Self::Vector;

    /// Builds a vector from a runtime-sized slice.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::DimensionMismatch`] if `components.len() != DIM`.
    fn vector_from_slice(components: &[f64]) -> FrameResult<Self::Vector>;

    /// Euclidean norm of a vector.
    fn norm(vector: &Self::Vector) -> f64;
}

/// Two-dimensional space: [`Vector2`] coordinates, [`Rotation2d`] orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Planar;

/// Three-dimensional space: [`Vector3`] coordinates, [`Rotation3d`] orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Spatial;

impl Space for Planar {
    const DIM: usize = 2;
    const NAME: &'static str = "2d";

    type Vector = Vector2<f64>;
    type Matrix = Matrix2<f64>;
    type Rotation = Rotation2d;

    fn root() -> &'static Frame<Self> {
        PLANAR_ROOT.get_or_init(Frame::new_root)
    }

    fn zero() -> Vector2<f64> {
        Vector2::zeros()
    }

    fn vector_from_slice(components: &[f64]) -> FrameResult<Vector2<f64>> {
        match components {
            [x, y] => Ok(Vector2::new(*x, *y)),
            _ => Err(FrameError::dimension_mismatch(Self::DIM, components.len())),
        }
    }

    fn norm(vector: &Vector2<f64>) -> f64 {
        vector.norm()
    }
}

impl Space for Spatial {
    const DIM: usize = 3;
    const NAME: &'static str = "3d";

    type Vector = Vector3<f64>;
    type Matrix = Matrix3<f64>;
    type Rotation = Rotation3d;

    fn root() -> &'static Frame<Self> {
        SPATIAL_ROOT.get_or_init(Frame::new_root)
    }

    fn zero() -> Vector3<f64> {
        Vector3::zeros()
    }

    fn vector_from_slice(components: &[f64]) -> FrameResult<Vector3<f64>> {
        match components {
            [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
            _ => Err(FrameError::dimension_mismatch(Self::DIM, components.len())),
        }
    }

    fn norm(vector: &Vector3<f64>) -> f64 {
        vector.norm()
    }
}
