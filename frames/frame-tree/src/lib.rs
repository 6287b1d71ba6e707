//! Nested coordinate frames for CortenForge.
//!
//! This crate describes points and directions in local coordinate systems
//! ("frames") arranged in a tree under one global root, and re-expresses
//! coordinates from any frame in any other frame of the same tree:
//!
//! - [`Frame`] - A node holding a position and rotation relative to its parent
//! - [`Rotation2d`] / [`Rotation3d`] - Orientations behind the [`Rotation`] trait
//! - [`TransformPath`] - The chain of parent edges connecting two frames
//! - [`Tolerance`] - Closeness configuration shared by frame-bound values
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - Robot description and calibration tools
//! - Simulation and animation scripts
//! - Servers and CLI tools
//!
//! # Spaces
//!
//! Every type is generic over a [`Space`]: [`Planar`] for 2D and [`Spatial`]
//! for 3D. Each space has one process-wide root frame with the identity pose,
//! and every frame created without an explicit parent hangs off it.
//!
//! # Transforms
//!
//! A frame's pose maps its local coordinates into its parent:
//! `p_parent = R * p_local + t`. Transforming between two arbitrary frames
//! walks the parent links between them and folds the vector through each
//! edge in turn.
//!
//! # Example
//!
//! ```
//! use frame_tree::{Frame2d, Rotation2d};
//! use nalgebra::Vector2;
//! use std::f64::consts::{FRAC_PI_4, PI};
//!
//! let sun = Frame2d::root();
//! let planet = Frame2d::new(Vector2::new(10.0, 0.0), Rotation2d::identity());
//! let moon = Frame2d::with_parent(Vector2::new(0.0, 1.0), Rotation2d::identity(), &planet);
//!
//! let seen = moon.transform_to(&sun, &Vector2::zeros());
//! assert!((seen - Vector2::new(10.0, 1.0)).norm() < 1e-12);
//!
//! // Move the planet along its orbit and the moon around the planet.
//! planet
//!     .set_position(Vector2::new(10.0 * FRAC_PI_4.cos(), 10.0 * FRAC_PI_4.sin()))
//!     .unwrap();
//! moon.set_position(Vector2::new(PI.cos(), PI.sin())).unwrap();
//!
//! let seen = sun.transform_from(&moon, &Vector2::zeros());
//! assert!((seen - Vector2::new(10.0 * FRAC_PI_4.cos() - 1.0, 10.0 * FRAC_PI_4.sin())).norm() < 1e-12);
//! ```
//!
//! # Quality Standards
//!
//! This crate maintains A-grade standards:
//! - ≥90% test coverage
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod frame;
mod path;
mod rotation;
mod space;
mod tolerance;

// Re-export core types
pub use error::{FrameError, FrameResult};
pub use frame::{Ancestors, Frame, Frame2d, Frame3d, FramePose, Pose};
pub use path::{EdgeDirection, PathStep, TransformPath};
pub use rotation::{Rotation, Rotation2d, Rotation3d};
pub use space::{Planar, Space, Spatial};
pub use tolerance::{DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE, Tolerance};

// Re-export nalgebra types for convenience
pub use nalgebra::{Vector2, Vector3};

/// Returns the root of all planar frames.
#[must_use]
pub fn origin2d() -> Frame2d {
    Frame2d::root()
}

/// Returns the root of all spatial frames.
#[must_use]
pub fn origin3d() -> Frame3d {
    Frame3d::root()
}
