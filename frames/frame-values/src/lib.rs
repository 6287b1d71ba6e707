//! Frame-bound values for CortenForge frame trees.
//!
//! Wraps raw coordinates together with the [`frame_tree::Frame`] they are
//! expressed in, so they can be compared and combined across frames:
//!
//! - [`Position`] - A point; frame changes apply rotation and translation
//! - [`Direction`] - A displacement; frame changes apply rotation only
//! - [`Vector`] - Anchored coordinates that add through a common parent frame
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It only builds
//! on `frame-tree`; coordinates are the nalgebra vectors `frame-tree` uses.
//!
//! # Equality
//!
//! [`Position`] and [`Direction`] implement [`PartialEq`] as approximate
//! equality: the right operand is expressed in the left operand's frame and
//! compared with the left operand's [`frame_tree::Tolerance`]. The relation
//! is therefore not guaranteed to be symmetric when tolerances differ.
//!
//! # Example
//!
//! ```
//! use frame_tree::{Frame2d, Rotation2d};
//! use frame_values::{Position2d, Direction2d};
//! use nalgebra::Vector2;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let root = Frame2d::root();
//! let robot = Frame2d::new(Vector2::new(2.0, 0.0), Rotation2d::new(FRAC_PI_2));
//!
//! // One unit ahead of the robot is (2, 1) in the world.
//! let ahead = Position2d::new(Vector2::new(1.0, 0.0), &robot);
//! assert_eq!(ahead, Position2d::new(Vector2::new(2.0, 1.0), &root));
//!
//! // The robot's forward axis points along world +y.
//! let forward = Direction2d::new(Vector2::new(1.0, 0.0), &robot);
//! assert_eq!(forward, Direction2d::new(Vector2::new(0.0, 1.0), &root));
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

mod direction;
mod position;
mod vector;

pub use direction::{Direction, Direction2d, Direction3d};
pub use position::{Position, Position2d, Position3d};
pub use vector::{Vector, Vector2d, Vector3d};

// Re-export the frame types values are bound to
pub use frame_tree::{Frame, Frame2d, Frame3d, FrameError, FrameResult, Tolerance};
