//! Transform paths between frames of one tree.
//!
//! [`Frame::find_transform_path`] walks parent links to connect two frames,
//! and [`Frame::transform_via_path`] folds a vector through the resulting
//! steps. Paths are recomputed on every query; nothing is cached.
//!
//! # Path shape
//!
//! The search tries three cases in order:
//!
//! 1. The destination is `self` or one of its ancestors: only
//!    [`EdgeDirection::TowardParent`] steps.
//! 2. `self` is an ancestor of the destination: only
//!    [`EdgeDirection::TowardChild`] steps.
//! 3. Otherwise the path runs from `self` all the way up to the root and
//!    back down to the destination. Ancestors shared above the nearest
//!    common one are walked up and down again; the result is still exact,
//!    only longer than necessary.

use std::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::frame::Frame;
use crate::space::Space;

/// Which way a path step crosses the edge between a frame and its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeDirection {
    /// Leave the step's frame for its parent ([`Frame::transform_to_parent`]).
    TowardParent,
    /// Enter the step's frame from its parent ([`Frame::transform_from_parent`]).
    TowardChild,
}

/// One edge crossing of a [`TransformPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep<S: Space> {
    /// Frame whose parent edge is crossed.
    pub frame: Frame<S>,
    /// Direction of the crossing.
    pub direction: EdgeDirection,
}

impl<S: Space> PathStep<S> {
    /// Creates a new step.
    #[must_use]
    pub const fn new(frame: Frame<S>, direction: EdgeDirection) -> Self {
        Self { frame, direction }
    }

    /// Applies this step to a point.
    #[must_use]
    pub fn transform(&self, vector: &S::Vector) -> S::Vector {
        match self.direction {
            EdgeDirection::TowardParent => self.frame.transform_to_parent(vector),
            EdgeDirection::TowardChild => self.frame.transform_from_parent(vector),
        }
    }

    /// Applies only the rotation of this step, for translation-free vectors.
    #[must_use]
    pub fn rotate(&self, vector: &S::Vector) -> S::Vector {
        match self.direction {
            EdgeDirection::TowardParent => self.frame.rotate_to_parent(vector),
            EdgeDirection::TowardChild => self.frame.rotate_from_parent(vector),
        }
    }
}

/// Ordered edge crossings leading from one frame's coordinates to another's.
///
/// An empty path is the identity.
///
/// # Example
///
/// ```
/// use frame_tree::{EdgeDirection, Frame2d, Rotation2d};
/// use nalgebra::Vector2;
///
/// let f1 = Frame2d::new(Vector2::new(1.0, 0.0), Rotation2d::identity());
/// let f2 = Frame2d::with_parent(Vector2::new(0.0, 1.0), Rotation2d::identity(), &f1);
/// let f3 = Frame2d::with_parent(Vector2::new(1.0, 1.0), Rotation2d::identity(), &f2);
///
/// let path = f3.find_transform_path(&f1);
/// let steps: Vec<_> = path.iter().map(|s| (s.frame.clone(), s.direction)).collect();
/// assert_eq!(
///     steps,
///     vec![(f3, EdgeDirection::TowardParent), (f2, EdgeDirection::TowardParent)]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformPath<S: Space> {
    steps: Vec<PathStep<S>>,
}

impl<S: Space> Default for TransformPath<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Space> TransformPath<S> {
    /// Creates an empty (identity) path.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates a path from explicit steps.
    #[must_use]
    pub const fn from_steps(steps: Vec<PathStep<S>>) -> Self {
        Self { steps }
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the path is the identity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the steps in application order.
    #[must_use]
    pub fn steps(&self) -> &[PathStep<S>] {
        &self.steps
    }

    /// Iterates over the steps in application order.
    pub fn iter(&self) -> slice::Iter<'_, PathStep<S>> {
        self.steps.iter()
    }

    /// Consumes the path, returning its steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<PathStep<S>> {
        self.steps
    }
}

impl<'a, S: Space> IntoIterator for &'a TransformPath<S> {
    type Item = &'a PathStep<S>;
    type IntoIter = slice::Iter<'a, PathStep<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<S: Space> Frame<S> {
    /// Finds the steps that re-express coordinates of `self` in `destination`.
    ///
    /// Returns an empty path when `destination == self`. If neither frame is
    /// an ancestor of the other, the path climbs from `self` to the root and
    /// descends to `destination`, without shortcutting at their nearest
    /// common ancestor.
    #[must_use]
    pub fn find_transform_path(&self, destination: &Self) -> TransformPath<S> {
        let mut upward = Vec::with_capacity(self.depth());
        for frame in self.ancestors() {
            if frame == destination {
                debug!(steps = upward.len(), "destination is an ancestor");
                return TransformPath::from_steps(upward);
            }
            if frame.is_root() {
                break;
            }
            upward.push(PathStep::new(frame.clone(), EdgeDirection::TowardParent));
        }

        let mut downward = Vec::with_capacity(destination.depth());
        for frame in destination.ancestors() {
            if frame == self {
                downward.reverse();
                debug!(steps = downward.len(), "source is an ancestor");
                return TransformPath::from_steps(downward);
            }
            if frame.is_root() {
                break;
            }
            downward.push(PathStep::new(frame.clone(), EdgeDirection::TowardChild));
        }

        downward.reverse();
        upward.append(&mut downward);
        debug!(steps = upward.len(), "joined through the root");
        TransformPath::from_steps(upward)
    }

    /// Folds a point through every step of `path`.
    ///
    /// The input is never modified; an empty path returns a copy of it.
    #[must_use]
    pub fn transform_via_path(vector: &S::Vector, path: &TransformPath<S>) -> S::Vector {
        path.iter().fold(*vector, |current, step| {
            trace!(direction = ?step.direction, depth = step.frame.depth(), "folding step");
            step.transform(&current)
        })
    }

    /// Folds a direction through the rotations of `path`, ignoring translations.
    #[must_use]
    pub fn rotate_via_path(vector: &S::Vector, path: &TransformPath<S>) -> S::Vector {
        path.iter().fold(*vector, |current, step| step.rotate(&current))
    }

    /// Re-expresses a point given in `self` in `destination`.
    #[must_use]
    pub fn transform_to(&self, destination: &Self, vector: &S::Vector) -> S::Vector {
        Self::transform_via_path(vector, &self.find_transform_path(destination))
    }

    /// Re-expresses a point given in `source` in `self`.
    ///
    /// Agrees with `source.transform_to(self, vector)`.
    #[must_use]
    pub fn transform_from(&self, source: &Self, vector: &S::Vector) -> S::Vector {
        Self::transform_via_path(vector, &source.find_transform_path(self))
    }

    /// Re-expresses a direction given in `self` in `destination`.
    #[must_use]
    pub fn rotate_to(&self, destination: &Self, vector: &S::Vector) -> S::Vector {
        Self::rotate_via_path(vector, &self.find_transform_path(destination))
    }

    /// Re-expresses a direction given in `source` in `self`.
    #[must_use]
    pub fn rotate_from(&self, source: &Self, vector: &S::Vector) -> S::Vector {
        Self::rotate_via_path(vector, &source.find_transform_path(self))
    }

    /// Returns the nearest frame that is an ancestor of both `self` and `other`.
    ///
    /// A frame counts as its own ancestor, so the result may be `self` or
    /// `other`. Frames of one space always share at least the root.
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tree::{Frame2d, Rotation2d};
    /// use nalgebra::Vector2;
    ///
    /// let base = Frame2d::new(Vector2::zeros(), Rotation2d::identity());
    /// let left = Frame2d::with_parent(Vector2::new(-1.0, 0.0), Rotation2d::identity(), &base);
    /// let right = Frame2d::with_parent(Vector2::new(1.0, 0.0), Rotation2d::identity(), &base);
    ///
    /// assert_eq!(left.find_common_parent(&right), base);
    /// assert_eq!(left.find_common_parent(&base), base);
    /// ```
    #[must_use]
    pub fn find_common_parent(&self, other: &Self) -> Self {
        let mine = self.ancestors().skip(self.depth().saturating_sub(other.depth()));
        let theirs = other.ancestors().skip(other.depth().saturating_sub(self.depth()));
        mine.zip(theirs)
            .find(|(a, b)| a == b)
            .map_or_else(Self::root, |(common, _)| common.clone())
    }
}
