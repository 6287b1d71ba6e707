//! Frame nodes and their parent-relative transforms.
//!
//! A [`Frame`] is a shared handle to one node of a frame tree. Each node
//! stores its pose (position and rotation) relative to its parent and keeps
//! its parent alive. The parent is fixed when the frame is built, so every
//! chain of parents ends at the root of the frame's [`Space`].

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FrameError, FrameResult};
use crate::rotation::Rotation;
use crate::space::{Planar, Space, Spatial};

/// Position and rotation of a frame relative to its parent.
///
/// # Example
///
/// ```
/// use frame_tree::{Frame2d, Rotation2d};
/// use nalgebra::Vector2;
///
/// let frame = Frame2d::new(Vector2::new(1.0, 2.0), Rotation2d::new(0.5));
/// let pose = frame.pose();
/// assert_eq!(pose.position, Vector2::new(1.0, 2.0));
/// assert_eq!(pose.rotation.as_rad(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose<V, R> {
    /// Translation from the parent origin, in parent coordinates.
    pub position: V,
    /// Orientation relative to the parent.
    pub rotation: R,
}

impl<V, R> Pose<V, R> {
    /// Creates a new pose.
    #[must_use]
    pub const fn new(position: V, rotation: R) -> Self {
        Self { position, rotation }
    }
}

/// The pose type of frames in space `S`.
pub type FramePose<S> = Pose<<S as Space>::Vector, <S as Space>::Rotation>;

/// A planar frame.
pub type Frame2d = Frame<Planar>;

/// A spatial frame.
pub type Frame3d = Frame<Spatial>;

struct FrameNode<S: Space> {
    pose: RwLock<FramePose<S>>,
    parent: Option<Frame<S>>,
    depth: usize,
}

impl<S: Space> Drop for FrameNode<S> {
    // Releases ancestors one level at a time, never recursively.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(frame) = next {
            next = Arc::into_inner(frame.node).and_then(|mut node| node.parent.take());
        }
    }
}

/// A coordinate frame in a tree of frames.
///
/// Cloning a `Frame` clones the handle, not the node: both handles refer to
/// the same frame, and equality is identity of the node.
///
/// # Example
///
/// ```
/// use frame_tree::{Frame2d, Rotation2d};
/// use nalgebra::Vector2;
/// use std::f64::consts::FRAC_PI_2;
///
/// let body = Frame2d::new(Vector2::new(10.0, 0.0), Rotation2d::new(FRAC_PI_2));
/// let sensor = Frame2d::with_parent(Vector2::new(1.0, 0.0), Rotation2d::identity(), &body);
///
/// // The sensor origin, seen from the root.
/// let origin = sensor.transform_to(&Frame2d::root(), &Vector2::zeros());
/// assert!((origin - Vector2::new(10.0, 1.0)).norm() < 1e-12);
/// ```
pub struct Frame<S: Space> {
    node: Arc<FrameNode<S>>,
}

impl<S: Space> Frame<S> {
    /// Builds the root node. Only [`Space::root`] calls this.
    pub(crate) fn new_root() -> Self {
        debug!(space = S::NAME, "initialising root frame");
        Self {
            node: Arc::new(FrameNode {
                pose: RwLock::new(Pose::new(S::zero(), S::Rotation::identity())),
                parent: None,
                depth: 0,
            }),
        }
    }

    /// Creates a frame whose parent is the root of `S`.
    #[must_use]
    pub fn new(position: S::Vector, rotation: S::Rotation) -> Self {
        Self::with_parent(position, rotation, S::root())
    }

    /// Creates a frame attached to `parent`.
    #[must_use]
    pub fn with_parent(position: S::Vector, rotation: S::Rotation, parent: &Self) -> Self {
        let depth = parent.depth() + 1;
        debug!(space = S::NAME, depth, "created frame");
        Self {
            node: Arc::new(FrameNode {
                pose: RwLock::new(Pose::new(position, rotation)),
                parent: Some(parent.clone()),
                depth,
            }),
        }
    }

    /// Creates a frame from a runtime-sized position.
    ///
    /// The components are copied; `parent` defaults to the root of `S`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::DimensionMismatch`] if `position` does not have
    /// exactly `S::DIM` components.
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tree::{Frame2d, FrameError, Rotation2d};
    ///
    /// assert!(Frame2d::from_slice(&[1.0, 2.0], Rotation2d::identity(), None).is_ok());
    /// assert!(matches!(
    ///     Frame2d::from_slice(&[1.0, 2.0, 3.0], Rotation2d::identity(), None),
    ///     Err(FrameError::DimensionMismatch { expected: 2, actual: 3 })
    /// ));
    /// ```
    pub fn from_slice(
        position: &[f64],
        rotation: S::Rotation,
        parent: Option<&Self>,
    ) -> FrameResult<Self> {
        let position = S::vector_from_slice(position)?;
        Ok(Self::with_parent(
            position,
            rotation,
            parent.unwrap_or_else(|| S::root()),
        ))
    }

    /// Returns a handle to the root frame of `S`.
    #[must_use]
    pub fn root() -> Self {
        S::root().clone()
    }

    /// Returns true if this is the root frame.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Number of parent hops between this frame and the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.node.depth
    }

    /// Returns the parent frame, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.node.parent.as_ref()
    }

    /// Iterates from this frame up to and including the root.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'_, S> {
        Ancestors { next: Some(self) }
    }

    /// Returns the position relative to the parent.
    #[must_use]
    pub fn position(&self) -> S::Vector {
        self.read_pose().position
    }

    /// Returns the rotation relative to the parent.
    #[must_use]
    pub fn rotation(&self) -> S::Rotation {
        self.read_pose().rotation.clone()
    }

    /// Returns a snapshot of the pose relative to the parent.
    #[must_use]
    pub fn pose(&self) -> FramePose<S> {
        self.read_pose().clone()
    }

    /// Replaces the position relative to the parent.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::RootImmutable`] when called on the root.
    pub fn set_position(&self, position: S::Vector) -> FrameResult<()> {
        self.write_pose()?.position = position;
        Ok(())
    }

    /// Replaces the rotation relative to the parent.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::RootImmutable`] when called on the root.
    pub fn set_rotation(&self, rotation: S::Rotation) -> FrameResult<()> {
        self.write_pose()?.rotation = rotation;
        Ok(())
    }

    /// Replaces the whole pose relative to the parent.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::RootImmutable`] when called on the root.
    pub fn set_pose(&self, pose: FramePose<S>) -> FrameResult<()> {
        *self.write_pose()? = pose;
        Ok(())
    }

    /// Mutates the rotation in place, e.g. with [`Rotation2d::update`].
    ///
    /// The closure works on a copy taken before any lock is held, so it may
    /// read this frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::RootImmutable`] when called on the root.
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tree::{Frame2d, Rotation2d};
    /// use nalgebra::Vector2;
    ///
    /// let frame = Frame2d::new(Vector2::zeros(), Rotation2d::identity());
    /// frame.update_rotation(|r| r.update(1.5)).unwrap();
    /// assert_eq!(frame.rotation().as_rad(), 1.5);
    /// ```
    ///
    /// [`Rotation2d::update`]: crate::Rotation2d::update
    pub fn update_rotation<F>(&self, update: F) -> FrameResult<()>
    where
        F: FnOnce(&mut S::Rotation),
    {
        let mut rotation = self.rotation();
        update(&mut rotation);
        self.set_rotation(rotation)
    }

    /// Re-expresses a point given in this frame in parent coordinates.
    ///
    /// Computes `rotation * vector + position`.
    #[must_use]
    pub fn transform_to_parent(&self, vector: &S::Vector) -> S::Vector {
        let pose = self.read_pose();
        pose.rotation.apply(vector) + pose.position
    }

    /// Re-expresses a point given in parent coordinates in this frame.
    ///
    /// Computes `rotation^-1 * (vector - position)`.
    #[must_use]
    pub fn transform_from_parent(&self, vector: &S::Vector) -> S::Vector {
        let pose = self.read_pose();
        pose.rotation.apply_inverse(&(*vector - pose.position))
    }

    /// Re-expresses a direction given in this frame in parent coordinates.
    #[must_use]
    pub fn rotate_to_parent(&self, vector: &S::Vector) -> S::Vector {
        self.read_pose().rotation.apply(vector)
    }

    /// Re-expresses a direction given in parent coordinates in this frame.
    #[must_use]
    pub fn rotate_from_parent(&self, vector: &S::Vector) -> S::Vector {
        self.read_pose().rotation.apply_inverse(vector)
    }

    fn read_pose(&self) -> RwLockReadGuard<'_, FramePose<S>> {
        self.node.pose.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_pose(&self) -> FrameResult<RwLockWriteGuard<'_, FramePose<S>>> {
        if self.is_root() {
            warn!(space = S::NAME, "rejected mutation of the root frame");
            return Err(FrameError::RootImmutable);
        }
        Ok(self.node.pose.write().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<S: Space> Clone for Frame<S> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<S: Space> PartialEq for Frame<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<S: Space> Eq for Frame<S> {}

impl<S: Space> fmt::Debug for Frame<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pose = self.read_pose();
        f.debug_struct("Frame")
            .field("space", &S::NAME)
            .field("depth", &self.node.depth)
            .field("position", &pose.position)
            .field("rotation", &pose.rotation)
            .finish()
    }
}

/// Iterator over a frame and its ancestors, ending at the root.
///
/// Created by [`Frame::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a, S: Space> {
    next: Option<&'a Frame<S>>,
}

impl<'a, S: Space> Iterator for Ancestors<'a, S> {
    type Item = &'a Frame<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::rotation::{Rotation2d, Rotation3d};
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn frame_defaults_to_root_parent() {
        let frame = Frame2d::new(Vector2::new(1.0, 2.0), Rotation2d::new(0.3));
        assert_eq!(frame.parent(), Some(&Frame2d::root()));
        assert_eq!(frame.depth(), 1);
        assert!(!frame.is_root());
    }

    #[test]
    fn frame_constructor_assigns_pose() {
        let position = Vector2::new(0.25, 0.75);
        let frame = Frame2d::new(position, Rotation2d::new(0.5));
        assert_eq!(frame.position(), position);
        assert_eq!(frame.rotation().as_rad(), 0.5);
    }

    #[test]
    fn frame_from_slice_copies_position() {
        let mut coords = vec![1.0, 2.0, 3.0];
        let frame = Frame3d::from_slice(&coords, Rotation3d::identity(), None).unwrap();
        coords[0] = 100.0;
        assert_eq!(frame.position(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn frame_from_slice_rejects_wrong_dimension() {
        let err = Frame2d::from_slice(&[1.0, 2.0, 3.0], Rotation2d::identity(), None);
        assert_eq!(err, Err(FrameError::dimension_mismatch(2, 3)));
        let err = Frame3d::from_slice(&[1.0], Rotation3d::identity(), None);
        assert_eq!(err, Err(FrameError::dimension_mismatch(3, 1)));
    }

    #[test]
    fn frame_from_slice_with_parent() {
        let parent = Frame2d::new(Vector2::zeros(), Rotation2d::identity());
        let child = Frame2d::from_slice(&[1.0, 0.0], Rotation2d::identity(), Some(&parent)).unwrap();
        assert_eq!(child.parent(), Some(&parent));
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn frame_equality_is_identity() {
        let a = Frame2d::new(Vector2::new(1.0, 1.0), Rotation2d::identity());
        let b = Frame2d::new(Vector2::new(1.0, 1.0), Rotation2d::identity());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn transform_from_parent_static() {
        let frame = Frame2d::new(Vector2::new(5.0, 1.0), Rotation2d::new(FRAC_PI_4));
        let result = frame.transform_from_parent(&Vector2::new(1.0, 2.0));
        assert_relative_eq!(result, Vector2::new(-2.121_320_34, 3.535_533_91), epsilon = 1e-8);
    }

    #[test]
    fn transform_to_parent_static() {
        let frame = Frame2d::new(Vector2::new(3.0, 1.0), Rotation2d::new(-FRAC_PI_4));
        let result = frame.transform_to_parent(&Vector2::new(1.0, 2.0));
        assert_relative_eq!(result, Vector2::new(5.121_320_34, 1.707_106_78), epsilon = 1e-8);
    }

    #[test]
    fn parent_transforms_are_inverse() {
        let frame = Frame3d::new(
            Vector3::new(0.4, -1.2, 3.0),
            Rotation3d::from_rotvec(Vector3::new(0.3, 0.1, -0.8)),
        );
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(frame.transform_to_parent(&frame.transform_from_parent(&v)), v, epsilon = 1e-12);
        assert_relative_eq!(frame.transform_from_parent(&frame.transform_to_parent(&v)), v, epsilon = 1e-12);
    }

    #[test]
    fn rotate_ignores_translation() {
        let frame = Frame2d::new(Vector2::new(100.0, -50.0), Rotation2d::new(FRAC_PI_2));
        let v = frame.rotate_to_parent(&Vector2::new(1.0, 0.0));
        assert_relative_eq!(v, Vector2::new(0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(frame.rotate_from_parent(&v), Vector2::new(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn mutation_is_visible_through_every_handle() {
        let frame = Frame2d::new(Vector2::zeros(), Rotation2d::identity());
        let alias = frame.clone();
        frame.set_position(Vector2::new(10.0, 0.0)).unwrap();
        alias.update_rotation(|r| r.update(FRAC_PI_2)).unwrap();

        assert_eq!(alias.position(), Vector2::new(10.0, 0.0));
        assert_eq!(frame.rotation(), Rotation2d::new(FRAC_PI_2));
    }

    #[test]
    fn set_pose_replaces_both_parts() {
        let frame = Frame3d::new(Vector3::zeros(), Rotation3d::identity());
        let rotation = Rotation3d::from_euler_angles(0.1, 0.2, 0.3);
        frame.set_pose(Pose::new(Vector3::new(1.0, 2.0, 3.0), rotation)).unwrap();
        assert_eq!(frame.pose(), Pose::new(Vector3::new(1.0, 2.0, 3.0), rotation));

        frame.set_rotation(Rotation3d::identity()).unwrap();
        assert_eq!(frame.rotation(), Rotation3d::identity());
    }

    #[test]
    fn root_rejects_mutation() {
        let root = Frame2d::root();
        assert_eq!(root.set_position(Vector2::new(1.0, 0.0)), Err(FrameError::RootImmutable));
        assert_eq!(root.set_rotation(Rotation2d::new(1.0)), Err(FrameError::RootImmutable));
        assert_eq!(root.update_rotation(|r| r.update(1.0)), Err(FrameError::RootImmutable));
        assert_eq!(root.position(), Vector2::zeros());
        assert_eq!(root.rotation(), Rotation2d::identity());
    }

    #[test]
    fn ancestors_walk_to_root() {
        let f1 = Frame2d::new(Vector2::zeros(), Rotation2d::identity());
        let f2 = Frame2d::with_parent(Vector2::zeros(), Rotation2d::identity(), &f1);
        let chain: Vec<_> = f2.ancestors().cloned().collect();
        assert_eq!(chain, vec![f2.clone(), f1, Frame2d::root()]);
        assert_eq!(f2.depth(), 2);
    }

    #[test]
    fn child_keeps_parent_alive() {
        let child = {
            let parent = Frame2d::new(Vector2::new(2.0, 0.0), Rotation2d::identity());
            Frame2d::with_parent(Vector2::new(1.0, 0.0), Rotation2d::identity(), &parent)
        };
        let parent = child.parent().unwrap();
        assert_eq!(parent.position(), Vector2::new(2.0, 0.0));
    }

    #[test]
    fn debug_output_names_space() {
        let frame = Frame3d::new(Vector3::zeros(), Rotation3d::identity());
        let text = format!("{frame:?}");
        assert!(text.contains("3d"));
        assert!(text.contains("depth"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn pose_serialization() {
        let frame = Frame3d::new(
            Vector3::new(1.0, -2.0, 0.5),
            Rotation3d::from_rotvec(Vector3::new(0.1, 0.2, 0.3)),
        );
        let pose = frame.pose();
        let json = serde_json::to_string(&pose).unwrap();
        let parsed: FramePose<Spatial> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pose);
    }

    #[test]
    fn update_rotation_may_read_the_frame() {
        let frame = Frame2d::new(Vector2::zeros(), Rotation2d::new(0.4));
        frame
            .update_rotation(|r| *r = frame.rotation().inverse())
            .unwrap();
        assert_relative_eq!(frame.rotation().as_rad(), -0.4);
        assert_eq!(
            Frame2d::root().update_rotation(|r| r.update(1.0)),
            Err(FrameError::RootImmutable)
        );
        assert_eq!(Frame2d::root().rotation(), Rotation2d::identity());
    }

    #[test]
    fn deep_chain_drops_without_overflow() {
        let mut leaf = Frame2d::new(Vector2::new(1.0, 0.0), Rotation2d::identity());
        for _ in 0..100_000 {
            leaf = Frame2d::with_parent(Vector2::zeros(), Rotation2d::identity(), &leaf);
        }
        assert_eq!(leaf.depth(), 100_001);
        assert_eq!(
            leaf.transform_to(&Frame2d::root(), &Vector2::zeros()),
            Vector2::new(1.0, 0.0)
        );
        drop(leaf);
    }

    #[test]
    fn dropping_child_keeps_shared_ancestors() {
        let base = Frame2d::new(Vector2::new(3.0, 0.0), Rotation2d::identity());
        let mid = Frame2d::with_parent(Vector2::new(0.0, 2.0), Rotation2d::identity(), &base);
        let leaf = Frame2d::with_parent(Vector2::zeros(), Rotation2d::identity(), &mid);
        drop(leaf);
        assert_eq!(mid.parent(), Some(&base));
        assert_eq!(
            mid.transform_to(&Frame2d::root(), &Vector2::zeros()),
            Vector2::new(3.0, 2.0)
        );
    }
}
