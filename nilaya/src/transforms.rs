//! Coordinate frame lookup.
//!
//! The detection pass needs the rigid transform that takes scan-frame points
//! into the frame of the initial dock estimate (typically `map`). Where that
//! transform comes from is up to the host; [`StaticTransformTree`] covers
//! fixed sensor mounts and tests.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::core::types::Pose2D;

/// Failure to resolve a transform between two frames.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// No chain of transforms connects the two frames
    #[error("Could not transform {source_frame} to {target_frame}: {reason}")]
    Unavailable {
        /// Frame the data is in
        source_frame: String,
        /// Frame the data should end up in
        target_frame: String,
        /// Why the lookup failed
        reason: String,
    },
}

impl TransformError {
    /// Create an `Unavailable` error.
    pub fn unavailable(target_frame: &str, source_frame: &str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            source_frame: source_frame.to_string(),
            target_frame: target_frame.to_string(),
            reason: reason.into(),
        }
    }
}

/// Source of rigid transforms between named frames.
///
/// Implementations must fail rather than block indefinitely.
pub trait TransformLookup: Send + Sync {
    /// Transform mapping points expressed in `source_frame` into `target_frame`
    /// at `timestamp_us` (0 = latest available).
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        timestamp_us: u64,
    ) -> Result<Pose2D, TransformError>;
}

/// Tree of time-invariant transforms.
///
/// Each edge stores the pose of a child frame in its parent frame. Lookups walk
/// both frames up to their common ancestor.
#[derive(Debug, Default)]
pub struct StaticTransformTree {
    /// child frame -> (parent frame, pose of child in parent)
    edges: RwLock<HashMap<String, (String, Pose2D)>>,
}

impl StaticTransformTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the pose of `child` in `parent`.
    pub fn set_transform(&self, parent: &str, child: &str, child_in_parent: Pose2D) {
        self.edges
            .write()
            .insert(child.to_string(), (parent.to_string(), child_in_parent));
    }

    /// Remove the edge from `child` to its parent.
    pub fn remove(&self, child: &str) {
        self.edges.write().remove(child);
    }

    /// Chain from `frame` up to its root: (frame, pose of frame in root).
    fn chain_to_root(
        edges: &HashMap<String, (String, Pose2D)>,
        frame: &str,
    ) -> Vec<(String, Pose2D)> {
        let mut chain = vec![(frame.to_string(), Pose2D::identity())];
        let mut current = frame.to_string();
        let mut in_current = Pose2D::identity();
        // Bounded walk protects against accidental cycles.
        for _ in 0..edges.len() {
            let Some((parent, child_in_parent)) = edges.get(&current) else {
                break;
            };
            in_current = child_in_parent.compose(&in_current);
            current = parent.clone();
            chain.push((current.clone(), in_current));
        }
        chain
    }
}

impl TransformLookup for StaticTransformTree {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        _timestamp_us: u64,
    ) -> Result<Pose2D, TransformError> {
        if target_frame.is_empty() || source_frame.is_empty() {
            return Err(TransformError::unavailable(
                target_frame,
                source_frame,
                "empty frame id",
            ));
        }
        if target_frame == source_frame {
            return Ok(Pose2D::identity());
        }

        let edges = self.edges.read();
        let source_chain = Self::chain_to_root(&edges, source_frame);
        let target_chain = Self::chain_to_root(&edges, target_frame);

        // First ancestor of the source that is also an ancestor of the target.
        for (ancestor, source_in_ancestor) in &source_chain {
            if let Some((_, target_in_ancestor)) =
                target_chain.iter().find(|(frame, _)| frame == ancestor)
            {
                return Ok(target_in_ancestor.inverse().compose(source_in_ancestor));
            }
        }

        Err(TransformError::unavailable(
            target_frame,
            source_frame,
            "frames are not connected",
        ))
    }
}
