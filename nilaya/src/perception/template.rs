//! Reference shape of the docking station.

use crate::core::types::{PointCloud2D, Pose2D};
use crate::error::{Error, Result};

/// Canonical dock point cloud in the dock's own frame.
///
/// Read-only once loaded. Its width (first-to-last point) is the yardstick
/// candidate clusters are compared against.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    cloud: PointCloud2D,
}

impl Template {
    /// Wrap a cloud; fails if it has no points.
    pub fn new(cloud: PointCloud2D) -> Result<Self> {
        if cloud.is_empty() {
            return Err(Error::EmptyTemplate);
        }
        Ok(Self { cloud })
    }

    /// Template points.
    pub fn cloud(&self) -> &PointCloud2D {
        &self.cloud
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    /// Always false; kept for API symmetry with clouds.
    pub fn is_empty(&self) -> bool {
        self.cloud.is_empty()
    }

    /// Distance between the first and last template point.
    pub fn width(&self) -> f32 {
        self.cloud.width()
    }

    /// Template moved to `pose` (dock frame → staging frame).
    pub fn staged_at(&self, pose: &Pose2D) -> PointCloud2D {
        self.cloud.transform(pose)
    }
}
