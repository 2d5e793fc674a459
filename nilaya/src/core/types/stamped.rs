//! Frame and timestamp wrapper.

use serde::{Deserialize, Serialize};

use super::cloud::PointCloud2D;
use super::pose::Pose2D;

/// Data tagged with the coordinate frame it is expressed in and a timestamp.
///
/// Timestamps are in microseconds since epoch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stamped<T> {
    /// The wrapped data
    pub data: T,
    /// Coordinate frame of `data`
    pub frame_id: String,
    /// Timestamp in microseconds since epoch
    pub timestamp_us: u64,
}

/// Pose with frame and stamp.
pub type StampedPose = Stamped<Pose2D>;

/// Point cloud with frame and stamp.
pub type StampedCloud = Stamped<PointCloud2D>;

impl<T> Stamped<T> {
    /// Create a new stamped value.
    #[inline]
    pub fn new(data: T, frame_id: impl Into<String>, timestamp_us: u64) -> Self {
        Self {
            data,
            frame_id: frame_id.into(),
            timestamp_us,
        }
    }

    /// Map the inner data while preserving frame and timestamp.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Stamped<U> {
        Stamped {
            data: f(self.data),
            frame_id: self.frame_id,
            timestamp_us: self.timestamp_us,
        }
    }
}
