//! Dock candidates built from filtered segments.

use crate::core::types::{Point2D, PointCloud2D, Stamped, StampedCloud, StampedPose};
use crate::segmentation::Segment;

/// Upper bound (exclusive) on how far a candidate may sit from the initial
/// estimate, in meters.
const MAX_DISTANCE_FROM_ESTIMATE: f32 = 1.0;

/// Lower width bound as a fraction of the template width.
const MIN_WIDTH_RATIO: f32 = 0.5;

/// Upper width bound as a fraction of the template width.
const MAX_WIDTH_RATIO: f32 = 1.25;

/// One dock candidate for a single scan.
///
/// Created from a [`Segment`], refined in place by
/// [`PoseRefiner`](super::PoseRefiner) and dropped once a pose has been
/// selected. The raw cloud is never modified; staging produces new clouds.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Raw points in the scan frame
    pub cloud: StampedCloud,
    /// Aligned template after a successful registration, empty before
    pub matched_cloud: PointCloud2D,
    /// Registration fitness, lower is better
    pub icp_score: Option<f32>,
    /// Distance between the candidate and the initial estimate (meters)
    ///
    /// `None` until measured; an unmeasured cluster never passes [`Cluster::valid`].
    pub distance_from_initial_pose: Option<f32>,
    /// Refined dock pose in the initial estimate's frame
    pub icp_pose: Option<StampedPose>,
}

impl Cluster {
    /// Wrap a raw cloud with every registration field unset.
    pub fn new(cloud: StampedCloud) -> Self {
        Self {
            cloud,
            matched_cloud: PointCloud2D::new(),
            icp_score: None,
            distance_from_initial_pose: None,
            icp_pose: None,
        }
    }

    /// Mean of the raw points (origin for an empty cloud).
    pub fn centroid(&self) -> Point2D {
        self.cloud.data.centroid().unwrap_or_default()
    }

    /// First-to-last point distance of the raw cloud.
    pub fn width(&self) -> f32 {
        self.cloud.data.width()
    }

    /// Whether this candidate is worth aligning against a template of width
    /// `ideal_size`.
    ///
    /// The width must lie in `[ideal_size / 2, 1.25 * ideal_size]` and the
    /// candidate must be closer than 1 m to the initial estimate.
    pub fn valid(&self, ideal_size: f32) -> bool {
        let width = self.width();
        let width_ok =
            width >= ideal_size * MIN_WIDTH_RATIO && width <= ideal_size * MAX_WIDTH_RATIO;
        let distance_ok = self
            .distance_from_initial_pose
            .is_some_and(|d| d < MAX_DISTANCE_FROM_ESTIMATE);
        width_ok && distance_ok
    }

    /// Whether registration produced a pose and score for this candidate.
    pub fn is_refined(&self) -> bool {
        self.icp_score.is_some() && self.icp_pose.is_some()
    }
}

/// One cluster per segment, in segment order, tagged with the scan frame.
pub fn segments_to_clusters(frame_id: &str, segments: &[Segment], timestamp_us: u64) -> Vec<Cluster> {
    segments
        .iter()
        .map(|segment| Cluster::new(Stamped::new(segment.to_cloud(), frame_id, timestamp_us)))
        .collect()
}
