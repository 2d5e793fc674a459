//! Segmentation configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Scan segmentation and segment filtering settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentationSection {
    /// Distance between consecutive points that starts a new segment (m)
    #[serde(default = "defaults::distance_threshold")]
    pub distance_threshold: f32,

    /// Minimum points in a segment
    #[serde(default = "defaults::min_points")]
    pub min_points: usize,

    /// Maximum points in a segment
    #[serde(default = "defaults::max_points")]
    pub max_points: usize,

    /// Minimum centroid distance from the sensor (m)
    #[serde(default = "defaults::min_distance")]
    pub min_distance: f32,

    /// Maximum centroid distance from the sensor (m)
    #[serde(default = "defaults::max_distance")]
    pub max_distance: f32,

    /// Minimum first-to-last point width (m)
    #[serde(default = "defaults::min_width")]
    pub min_width: f32,

    /// Maximum first-to-last point width (m)
    #[serde(default = "defaults::max_width")]
    pub max_width: f32,
}

impl Default for SegmentationSection {
    fn default() -> Self {
        Self {
            distance_threshold: defaults::distance_threshold(),
            min_points: defaults::min_points(),
            max_points: defaults::max_points(),
            min_distance: defaults::min_distance(),
            max_distance: defaults::max_distance(),
            min_width: defaults::min_width(),
            max_width: defaults::max_width(),
        }
    }
}
