//! Range scan in polar coordinates.

use serde::{Deserialize, Serialize};

/// Raw 2D range scan.
///
/// Reading `i` lies at angle `angle_min + i * angle_increment` in the
/// sensor frame `frame_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    /// Sensor frame the readings are expressed in
    #[serde(default)]
    pub frame_id: String,
    /// Acquisition time in microseconds since epoch
    #[serde(default)]
    pub timestamp_us: u64,
    /// Angle of the first reading in radians
    pub angle_min: f32,
    /// Angular step between consecutive readings in radians
    pub angle_increment: f32,
    /// Minimum valid range in meters (inclusive)
    pub range_min: f32,
    /// Maximum valid range in meters (inclusive)
    pub range_max: f32,
    /// Range readings in meters
    pub ranges: Vec<f32>,
}

impl LaserScan {
    /// Create a new laser scan in the given frame.
    pub fn new(
        frame_id: impl Into<String>,
        angle_min: f32,
        angle_increment: f32,
        range_min: f32,
        range_max: f32,
        ranges: Vec<f32>,
    ) -> Self {
        Self {
            frame_id: frame_id.into(),
            timestamp_us: 0,
            angle_min,
            angle_increment,
            range_min,
            range_max,
            ranges,
        }
    }

    /// Set the acquisition timestamp.
    pub fn with_timestamp(mut self, timestamp_us: u64) -> Self {
        self.timestamp_us = timestamp_us;
        self
    }

    /// Number of range readings.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if scan is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Angle of reading `index`.
    #[inline]
    pub fn angle_at(&self, index: usize) -> f32 {
        self.angle_min + index as f32 * self.angle_increment
    }

    /// Whether a range lies within `[range_min, range_max]`.
    ///
    /// NaN never does.
    #[inline]
    pub fn is_valid_range(&self, range: f32) -> bool {
        range >= self.range_min && range <= self.range_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_at() {
        let scan = LaserScan::new("laser", -1.0, 0.25, 0.1, 5.0, vec![1.0; 5]);
        assert_relative_eq!(scan.angle_at(0), -1.0);
        assert_relative_eq!(scan.angle_at(4), 0.0);
    }

    #[test]
    fn test_valid_range_bounds_inclusive() {
        let scan = LaserScan::new("laser", 0.0, 0.1, 0.5, 2.0, vec![]);
        assert!(scan.is_valid_range(0.5));
        assert!(scan.is_valid_range(2.0));
        assert!(!scan.is_valid_range(0.49));
        assert!(!scan.is_valid_range(f32::NAN));
        assert!(!scan.is_valid_range(f32::INFINITY));
    }

    #[test]
    fn test_yaml_defaults_frame_and_stamp() {
        let yaml = "angle_min: 0.0\nangle_increment: 0.1\nrange_min: 0.0\nrange_max: 10.0\nranges: [1.0, 2.0]\n";
        let scan: LaserScan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scan.frame_id, "");
        assert_eq!(scan.timestamp_us, 0);
        assert_eq!(scan.len(), 2);
    }
}
