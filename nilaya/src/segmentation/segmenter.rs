//! Jump-distance segmentation and segment filtering.

use log::debug;

use crate::config::SegmentationSection;
use crate::core::types::{LaserScan, Point2D};

use super::segment::Segment;

/// Convert a polar scan into Cartesian points in the scan frame.
///
/// Readings outside `[range_min, range_max]` are dropped, but the angle still
/// advances past them, so the remaining points keep their true bearing.
pub fn scan_to_points(scan: &LaserScan) -> Vec<Point2D> {
    let mut points = Vec::with_capacity(scan.len());
    let mut phi = scan.angle_min;
    for &r in &scan.ranges {
        if scan.is_valid_range(r) {
            let (sin_p, cos_p) = phi.sin_cos();
            points.push(Point2D::new(r * cos_p, r * sin_p));
        }
        phi += scan.angle_increment;
    }
    points
}

/// Segmentation with the jump-distance criterion plus size filtering.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    config: SegmentationSection,
}

impl Segmentation {
    /// Create a segmenter with the given settings.
    pub fn new(config: SegmentationSection) -> Self {
        Self { config }
    }

    /// Current settings.
    pub fn config(&self) -> &SegmentationSection {
        &self.config
    }

    /// Rasterize and segment a scan.
    ///
    /// Returns an empty vector when no reading is in range.
    pub fn perform(&self, scan: &LaserScan) -> Vec<Segment> {
        let segments = self.segment_points(&scan_to_points(scan));
        debug!(
            "Segmented {} readings into {} segments",
            scan.len(),
            segments.len()
        );
        segments
    }

    /// Split ordered points wherever two consecutive points are farther
    /// apart than the distance threshold.
    ///
    /// The gap is measured to the immediately preceding point in scan order.
    /// Concatenating the result reproduces the input exactly.
    pub fn segment_points(&self, points: &[Point2D]) -> Vec<Segment> {
        let Some((first, rest)) = points.split_first() else {
            return Vec::new();
        };

        let mut segments = Vec::new();
        let mut current = vec![*first];
        let mut previous = first;
        for point in rest {
            if is_jump_between_points(previous, point, self.config.distance_threshold) {
                segments.push(Segment::new(std::mem::take(&mut current)));
            }
            current.push(*point);
            previous = point;
        }
        segments.push(Segment::new(current));
        segments
    }

    /// Keep the segments whose point count, centroid range and width fall
    /// inside the configured bounds (all inclusive).
    ///
    /// Widths are compared squared. Input order is preserved.
    pub fn filter(&self, segments: &[Segment]) -> Vec<Segment> {
        let c = &self.config;
        let min_width_sq = c.min_width * c.min_width;
        let max_width_sq = c.max_width * c.max_width;

        segments
            .iter()
            .filter(|segment| {
                let n = segment.len();
                if n < c.min_points || n > c.max_points {
                    return false;
                }
                let range = segment.centroid_length();
                if range < c.min_distance || range > c.max_distance {
                    return false;
                }
                let width_sq = segment.width_squared();
                width_sq >= min_width_sq && width_sq <= max_width_sq
            })
            .cloned()
            .collect()
    }
}

#[inline]
fn is_jump_between_points(p1: &Point2D, p2: &Point2D, threshold: f32) -> bool {
    p1.distance(p2) > threshold
}
