//! Contiguous run of scan points.

use crate::core::types::{Point2D, PointCloud2D};

/// Ordered run of scan points with no gap above the segmentation threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    points: Vec<Point2D>,
}

impl Segment {
    /// Create a segment from ordered points.
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Points in scan order.
    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Consume the segment, returning its points.
    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of all points (origin for an empty segment).
    pub fn centroid(&self) -> Point2D {
        if self.points.is_empty() {
            return Point2D::default();
        }
        let n = self.points.len() as f32;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2D::new(sx / n, sy / n)
    }

    /// Distance from the sensor origin to the centroid.
    pub fn centroid_length(&self) -> f32 {
        self.centroid().length()
    }

    /// Squared distance between the first and last point.
    pub fn width_squared(&self) -> f32 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => a.distance_squared(b),
            _ => 0.0,
        }
    }

    /// Distance between the first and last point.
    pub fn width(&self) -> f32 {
        self.width_squared().sqrt()
    }

    /// Copy into a point cloud.
    pub fn to_cloud(&self) -> PointCloud2D {
        PointCloud2D::from_points(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_properties() {
        let seg = Segment::new(vec![
            Point2D::new(1.0, -0.5),
            Point2D::new(1.2, 0.0),
            Point2D::new(1.0, 0.5),
        ]);
        assert_eq!(seg.len(), 3);
        let c = seg.centroid();
        assert_relative_eq!(c.x, 3.2 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(seg.centroid_length(), 3.2 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(seg.width_squared(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(seg.width(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_segment() {
        let seg = Segment::default();
        assert!(seg.is_empty());
        assert_eq!(seg.width(), 0.0);
        assert_eq!(seg.centroid(), Point2D::default());
    }

    #[test]
    fn test_to_cloud_keeps_order() {
        let pts = vec![Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0)];
        let cloud = Segment::new(pts.clone()).to_cloud();
        assert_eq!(cloud.to_points(), pts);
    }
}
