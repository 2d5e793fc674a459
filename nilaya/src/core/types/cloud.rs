//! Cartesian point cloud.

use serde::{Deserialize, Serialize};

use super::pose::{Point2D, Pose2D};

/// Collection of 2D points using a Struct of Arrays (SoA) layout.
///
/// Point order is significant: clouds built from a scan keep scan order, and
/// [`width`](Self::width) is measured between the first and last point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCloud2D {
    /// X coordinates in meters
    pub xs: Vec<f32>,
    /// Y coordinates in meters
    pub ys: Vec<f32>,
}

impl PointCloud2D {
    /// Create an empty point cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a point cloud with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    /// Create from a slice of points (converts AoS to SoA).
    pub fn from_points(points: &[Point2D]) -> Self {
        let mut cloud = Self::with_capacity(points.len());
        for p in points {
            cloud.push(*p);
        }
        cloud
    }

    /// Add a point.
    #[inline]
    pub fn push(&mut self, point: Point2D) {
        self.xs.push(point.x);
        self.ys.push(point.y);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Get point at index.
    ///
    /// # Panics
    /// Panics if index is out of bounds.
    #[inline]
    pub fn point_at(&self, i: usize) -> Point2D {
        Point2D::new(self.xs[i], self.ys[i])
    }

    /// First point in order, if any.
    #[inline]
    pub fn first(&self) -> Option<Point2D> {
        (!self.is_empty()).then(|| self.point_at(0))
    }

    /// Last point in order, if any.
    #[inline]
    pub fn last(&self) -> Option<Point2D> {
        (!self.is_empty()).then(|| self.point_at(self.len() - 1))
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
    }

    /// Collect into a vector of points.
    pub fn to_points(&self) -> Vec<Point2D> {
        self.iter().collect()
    }

    /// Distance between the first and last point (0 for empty clouds).
    ///
    /// This is an approximation of the object's extent that assumes the
    /// points are ordered along the observed surface.
    pub fn width(&self) -> f32 {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => a.distance(&b),
            _ => 0.0,
        }
    }

    /// Mean of all points.
    pub fn centroid(&self) -> Option<Point2D> {
        if self.is_empty() {
            return None;
        }
        let inv_n = 1.0 / self.len() as f32;
        let sum_x: f32 = self.xs.iter().sum();
        let sum_y: f32 = self.ys.iter().sum();
        Some(Point2D::new(sum_x * inv_n, sum_y * inv_n))
    }

    /// Transform every point by a rigid transform, producing a new cloud.
    ///
    /// Applies `p' = R(theta) * p + t`.
    pub fn transform(&self, pose: &Pose2D) -> PointCloud2D {
        let (sin_t, cos_t) = pose.theta.sin_cos();
        let mut result = PointCloud2D::with_capacity(self.len());
        for (&x, &y) in self.xs.iter().zip(self.ys.iter()) {
            result.xs.push(pose.x + x * cos_t - y * sin_t);
            result.ys.push(pose.y + x * sin_t + y * cos_t);
        }
        result
    }
}

impl FromIterator<Point2D> for PointCloud2D {
    fn from_iter<I: IntoIterator<Item = Point2D>>(iter: I) -> Self {
        let mut cloud = PointCloud2D::new();
        for p in iter {
            cloud.push(p);
        }
        cloud
    }
}
