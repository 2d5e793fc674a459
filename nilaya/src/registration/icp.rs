//! Point-to-Point Iterative Closest Point (ICP) algorithm.
//!
//! Aligns two planar point clouds by iteratively:
//! 1. Finding nearest neighbor correspondences
//! 2. Computing the optimal rigid transform in closed form
//! 3. Applying the transform and repeating until convergence
//!
//! # Algorithm
//!
//! ```text
//! Input: Source S, Target T
//! Output: Transform T* that aligns S to T
//!
//! T* = identity
//! for each iteration:
//!   a. For each point of T*(S), nearest point in T within max distance
//!   b. ΔT = argmin Σ |ΔT(s) - t|²      (centroids + atan2 of cross terms)
//!   c. T* = ΔT ∘ T*
//!   d. stop when |ΔT|² ≤ transformation ε
//!      or the relative MSE change ≤ fitness ε
//!      or the iteration budget is spent
//! ```
//!
//! Correspondence search is brute force; dock templates and candidate
//! clusters hold at most a few hundred points.

use log::trace;

use super::{Registration, RegistrationParams, RegistrationResult};
use crate::core::types::{Point2D, PointCloud2D, Pose2D};

/// Fewer correspondences than this cannot constrain a rigid transform.
const MIN_CORRESPONDENCES: usize = 3;

/// Point-to-Point ICP registration.
#[derive(Debug, Clone, Default)]
pub struct PointToPointIcp;

/// Matched pair: (transformed source point, target point, squared distance).
type Correspondence = (Point2D, Point2D, f32);

impl PointToPointIcp {
    /// Create a new ICP matcher.
    pub fn new() -> Self {
        Self
    }

    /// Nearest point of `target` to `point` with its squared distance.
    fn nearest(target: &PointCloud2D, point: &Point2D) -> Option<(Point2D, f32)> {
        target
            .iter()
            .map(|t| (t, t.distance_squared(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Find correspondences between the transformed source and the target.
    fn find_correspondences(
        source: &PointCloud2D,
        target: &PointCloud2D,
        max_dist_sq: f32,
    ) -> Vec<Correspondence> {
        source
            .iter()
            .filter_map(|s| {
                Self::nearest(target, &s)
                    .filter(|(_, d2)| *d2 <= max_dist_sq)
                    .map(|(t, d2)| (s, t, d2))
            })
            .collect()
    }

    /// Closed-form least-squares rigid transform mapping sources onto targets.
    fn compute_transform(correspondences: &[Correspondence]) -> Pose2D {
        let n = correspondences.len() as f32;
        let (mut sx, mut sy, mut tx, mut ty) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for (s, t, _) in correspondences {
            sx += s.x;
            sy += s.y;
            tx += t.x;
            ty += t.y;
        }
        let source_centroid = Point2D::new(sx / n, sy / n);
        let target_centroid = Point2D::new(tx / n, ty / n);

        // Σ dot and Σ cross of the centered pairs give cos θ and sin θ.
        let mut dot = 0.0f32;
        let mut cross = 0.0f32;
        for (s, t, _) in correspondences {
            let (ax, ay) = (s.x - source_centroid.x, s.y - source_centroid.y);
            let (bx, by) = (t.x - target_centroid.x, t.y - target_centroid.y);
            dot += ax * bx + ay * by;
            cross += ax * by - ay * bx;
        }
        let theta = cross.atan2(dot);

        let (sin_t, cos_t) = theta.sin_cos();
        Pose2D::new(
            target_centroid.x - (source_centroid.x * cos_t - source_centroid.y * sin_t),
            target_centroid.y - (source_centroid.x * sin_t + source_centroid.y * cos_t),
            theta,
        )
    }

    /// Mean squared nearest-neighbour distance over all source points.
    fn fitness_score(aligned: &PointCloud2D, target: &PointCloud2D) -> f32 {
        if aligned.is_empty() {
            return f32::MAX;
        }
        let sum: f32 = aligned
            .iter()
            .filter_map(|p| Self::nearest(target, &p).map(|(_, d2)| d2))
            .sum();
        sum / aligned.len() as f32
    }
}

impl Registration for PointToPointIcp {
    fn align(
        &self,
        source: &PointCloud2D,
        target: &PointCloud2D,
        params: &RegistrationParams,
    ) -> RegistrationResult {
        if source.len() < MIN_CORRESPONDENCES || target.is_empty() {
            return RegistrationResult::failed(source, 0);
        }

        let max_dist_sq = params.max_correspondence_distance.powi(2);
        let mut transform = Pose2D::identity();
        let mut current = source.clone();
        let mut previous_mse: Option<f32> = None;
        let mut iterations = 0u32;

        while iterations < params.max_iterations {
            iterations += 1;

            let correspondences = Self::find_correspondences(&current, target, max_dist_sq);
            if correspondences.len() < MIN_CORRESPONDENCES {
                trace!(
                    "ICP stopped at iteration {}: {} correspondences",
                    iterations,
                    correspondences.len()
                );
                return RegistrationResult::failed(source, iterations);
            }

            let delta = Self::compute_transform(&correspondences);
            transform = delta.compose(&transform);
            current = source.transform(&transform);

            let step = delta.x * delta.x + delta.y * delta.y + delta.theta * delta.theta;
            if step <= params.transformation_epsilon {
                break;
            }

            let mse = correspondences.iter().map(|c| c.2).sum::<f32>() / correspondences.len() as f32;
            if let Some(prev) = previous_mse {
                let relative = if prev > 0.0 {
                    (mse - prev).abs() / prev
                } else {
                    mse
                };
                if relative <= params.fitness_epsilon {
                    break;
                }
            }
            previous_mse = Some(mse);
        }

        if iterations == 0 {
            return RegistrationResult::failed(source, 0);
        }

        let fitness_score = Self::fitness_score(&current, target);
        trace!(
            "ICP converged after {} iterations, fitness {:.6}",
            iterations, fitness_score
        );
        RegistrationResult {
            converged: true,
            transform,
            fitness_score,
            aligned: current,
            iterations,
        }
    }
}
