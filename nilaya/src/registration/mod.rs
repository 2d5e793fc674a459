//! Point-set registration.
//!
//! The detection pass only depends on the [`Registration`] capability: align
//! a source cloud onto a target cloud and report whether it converged, the
//! rigid transform found, and a fitness score. [`PointToPointIcp`] is the
//! default implementation.
//!
//! # Example
//!
//! ```
//! use nilaya::registration::{PointToPointIcp, Registration, RegistrationParams};
//! use nilaya::core::types::{Point2D, PointCloud2D, Pose2D};
//!
//! let source: PointCloud2D = (0..20)
//!     .map(|i| Point2D::new(i as f32 * 0.05, (i as f32 * 0.05).powi(2)))
//!     .collect();
//! let target = source.transform(&Pose2D::new(0.005, 0.002, 0.005));
//!
//! let result = PointToPointIcp::new().align(&source, &target, &RegistrationParams::default());
//! assert!(result.converged);
//! assert!(result.fitness_score < 1e-6);
//! ```

mod icp;

pub use icp::PointToPointIcp;

use crate::core::types::{PointCloud2D, Pose2D};

/// Parameters for one alignment call.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationParams {
    /// Maximum number of iterations.
    pub max_iterations: u32,

    /// Maximum correspondence distance (meters).
    ///
    /// Point pairs farther than this are ignored.
    pub max_correspondence_distance: f32,

    /// Convergence threshold on the incremental transform.
    ///
    /// Compared against `dx² + dy² + dθ²` of the last step.
    pub transformation_epsilon: f32,

    /// Convergence threshold on the relative change of the mean squared
    /// correspondence error between two iterations.
    pub fitness_epsilon: f32,
}

impl Default for RegistrationParams {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            max_correspondence_distance: 0.25,
            transformation_epsilon: 1e-9,
            fitness_epsilon: 1e-9,
        }
    }
}

/// Outcome of an alignment.
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    /// Whether the algorithm converged.
    pub converged: bool,

    /// Transform that maps the source onto the target.
    pub transform: Pose2D,

    /// Mean squared distance from each aligned source point to its nearest
    /// target point. Lower is better, 0 is a perfect fit.
    pub fitness_score: f32,

    /// Source cloud after applying `transform`.
    pub aligned: PointCloud2D,

    /// Number of iterations performed.
    pub iterations: u32,
}

impl RegistrationResult {
    /// Non-converged result with identity transform.
    pub fn failed(source: &PointCloud2D, iterations: u32) -> Self {
        Self {
            converged: false,
            transform: Pose2D::identity(),
            fitness_score: f32::MAX,
            aligned: source.clone(),
            iterations,
        }
    }
}

/// Iterative point-set alignment.
pub trait Registration: Send + Sync {
    /// Align `source` onto `target`.
    fn align(
        &self,
        source: &PointCloud2D,
        target: &PointCloud2D,
        params: &RegistrationParams,
    ) -> RegistrationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result() {
        let source = PointCloud2D::new();
        let result = RegistrationResult::failed(&source, 0);
        assert!(!result.converged);
        assert_eq!(result.fitness_score, f32::MAX);
        assert_eq!(result.transform, Pose2D::identity());
    }

    #[test]
    fn test_default_params() {
        let params = RegistrationParams::default();
        assert_eq!(params.max_iterations, 300);
        assert_eq!(params.max_correspondence_distance, 0.25);
    }
}
