//! Template-to-candidate alignment.
//!
//! Both clouds are staged into the initial estimate's frame before alignment:
//! the template is placed at the estimate pose, and the candidate is moved out
//! of the scan frame with one frame lookup per pass. A failed lookup aborts
//! the whole pass.

use log::{debug, warn};

use super::cluster::Cluster;
use super::template::Template;
use crate::core::math::now_us;
use crate::core::types::{PointCloud2D, Stamped, StampedPose};
use crate::debug::{DebugChannel, DebugSink};
use crate::registration::{Registration, RegistrationParams};
use crate::transforms::{TransformError, TransformLookup};

/// Aligns the dock template against candidate clusters.
pub struct PoseRefiner<'a> {
    registration: &'a dyn Registration,
    params: RegistrationParams,
    debug_sink: Option<&'a dyn DebugSink>,
}

impl<'a> PoseRefiner<'a> {
    /// Refiner using `registration` with `params` for every cluster.
    pub fn new(registration: &'a dyn Registration, params: RegistrationParams) -> Self {
        Self {
            registration,
            params,
            debug_sink: None,
        }
    }

    /// Publish staged clouds to `sink`.
    pub fn with_debug_sink(mut self, sink: &'a dyn DebugSink) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    /// Align `staged_template` against `staged_target` and record the result
    /// on `cluster`.
    ///
    /// Returns `false` when registration did not converge; the cluster is then
    /// left without score or pose. On success the refined pose is the
    /// alignment composed on the left of the estimate pose, expressed in the
    /// estimate's frame.
    pub fn refine_cluster(
        &self,
        cluster: &mut Cluster,
        staged_template: &PointCloud2D,
        staged_target: &PointCloud2D,
        estimate: &StampedPose,
    ) -> bool {
        let result = self
            .registration
            .align(staged_template, staged_target, &self.params);

        if !result.converged {
            debug!(
                "[PoseRefiner] No convergence after {} iterations for cluster of {} points",
                result.iterations,
                cluster.cloud.data.len()
            );
            return false;
        }

        let pose = result.transform.compose(&estimate.data);
        debug!(
            "[PoseRefiner] Converged in {} iterations: score={:.5} pose=({:.3}, {:.3}, {:.3})",
            result.iterations, result.fitness_score, pose.x, pose.y, pose.theta
        );

        cluster.icp_pose = Some(Stamped::new(pose, estimate.frame_id.as_str(), now_us()));
        cluster.icp_score = Some(result.fitness_score);
        cluster.matched_cloud = result.aligned;
        true
    }

    /// Measure, gate and align every cluster.
    ///
    /// All clusters must share the scan frame of the first one. Returns the
    /// number of clusters that received a score, or the lookup failure that
    /// aborted the pass. Nothing is looked up when `clusters` is empty.
    pub fn refine_all_clusters(
        &self,
        clusters: &mut [Cluster],
        template: &Template,
        estimate: &StampedPose,
        transforms: &dyn TransformLookup,
    ) -> Result<usize, TransformError> {
        let Some(first) = clusters.first() else {
            return Ok(0);
        };

        let scan_to_estimate = transforms
            .lookup(&estimate.frame_id, &first.cloud.frame_id, first.cloud.timestamp_us)
            .inspect_err(|e| warn!("[PoseRefiner] {}", e))?;

        let staged_template = template.staged_at(&estimate.data);
        self.publish(DebugChannel::Template, &staged_template, &estimate.frame_id);

        let ideal_size = template.width();
        let estimate_position = estimate.data.position();
        let mut refined = 0;

        for (index, cluster) in clusters.iter_mut().enumerate() {
            let staged_target = cluster.cloud.data.transform(&scan_to_estimate);
            let distance = staged_target
                .centroid()
                .map(|c| c.distance(&estimate_position));
            cluster.distance_from_initial_pose = distance;

            if !cluster.valid(ideal_size) {
                debug!(
                    "[PoseRefiner] Cluster {} rejected: width={:.3} (ideal {:.3}), distance={:?}",
                    index,
                    cluster.width(),
                    ideal_size,
                    distance
                );
                continue;
            }

            self.publish(DebugChannel::Target, &staged_target, &estimate.frame_id);

            if self.refine_cluster(cluster, &staged_template, &staged_target, estimate) {
                refined += 1;
            }
        }

        Ok(refined)
    }

    fn publish(&self, channel: DebugChannel, cloud: &PointCloud2D, frame_id: &str) {
        if let Some(sink) = self.debug_sink {
            sink.publish(channel, &Stamped::new(cloud.clone(), frame_id, now_us()));
        }
    }
}
