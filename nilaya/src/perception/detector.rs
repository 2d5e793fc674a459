//! Per-scan dock detection.

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use super::cluster::{Cluster, segments_to_clusters};
use super::refiner::PoseRefiner;
use super::selector::select_best;
use super::template::Template;
use crate::config::{ConfigHandle, NilayaConfig};
use crate::core::math::now_us;
use crate::core::types::{LaserScan, Pose2D, Stamped, StampedPose};
use crate::debug::{DebugChannel, DebugSink, NullSink};
use crate::error::Result;
use crate::io::load_template;
use crate::registration::{PointToPointIcp, Registration};
use crate::segmentation::Segmentation;
use crate::transforms::TransformLookup;

/// Last successfully detected dock pose.
///
/// Owned by the caller and handed to every [`DockPerception::get_dock_pose`]
/// call. Only a fresh detection overwrites it; failed passes leave the previous
/// value in place so it can still be used as a best-effort answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedDockPose {
    pose: Option<StampedPose>,
}

impl DetectedDockPose {
    /// Cell with nothing detected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell seeded with a previously known pose.
    pub fn from_pose(pose: StampedPose) -> Self {
        Self { pose: Some(pose) }
    }

    /// Most recent successful detection, if any.
    pub fn pose(&self) -> Option<&StampedPose> {
        self.pose.as_ref()
    }

    fn update(&mut self, pose: StampedPose) {
        self.pose = Some(pose);
    }
}

/// Result of one detection call.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    /// Best known dock pose after this call, possibly stale
    pub pose: Option<StampedPose>,
    /// Whether `pose` was produced by this call
    pub fresh: bool,
}

/// Dock detector.
///
/// Holds the template and its collaborators. Each call to
/// [`get_dock_pose`](Self::get_dock_pose) takes one configuration snapshot and
/// runs segmentation, filtering, refinement and selection against it.
pub struct DockPerception {
    template: Template,
    config: ConfigHandle,
    transforms: Arc<dyn TransformLookup>,
    registration: Box<dyn Registration>,
    debug_sink: Arc<dyn DebugSink>,
    initial_estimate: Option<StampedPose>,
}

impl DockPerception {
    /// Detector with point-to-point ICP and no debug output.
    pub fn new(template: Template, config: ConfigHandle, transforms: Arc<dyn TransformLookup>) -> Self {
        Self {
            template,
            config,
            transforms,
            registration: Box::new(PointToPointIcp::new()),
            debug_sink: Arc::new(NullSink),
            initial_estimate: None,
        }
    }

    /// Detector whose template is loaded from `perception.dock_template_path`.
    ///
    /// Relative paths are resolved against `base_dir` when given.
    pub fn from_config(
        config: ConfigHandle,
        transforms: Arc<dyn TransformLookup>,
        base_dir: Option<&Path>,
    ) -> Result<Self> {
        let snapshot = config.snapshot();
        let template_path = Path::new(&snapshot.perception.dock_template_path);
        let template = match base_dir {
            Some(dir) if template_path.is_relative() && !template_path.as_os_str().is_empty() => {
                load_template(&dir.join(template_path))?
            }
            _ => load_template(template_path)?,
        };
        Ok(Self::new(template, config, transforms))
    }

    /// Replace the registration algorithm.
    pub fn with_registration(mut self, registration: Box<dyn Registration>) -> Self {
        self.registration = registration;
        self
    }

    /// Replace the debug sink. It only receives clouds while
    /// `perception.enable_debug` is set.
    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.debug_sink = sink;
        self
    }

    /// Dock template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Live configuration.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Current prior, if one was supplied.
    pub fn initial_estimate(&self) -> Option<&StampedPose> {
        self.initial_estimate.as_ref()
    }

    /// Set the prior dock pose in `frame_id`, stamped now.
    pub fn set_initial_estimate(&mut self, pose: Pose2D, frame_id: impl Into<String>) {
        self.set_initial_estimate_stamped(Stamped::new(pose, frame_id, now_us()));
    }

    /// Set the prior dock pose with an explicit stamp.
    pub fn set_initial_estimate_stamped(&mut self, estimate: StampedPose) {
        debug!(
            "[DockPerception] Initial estimate ({:.3}, {:.3}, {:.3}) in '{}'",
            estimate.data.x, estimate.data.y, estimate.data.theta, estimate.frame_id
        );
        self.initial_estimate = Some(estimate);
    }

    /// Segment, filter and wrap a scan into candidate clusters using the
    /// current configuration.
    pub fn extract_clusters(&self, scan: &LaserScan) -> Vec<Cluster> {
        let config = self.config.snapshot();
        Self::extract_clusters_with(&config, scan)
    }

    fn extract_clusters_with(config: &NilayaConfig, scan: &LaserScan) -> Vec<Cluster> {
        let segmentation = Segmentation::new(config.segmentation.clone());
        let segments = segmentation.perform(scan);
        let filtered = segmentation.filter(&segments);
        debug!(
            "[DockPerception] {} segments, {} after filtering",
            segments.len(),
            filtered.len()
        );
        segments_to_clusters(&scan.frame_id, &filtered, scan.timestamp_us)
    }

    /// Run one detection pass on `scan`.
    ///
    /// On success `state` is overwritten and the outcome is fresh. Otherwise
    /// `state` is untouched and its previous pose is returned as stale. A pass
    /// fails when no initial estimate is set, a frame lookup fails or no
    /// candidate scores below `perception.icp_min_score`.
    pub fn get_dock_pose(&self, scan: &LaserScan, state: &mut DetectedDockPose) -> DetectionOutcome {
        let stale = |state: &DetectedDockPose| DetectionOutcome {
            pose: state.pose().cloned(),
            fresh: false,
        };

        let Some(estimate) = self.initial_estimate.as_ref() else {
            warn!("[DockPerception] No initial estimate set, skipping scan");
            return stale(state);
        };

        let config = self.config.snapshot();
        let mut clusters = Self::extract_clusters_with(&config, scan);

        let mut refiner = PoseRefiner::new(
            self.registration.as_ref(),
            config.perception.registration_params(),
        );
        if config.perception.enable_debug {
            refiner = refiner.with_debug_sink(self.debug_sink.as_ref());
        }

        let refined = match refiner.refine_all_clusters(
            &mut clusters,
            &self.template,
            estimate,
            self.transforms.as_ref(),
        ) {
            Ok(refined) => refined,
            Err(_) => return stale(state),
        };

        let Some(best) = select_best(&clusters, config.perception.icp_min_score) else {
            debug!(
                "[DockPerception] No dock: {} of {} clusters refined, none below {}",
                refined,
                clusters.len(),
                config.perception.icp_min_score
            );
            return stale(state);
        };

        let winner = &clusters[best];
        let Some(pose) = winner.icp_pose.clone() else {
            return stale(state);
        };

        if config.perception.enable_debug {
            self.debug_sink.publish(
                DebugChannel::Dock,
                &Stamped::new(winner.matched_cloud.clone(), estimate.frame_id.as_str(), now_us()),
            );
        }

        debug!(
            "[DockPerception] Dock at ({:.3}, {:.3}, {:.3}) in '{}', score {:.5}",
            pose.data.x,
            pose.data.y,
            pose.data.theta,
            pose.frame_id,
            winner.icp_score.unwrap_or(f32::NAN)
        );

        state.update(pose.clone());
        DetectionOutcome {
            pose: Some(pose),
            fresh: true,
        }
    }
}
