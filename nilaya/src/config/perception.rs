//! Perception (template registration) configuration section.

use serde::{Deserialize, Serialize};

use crate::registration::RegistrationParams;

use super::defaults;

/// Template registration and candidate selection settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerceptionSection {
    /// Fitness acceptance threshold.
    ///
    /// Fitness is an error, so a cluster is accepted only when its score is
    /// strictly *below* this value. The name is kept from the legacy
    /// parameter set even though it acts as a ceiling.
    #[serde(default = "defaults::icp_min_score")]
    pub icp_min_score: f32,

    /// Maximum registration iterations
    #[serde(default = "defaults::icp_max_iter")]
    pub icp_max_iter: u32,

    /// Maximum correspondence distance (m)
    #[serde(default = "defaults::icp_max_corr_dis")]
    pub icp_max_corr_dis: f32,

    /// Transformation convergence epsilon
    #[serde(default = "defaults::icp_max_trans_eps")]
    pub icp_max_trans_eps: f32,

    /// Fitness convergence epsilon
    #[serde(default = "defaults::icp_max_eucl_fit_eps")]
    pub icp_max_eucl_fit_eps: f32,

    /// Publish intermediate clouds to the debug sink
    #[serde(default)]
    pub enable_debug: bool,

    /// Path of the dock template (ASCII PCD)
    #[serde(default)]
    pub dock_template_path: String,
}

impl PerceptionSection {
    /// Registration parameters for one alignment call.
    pub fn registration_params(&self) -> RegistrationParams {
        RegistrationParams {
            max_iterations: self.icp_max_iter,
            max_correspondence_distance: self.icp_max_corr_dis,
            transformation_epsilon: self.icp_max_trans_eps,
            fitness_epsilon: self.icp_max_eucl_fit_eps,
        }
    }
}

impl Default for PerceptionSection {
    fn default() -> Self {
        Self {
            icp_min_score: defaults::icp_min_score(),
            icp_max_iter: defaults::icp_max_iter(),
            icp_max_corr_dis: defaults::icp_max_corr_dis(),
            icp_max_trans_eps: defaults::icp_max_trans_eps(),
            icp_max_eucl_fit_eps: defaults::icp_max_eucl_fit_eps(),
            enable_debug: false,
            dock_template_path: String::new(),
        }
    }
}
