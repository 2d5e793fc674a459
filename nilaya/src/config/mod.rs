//! Configuration for the dock perception pipeline.
//!
//! Loads all settings from a single YAML file; every field has a default so
//! partial files are accepted.
//!
//! ## Example YAML
//!
//! ```yaml
//! segmentation:
//!   distance_threshold: 0.04   # gap that splits two segments (m)
//!   min_points: 25
//!   max_points: 400
//!   min_distance: 0.0          # centroid range from sensor (m)
//!   max_distance: 2.0
//!   min_width: 0.3             # first-to-last point distance (m)
//!   max_width: 1.0
//!
//! perception:
//!   icp_min_score: 0.01        # acceptance ceiling on fitness
//!   icp_max_iter: 300
//!   icp_max_corr_dis: 0.25
//!   icp_max_trans_eps: 1.0e-9
//!   icp_max_eucl_fit_eps: 1.0e-9
//!   enable_debug: false
//!   dock_template_path: dock.pcd   # relative paths resolve against a base dir
//! ```
//!
//! ## Live updates
//!
//! [`ConfigHandle`] holds an immutable snapshot behind a lock. A detection
//! pass clones the snapshot once at entry, so an update that lands mid-pass
//! only affects the next pass.

mod defaults;
mod error;
mod handle;
mod nilaya;
mod perception;
mod segmentation;

pub use error::ConfigLoadError;
pub use handle::ConfigHandle;
pub use nilaya::NilayaConfig;
pub use perception::PerceptionSection;
pub use segmentation::SegmentationSection;
