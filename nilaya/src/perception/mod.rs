//! Dock detection from segmented scans.
//!
//! # Pipeline
//!
//! ```text
//!   LaserScan
//!      │ Segmentation::perform + filter
//!      ▼
//!   [Segment] ──segments_to_clusters──► [Cluster]   (scan frame)
//!                                          │
//!                         measure distance to initial estimate
//!                                          │
//!                          PoseRefiner::refine_all_clusters
//!          ┌───────────────────────────────┼────────────────────────────┐
//!          │ validity gate (width vs       │ stage template at the      │
//!          │ template, distance < 1 m)     │ initial estimate; stage    │
//!          │                               │ cluster via frame lookup   │
//!          └───────────────────────────────┼────────────────────────────┘
//!                                          │ Registration::align
//!                                          ▼
//!                         select_best (score < icp_min_score, lowest wins)
//!                                          │
//!                                          ▼
//!                                   DetectedDockPose
//! ```
//!
//! A missing frame transform aborts the whole pass; the last detected pose is
//! kept and returned as stale.

mod cluster;
mod detector;
mod refiner;
mod selector;
mod template;

pub use cluster::{Cluster, segments_to_clusters};
pub use detector::{DetectedDockPose, DetectionOutcome, DockPerception};
pub use refiner::PoseRefiner;
pub use selector::select_best;
pub use template::Template;
