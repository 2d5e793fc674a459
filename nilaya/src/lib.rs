//! # Nilaya
//!
//! Docking station detection from a single 2D laser scan.
//!
//! ## Overview
//!
//! Given a scan, a reference point cloud of the dock (the template) and a
//! prior guess of where the dock is, Nilaya finds the scan segment that best
//! matches the template and reports its refined pose in the prior's frame.
//!
//! ```text
//! LaserScan ──► scan_to_points ──► Segmentation ──► filter ──► [Cluster]
//!                                                                  │
//!        initial estimate ──► stage template ──┐                   │
//!        TransformLookup  ──► stage clusters ──┼── validity gate ◄─┘
//!                                              ▼
//!                                  Registration::align (ICP)
//!                                              │
//!                                              ▼
//!                            select_best ──► DetectedDockPose
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nilaya::{ConfigHandle, DetectedDockPose, DockPerception, NilayaConfig, Pose2D};
//! use nilaya::transforms::StaticTransformTree;
//!
//! let config = ConfigHandle::new(NilayaConfig::load_default()?);
//! let tree = Arc::new(StaticTransformTree::new());
//! tree.set_transform("map", "laser", Pose2D::identity());
//!
//! let mut perception = DockPerception::from_config(config, tree, None)?;
//! perception.set_initial_estimate(Pose2D::new(1.0, 0.0, 0.0), "map");
//!
//! let mut last_dock = DetectedDockPose::new();
//! let outcome = perception.get_dock_pose(&scan, &mut last_dock);
//! if outcome.fresh {
//!     println!("dock at {:?}", outcome.pose);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of the sensor)
//! - Y: Left
//! - Theta: Rotation in radians, CCW positive from +X axis

#![warn(missing_docs)]

// Core types
pub mod core;

// Unified configuration
pub mod config;

// Error types
pub mod error;

// Scan segmentation and filtering
pub mod segmentation;

// Point-set registration
pub mod registration;

// Frame lookups
pub mod transforms;

// Template persistence
pub mod io;

// Intermediate cloud publication
pub mod debug;

// Clusters, refinement, selection
pub mod perception;

// Re-export commonly used types
pub use crate::core::types::{LaserScan, Point2D, PointCloud2D, Pose2D, Stamped, StampedCloud, StampedPose};

pub use crate::config::{ConfigHandle, ConfigLoadError, NilayaConfig, PerceptionSection, SegmentationSection};

pub use crate::error::{Error, Result};

pub use crate::perception::{
    Cluster, DetectedDockPose, DetectionOutcome, DockPerception, PoseRefiner, Template, select_best,
};

pub use crate::registration::{PointToPointIcp, Registration, RegistrationParams, RegistrationResult};
