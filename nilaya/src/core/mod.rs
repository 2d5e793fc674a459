//! Core foundation layer.
//!
//! Bottom layer of the dock perception stack with no internal dependencies.
//!
//! # Contents
//!
//! - [`types`]: Core data types (points, poses, scans, point clouds, stamps)
//! - [`math`]: Angle normalization and clock helpers

pub mod math;
pub mod types;
