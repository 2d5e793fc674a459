//! Persistence of dock templates.
//!
//! Templates are stored as ASCII PCD (v0.7) files so they can be produced
//! and inspected with common point cloud tooling.

mod pcd;

pub use pcd::{load_template, parse_pcd, save_template, write_pcd};
