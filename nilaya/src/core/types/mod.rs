//! Core data types for dock perception.
//!
//! - [`Point2D`]: 2D point in meters
//! - [`Pose2D`]: Planar rigid transform (x, y, theta)
//! - [`LaserScan`]: Raw range scan in polar coordinates
//! - [`PointCloud2D`]: Collection of 2D points in Cartesian coordinates
//! - [`Stamped<T>`]: Frame + timestamp wrapper

mod cloud;
mod pose;
mod scan;
mod stamped;

pub use cloud::PointCloud2D;
pub use pose::{Point2D, Pose2D};
pub use scan::LaserScan;
pub use stamped::{Stamped, StampedCloud, StampedPose};
