//! Scan segmentation.
//!
//! Splits a range scan into contiguous runs of points and keeps only the runs
//! whose size, range and extent could belong to a docking station.
//!
//! ```text
//!   LaserScan ──scan_to_points──► [Point2D] ──segment_points──► [Segment]
//!                                                                   │
//!                                                                filter
//!                                                                   ▼
//!                                                            dock candidates
//! ```

mod segment;
mod segmenter;

pub use segment::Segment;
pub use segmenter::{Segmentation, scan_to_points};
