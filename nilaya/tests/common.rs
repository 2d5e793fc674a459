//! Test utilities for nilaya integration tests.
//!
//! Builds synthetic scans by ray casting against simple line-segment worlds.

#![allow(dead_code)]

use std::f32::consts::PI;

use nilaya::{LaserScan, Point2D, PointCloud2D, Pose2D, Template};

/// Half width of the synthetic dock (m).
pub const DOCK_HALF_WIDTH: f32 = 0.25;

/// Depth of the dock's V profile at its ends (m).
pub const DOCK_DEPTH: f32 = 0.1;

/// Angular resolution of synthetic scans (rad).
pub const SCAN_INCREMENT: f32 = 0.005;

/// Line segment obstacle in the scan frame.
#[derive(Clone, Copy, Debug)]
pub struct Wall {
    pub start: Point2D,
    pub end: Point2D,
}

impl Wall {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Range along the unit ray at `angle` from the origin, if it hits.
    fn intersect(&self, angle: f32) -> Option<f32> {
        let (dx, dy) = (angle.cos(), angle.sin());
        let ex = self.end.x - self.start.x;
        let ey = self.end.y - self.start.y;
        let denom = dx * ey - dy * ex;
        if denom.abs() < 1e-9 {
            return None;
        }
        let t = (self.start.x * ey - self.start.y * ex) / denom;
        let s = (self.start.x * dy - self.start.y * dx) / denom;
        (t > 0.0 && (0.0..=1.0).contains(&s)).then_some(t)
    }
}

/// V-shaped dock profile in the dock frame: vertex at the origin, arms
/// opening toward +x. First-to-last width is `2 * DOCK_HALF_WIDTH`.
pub fn v_template_cloud() -> PointCloud2D {
    (0..=50)
        .map(|i| {
            let y = -DOCK_HALF_WIDTH + i as f32 * 0.01;
            Point2D::new(DOCK_DEPTH * y.abs() / DOCK_HALF_WIDTH, y)
        })
        .collect()
}

/// Template wrapping [`v_template_cloud`].
pub fn v_template() -> Template {
    Template::new(v_template_cloud()).unwrap()
}

/// The two arms of a dock placed at `pose` in the scan frame.
pub fn dock_walls(pose: &Pose2D) -> Vec<Wall> {
    let left = pose.transform_point(&Point2D::new(DOCK_DEPTH, -DOCK_HALF_WIDTH));
    let vertex = pose.transform_point(&Point2D::new(0.0, 0.0));
    let right = pose.transform_point(&Point2D::new(DOCK_DEPTH, DOCK_HALF_WIDTH));
    vec![Wall::new(left, vertex), Wall::new(vertex, right)]
}

/// Long wall on the sensor's left, wide enough to be filtered out.
pub fn clutter_wall() -> Wall {
    Wall::new(Point2D::new(-1.0, 1.5), Point2D::new(1.0, 1.5))
}

/// Full 360° scan of `walls` from the origin of `frame_id`.
pub fn cast_scan(frame_id: &str, walls: &[Wall]) -> LaserScan {
    let n = (2.0 * PI / SCAN_INCREMENT) as usize;
    let ranges = (0..n)
        .map(|i| {
            let angle = -PI + i as f32 * SCAN_INCREMENT;
            walls
                .iter()
                .filter_map(|w| w.intersect(angle))
                .fold(f32::INFINITY, f32::min)
        })
        .collect();
    LaserScan::new(frame_id, -PI, SCAN_INCREMENT, 0.05, 10.0, ranges).with_timestamp(1_000)
}

/// Scan of a single dock at `dock_in_scan` plus the clutter wall.
pub fn dock_scan(frame_id: &str, dock_in_scan: &Pose2D) -> LaserScan {
    let mut walls = dock_walls(dock_in_scan);
    walls.push(clutter_wall());
    cast_scan(frame_id, &walls)
}

/// Angular distance between two headings.
pub fn angle_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(2.0 * PI);
    d.min(2.0 * PI - d)
}
