//! nilaya-dock - one-shot dock detection and template capture.
//!
//! Usage:
//!   nilaya-dock detect --config configs/nilaya.yaml --scan scan.yaml --estimate 1.0,0.0,0.0
//!   nilaya-dock detect -c configs/nilaya.yaml -s scan.yaml -e 1.0,0.0,3.14 --sensor-pose 0.2,0,0
//!   nilaya-dock capture --config configs/nilaya.yaml --scan scan.yaml --output dock.pcd
//!
//! Scans are YAML documents with `frame_id`, `angle_min`, `angle_increment`,
//! `range_min`, `range_max` and `ranges`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{error, info};

use nilaya::io::save_template;
use nilaya::segmentation::Segmentation;
use nilaya::transforms::StaticTransformTree;
use nilaya::{ConfigHandle, DetectedDockPose, DockPerception, LaserScan, NilayaConfig, Pose2D};

/// Docking station detection from 2D laser scans
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one detection pass on a recorded scan
    Detect {
        /// Configuration file path
        #[arg(short, long, default_value = "configs/nilaya.yaml")]
        config: PathBuf,

        /// Scan YAML file
        #[arg(short, long)]
        scan: PathBuf,

        /// Initial dock estimate as x,y,theta
        #[arg(short, long, value_parser = parse_pose, allow_hyphen_values = true)]
        estimate: Pose2D,

        /// Frame of the initial estimate
        #[arg(short, long, default_value = "map")]
        frame: String,

        /// Pose of the scan frame in the estimate frame as x,y,theta
        #[arg(long, value_parser = parse_pose, allow_hyphen_values = true)]
        sensor_pose: Option<Pose2D>,
    },

    /// Save the closest filtered segment of a scan as a new dock template
    Capture {
        /// Configuration file path
        #[arg(short, long, default_value = "configs/nilaya.yaml")]
        config: PathBuf,

        /// Scan YAML file
        #[arg(short, long)]
        scan: PathBuf,

        /// Output PCD file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn parse_pose(s: &str) -> Result<Pose2D, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f32>().map_err(|e| format!("'{}': {}", v.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        [x, y, theta] => Ok(Pose2D::new(*x, *y, *theta)),
        _ => Err(format!("expected x,y,theta, got {} values", values.len())),
    }
}

fn load_config(path: &Path) -> NilayaConfig {
    if !path.exists() {
        info!("Config not found at {}, using defaults", path.display());
        return NilayaConfig::default();
    }
    NilayaConfig::load(path).unwrap_or_else(|e| {
        error!("Failed to load config {}: {}", path.display(), e);
        process::exit(1);
    })
}

fn load_scan(path: &Path) -> LaserScan {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        error!("Failed to read scan {}: {}", path.display(), e);
        process::exit(1);
    });
    serde_yaml::from_str(&contents).unwrap_or_else(|e| {
        error!("Failed to parse scan {}: {}", path.display(), e);
        process::exit(1);
    })
}

fn run_detect(
    config_path: &Path,
    scan_path: &Path,
    estimate: Pose2D,
    frame: &str,
    sensor_pose: Option<Pose2D>,
) {
    let config = ConfigHandle::new(load_config(config_path));
    let mut scan = load_scan(scan_path);
    if scan.frame_id.is_empty() {
        scan.frame_id = "laser".to_string();
    }

    let tree = Arc::new(StaticTransformTree::new());
    tree.set_transform(frame, &scan.frame_id, sensor_pose.unwrap_or_default());

    let base_dir = config_path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut perception = DockPerception::from_config(config, tree, base_dir).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    perception.set_initial_estimate(estimate, frame);

    let mut last_dock = DetectedDockPose::new();
    let outcome = perception.get_dock_pose(&scan, &mut last_dock);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match (&outcome.pose, outcome.fresh) {
        (Some(pose), true) => {
            writeln!(
                out,
                "dock: x={:.4} y={:.4} theta={:.4} frame={}",
                pose.data.x, pose.data.y, pose.data.theta, pose.frame_id
            )
            .ok();
        }
        _ => {
            writeln!(out, "dock: not detected").ok();
            process::exit(2);
        }
    }
}

fn run_capture(config_path: &Path, scan_path: &Path, output: &Path) {
    let config = load_config(config_path);
    let scan = load_scan(scan_path);

    let segmentation = Segmentation::new(config.segmentation.clone());
    let segments = segmentation.filter(&segmentation.perform(&scan));
    info!("{} segments survive filtering", segments.len());

    let Some(closest) = segments
        .iter()
        .min_by(|a, b| a.centroid_length().total_cmp(&b.centroid_length()))
    else {
        error!("No segment in {} passes the filter", scan_path.display());
        process::exit(1);
    };

    if let Err(e) = save_template(output, &closest.to_cloud()) {
        error!("{}", e);
        process::exit(1);
    }
    info!(
        "Captured {} points ({:.3} m wide) to {}",
        closest.len(),
        closest.width(),
        output.display()
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::Detect {
            config,
            scan,
            estimate,
            frame,
            sensor_pose,
        } => run_detect(&config, &scan, estimate, &frame, sensor_pose),
        Command::Capture {
            config,
            scan,
            output,
        } => run_capture(&config, &scan, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_pose() {
        let pose = parse_pose("1.5, -0.25,0.1").unwrap();
        assert_relative_eq!(pose.x, 1.5);
        assert_relative_eq!(pose.y, -0.25);
        assert_relative_eq!(pose.theta, 0.1);
    }

    #[test]
    fn test_parse_pose_rejects_bad_input() {
        assert!(parse_pose("1.0,2.0").is_err());
        assert!(parse_pose("a,b,c").is_err());
    }

    #[test]
    fn test_cli_parses_detect() {
        let args = Args::try_parse_from([
            "nilaya-dock",
            "detect",
            "--scan",
            "scan.yaml",
            "--estimate",
            "-1,0,0",
        ])
        .unwrap();
        match args.command {
            Command::Detect { estimate, frame, .. } => {
                assert_relative_eq!(estimate.x, -1.0);
                assert_eq!(frame, "map");
            }
            Command::Capture { .. } => panic!("expected detect"),
        }
    }
}
