//! Template persistence and detector construction from configuration.

mod common;

use std::sync::Arc;

use approx::assert_relative_eq;

use common::*;
use nilaya::io::{load_template, save_template};
use nilaya::transforms::StaticTransformTree;
use nilaya::{ConfigHandle, DockPerception, Error, NilayaConfig};

#[test]
fn test_save_then_build_detector_from_config() {
    let dir = tempfile::tempdir().unwrap();
    save_template(&dir.path().join("dock.pcd"), &v_template_cloud()).unwrap();

    let config_path = dir.path().join("nilaya.yaml");
    std::fs::write(
        &config_path,
        "perception:\n  icp_min_score: 0.02\n  dock_template_path: dock.pcd\n",
    )
    .unwrap();
    let config = NilayaConfig::load(&config_path).unwrap();
    assert_relative_eq!(config.perception.icp_min_score, 0.02);

    let perception = DockPerception::from_config(
        ConfigHandle::new(config),
        Arc::new(StaticTransformTree::new()),
        Some(dir.path()),
    )
    .unwrap();

    assert_eq!(perception.template().len(), 51);
    assert_relative_eq!(perception.template().width(), 0.5, epsilon = 1e-5);
}

#[test]
fn test_empty_template_path_is_fatal() {
    let result = DockPerception::from_config(
        ConfigHandle::new(NilayaConfig::default()),
        Arc::new(StaticTransformTree::new()),
        None,
    );
    assert!(matches!(result, Err(Error::EmptyTemplatePath)));
}

#[test]
fn test_missing_template_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_template(&dir.path().join("absent.pcd")),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_bundled_template_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/dock.pcd");
    let template = load_template(&path).unwrap();
    assert_eq!(template.len(), 51);
    assert_relative_eq!(template.width(), 0.5, epsilon = 1e-4);
}

#[test]
fn test_bundled_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/nilaya.yaml");
    let config = NilayaConfig::load(&path).unwrap();
    let defaults = NilayaConfig::default();
    assert_eq!(config.segmentation, defaults.segmentation);
    assert_relative_eq!(config.perception.icp_min_score, defaults.perception.icp_min_score);
    assert_eq!(config.perception.icp_max_iter, defaults.perception.icp_max_iter);
    assert_eq!(config.perception.dock_template_path, "dock.pcd");
}
