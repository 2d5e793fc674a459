//! Main NilayaConfig and loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigLoadError;
use super::perception::PerceptionSection;
use super::segmentation::SegmentationSection;

/// Full nilaya configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct NilayaConfig {
    /// Segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationSection,

    /// Perception settings
    #[serde(default)]
    pub perception: PerceptionSection,
}

impl NilayaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/nilaya.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/nilaya.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = NilayaConfig::default();
        assert_eq!(config.segmentation.distance_threshold, 0.04);
        assert_eq!(config.segmentation.min_points, 25);
        assert_eq!(config.segmentation.max_points, 400);
        assert_eq!(config.perception.icp_min_score, 0.01);
        assert_eq!(config.perception.icp_max_iter, 300);
        assert!(!config.perception.enable_debug);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "segmentation:\n  min_points: 5\nperception:\n  enable_debug: true\n";
        let config = NilayaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.segmentation.min_points, 5);
        assert_eq!(config.segmentation.max_width, 1.0);
        assert!(config.perception.enable_debug);
        assert_eq!(config.perception.icp_max_corr_dis, 0.25);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = NilayaConfig::default();
        config.perception.dock_template_path = "dock.pcd".to_string();
        let yaml = config.to_yaml().unwrap();
        let parsed = NilayaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "perception:\n  icp_min_score: 0.05").unwrap();
        let config = NilayaConfig::load(file.path()).unwrap();
        assert_eq!(config.perception.icp_min_score, 0.05);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = NilayaConfig::from_yaml("segmentation: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NilayaConfig::load(Path::new("/nonexistent/nilaya.yaml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }
}
