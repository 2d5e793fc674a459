//! Error types for nilaya.
//!
//! Only configuration problems surface as errors. Expected negative outcomes of
//! a detection pass (no candidates, non-converged alignment, missing frame
//! transform) are reported through [`DetectionOutcome`](crate::DetectionOutcome).

use crate::config::ConfigLoadError;
use crate::transforms::TransformError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// nilaya error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Template path was not configured
    #[error("Couldn't load the dock from an empty file path")]
    EmptyTemplatePath,

    /// Template file contained no points
    #[error("Dock template has no points")]
    EmptyTemplate,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed PCD file
    #[error("PCD error at line {line}: {message}")]
    Pcd {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    /// Frame transform lookup failed
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}
