//! Error types for the blobcount pipeline

use blobcount_color::ColorError;
use blobcount_io::IoError;
use blobcount_morph::MorphError;
use blobcount_region::RegionError;
use thiserror::Error;

/// Errors that can abort a pipeline run
///
/// Stage variants wrap the error of the stage that stopped the run, so the
/// failing stage is always visible in the message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("convert stage: {0}")]
    Convert(#[source] ColorError),

    #[error("threshold stage: {0}")]
    Threshold(#[source] ColorError),

    #[error("erode stage: {0}")]
    Erode(#[source] MorphError),

    #[error("dilate stage: {0}")]
    Dilate(#[source] MorphError),

    #[error("label stage: {0}")]
    Label(#[source] RegionError),

    #[error("filter stage: {0}")]
    Filter(#[source] RegionError),

    /// A configuration value was rejected while resolving the config
    #[error("invalid {parameter}: {source}")]
    Config {
        parameter: &'static str,
        source: ConfigError,
    },

    /// Configuration file could not be read
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Configuration file is not a valid pipeline config
    #[error("failed to parse config '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    /// Image acquisition failed
    #[error("image error: {0}")]
    Image(#[from] IoError),
}

/// Why a configuration value was rejected
///
/// Wraps the error of the stage constructor that refused the value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Range(#[from] ColorError),

    #[error(transparent)]
    Sel(#[from] MorphError),

    #[error(transparent)]
    Connectivity(#[from] RegionError),

    /// Size filter bounds out of order
    #[error("min_area {min_area} > max_area {max_area}")]
    AreaBounds { min_area: u32, max_area: u32 },
}

impl PipelineError {
    pub(crate) fn config(parameter: &'static str, err: impl Into<ConfigError>) -> Self {
        PipelineError::Config {
            parameter,
            source: err.into(),
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
