//! Error types for blobcount-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),

    /// Mask has zero width or height
    #[error("empty grid: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    /// Connectivity other than 4 or 8
    #[error("invalid connectivity: {0} (expected 4 or 8)")]
    InvalidConnectivity(u32),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
