//! Error types for blobcount-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),

    /// Mask has zero width or height
    #[error("empty grid: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    /// Negative iteration count
    #[error("invalid iteration count: {0}")]
    InvalidIterationCount(i32),

    /// Structuring element with zero width or height
    #[error("degenerate structuring element: {width}x{height}")]
    DegenerateElement { width: u32, height: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
