//! Error types for blobcount-color

use crate::colorspace::ColorSpace;
use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),

    /// Grid has zero width or height
    #[error("empty grid: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    /// Grid channel count does not match the declared source space
    #[error("invalid channel count for {space:?}: expected {expected}, got {actual}")]
    InvalidChannelCount {
        space: ColorSpace,
        expected: u32,
        actual: u32,
    },

    /// Color range declares a different number of bounds than the grid has channels
    #[error("channel count mismatch: grid has {grid} channels, range has {range}")]
    ChannelCountMismatch { grid: u32, range: u32 },

    /// Malformed color range
    #[error("invalid color range: {0}")]
    InvalidRange(String),

    /// No conversion is defined between the two spaces
    #[error("unsupported conversion: {from:?} -> {to:?}")]
    UnsupportedConversion { from: ColorSpace, to: ColorSpace },
}

impl ColorError {
    pub(crate) fn empty(width: u32, height: u32) -> Self {
        ColorError::EmptyGrid { width, height }
    }
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
