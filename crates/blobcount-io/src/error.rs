//! Error types for blobcount-io

use thiserror::Error;

/// Errors that can occur while reading or writing images
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobcount_core::Error),

    /// The decoder rejected the input
    #[error("decode error: {0}")]
    Decode(#[source] image::ImageError),

    /// The encoder failed to write the output
    #[error("encode error for '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Image dimensions do not fit the target buffer
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
