//! Error types for blobcount-core
//!
//! Provides the error type shared by the grid, mask and label map
//! containers. Stage crates wrap it with `#[from]` in their own enums.

use thiserror::Error;

/// blobcount-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A grid must carry at least one channel
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u32),

    /// Buffer length does not match width * height * channels
    #[error("data length mismatch: expected {expected} samples, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Coordinate or channel index out of bounds
    #[error("index out of bounds: ({x}, {y}) channel {channel} in {width}x{height}x{channels}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        channel: u32,
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Mask sample is neither background (0) nor foreground (255)
    #[error("invalid mask value {value} at ({x}, {y})")]
    InvalidMaskValue { x: u32, y: u32, value: u8 },

    /// Two grids that must share dimensions do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Result type alias for blobcount-core operations
pub type Result<T> = std::result::Result<T, Error>;
