//! blobcount-color - Color processing for blob counting
//!
//! This crate provides the first two pipeline stages:
//!
//! - **Color space conversion** ([`colorspace`]): RGB <-> BGR, RGB/BGR <-> HSV, -> Grayscale
//! - **Range thresholding** ([`threshold`]): per-channel inclusive bounds to a binary mask
//!
//! Both stages are pure per-pixel functions and run row-parallel.

pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use blobcount_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export color space types and functions
pub use colorspace::{
    // Types
    ColorSpace,
    Hsv,
    // Pixel-level conversions
    hsv_to_rgb,
    rgb_to_gray,
    rgb_to_hsv,
    // Grid-level conversions
    convert,
    extract_channel,
};

// Re-export threshold types and functions
pub use threshold::{ColorRange, threshold};
