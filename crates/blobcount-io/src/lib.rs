//! blobcount-io - Image acquisition and diagnostic export
//!
//! Decoding and encoding are delegated to the `image` crate; this crate
//! only moves pixels between `image` buffers and blobcount containers.
//!
//! - [`read_image`] / [`decode_image`] produce a 3-channel RGB [`PixelGrid`]
//! - [`mask_to_image`] / [`labels_to_image`] / [`write_mask`] export stage
//!   outputs for visual inspection

mod error;

pub use error::{IoError, IoResult};

use blobcount_core::{LabelMap, Mask, PixelGrid};
use image::{GrayImage, RgbImage};
use log::debug;
use std::path::Path;

/// Read an image file into a 3-channel RGB grid
///
/// Any format the `image` crate can decode is accepted; alpha is dropped
/// and grayscale inputs are expanded to RGB.
pub fn read_image(path: impl AsRef<Path>) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    let img = image::open(path).map_err(IoError::Decode)?;
    debug!(
        "read_image {}: {}x{} {:?}",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    grid_from_rgb_image(&img.to_rgb8())
}

/// Decode an in-memory encoded image into a 3-channel RGB grid
pub fn decode_image(bytes: &[u8]) -> IoResult<PixelGrid> {
    let img = image::load_from_memory(bytes).map_err(IoError::Decode)?;
    grid_from_rgb_image(&img.to_rgb8())
}

/// Copy an `image` RGB buffer into a grid
pub fn grid_from_rgb_image(img: &RgbImage) -> IoResult<PixelGrid> {
    Ok(PixelGrid::from_vec(
        img.width(),
        img.height(),
        3,
        img.as_raw().clone(),
    )?)
}

/// Copy a mask into an 8-bit grayscale image (0 / 255)
pub fn mask_to_image(mask: &Mask) -> IoResult<GrayImage> {
    let (width, height) = mask.dimensions();
    GrayImage::from_raw(width, height, mask.data().to_vec())
        .ok_or(IoError::InvalidDimension { width, height })
}

/// Render a label map as grayscale, spreading labels over 1..=255
///
/// Background stays black; label `max` maps to white.
pub fn labels_to_image(labels: &LabelMap) -> IoResult<GrayImage> {
    let (width, height) = labels.dimensions();
    let span = labels.max_label().saturating_sub(1) as u64;
    let data = labels
        .labels()
        .iter()
        .map(|&l| match l {
            0 => 0,
            _ if span == 0 => 255,
            _ => (1 + (l as u64 - 1) * 254 / span) as u8,
        })
        .collect();
    GrayImage::from_raw(width, height, data).ok_or(IoError::InvalidDimension { width, height })
}

/// Write a mask to disk; the format follows the file extension
pub fn write_mask(mask: &Mask, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    mask_to_image(mask)?
        .save(path)
        .map_err(|source| IoError::Encode {
            path: path.display().to_string(),
            source,
        })
}
