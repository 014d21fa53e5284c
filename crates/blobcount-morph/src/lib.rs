//! blobcount-morph - Morphological operations for mask cleanup
//!
//! This crate provides:
//!
//! - Rectangular structuring elements ([`Sel`]) with a configurable anchor
//! - Binary erosion and dilation, iterated N times
//! - Opening (erosion then dilation) and closing (dilation then erosion)
//!
//! Pixels outside the mask are treated as background: erosion never
//! reaches past an edge and dilation is never triggered by one.

pub mod binary;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{close, dilate, erode, open};
