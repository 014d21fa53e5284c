//! blobcount-core - Basic data structures for blob counting
//!
//! This crate provides the containers every pipeline stage operates on:
//!
//! - [`PixelGrid`] - Dense row-major grid of 8-bit samples with a fixed channel count
//! - [`Mask`] - Single-channel grid restricted to background (0) / foreground (255)
//! - [`LabelMap`] - Per-pixel connected component labels
//!
//! Stages never mutate their input. Each one borrows the previous stage's
//! output and returns a freshly allocated container.

pub mod error;
pub mod grid;
pub mod label_map;
pub mod mask;

pub use error::{Error, Result};
pub use grid::PixelGrid;
pub use label_map::LabelMap;
pub use mask::{BACKGROUND, FOREGROUND, Mask};
