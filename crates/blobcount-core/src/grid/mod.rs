//! PixelGrid - The main image container
//!
//! A `PixelGrid` stores `width * height * channels` unsigned 8-bit samples
//! in row-major order. Pixel `(x, y)` occupies the `channels` consecutive
//! samples starting at `(y * width + x) * channels`.
//!
//! # Ownership model
//!
//! Grids are plain owned values. A pipeline stage borrows its input and
//! returns a new grid, so no two stages ever alias the same buffer.

mod access;

use crate::error::{Error, Result};

/// Dense row-major grid of 8-bit samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) channels: u32,
    pub(crate) data: Vec<u8>,
}

impl PixelGrid {
    /// Create a zero-filled grid.
    ///
    /// A grid with zero width or height is allowed to exist; pipeline
    /// stages reject it on entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if `channels` is 0.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidChannelCount(channels));
        }
        let len = width as usize * height as usize * channels as usize;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; len],
        })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if `channels` is 0 and
    /// [`Error::DataLengthMismatch`] if `data.len() != width * height * channels`.
    pub fn from_vec(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidChannelCount(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a grid where every pixel holds the same sample values.
    ///
    /// The channel count is taken from `pixel.len()`.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self> {
        let mut grid = Self::new(width, height, pixel.len() as u32)?;
        for chunk in grid.data.chunks_exact_mut(pixel.len()) {
            chunk.copy_from_slice(pixel);
        }
        Ok(grid)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of channels per pixel
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Get `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples in one row
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Check whether the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw sample buffer
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw sample buffer
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let grid = PixelGrid::new(4, 3, 3).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.channels(), 3);
        assert_eq!(grid.data().len(), 36);
        assert!(grid.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_rejects_zero_channels() {
        assert_eq!(
            PixelGrid::new(4, 4, 0).unwrap_err(),
            Error::InvalidChannelCount(0)
        );
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = PixelGrid::from_vec(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            Error::DataLengthMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_filled() {
        let grid = PixelGrid::filled(2, 2, &[10, 20, 30]).unwrap();
        assert_eq!(grid.data(), &[10, 20, 30, 10, 20, 30, 10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = PixelGrid::new(0, 5, 1).unwrap();
        assert!(grid.is_empty());
        assert!(!PixelGrid::new(1, 1, 1).unwrap().is_empty());
    }
}
