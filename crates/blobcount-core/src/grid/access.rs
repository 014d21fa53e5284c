//! Pixel access functions
//!
//! Bounds-checked getters and setters for single pixels, single samples
//! and whole rows.

use super::PixelGrid;
use crate::error::{Error, Result};

impl PixelGrid {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * self.channels as usize)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, x: u32, y: u32, channel: u32) -> Error {
        Error::IndexOutOfBounds {
            x,
            y,
            channel,
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    /// Get all channel samples of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let start = self.offset(x, y)?;
        Some(&self.data[start..start + self.channels as usize])
    }

    /// Get one channel sample of the pixel at (x, y).
    pub fn get_sample(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        if channel >= self.channels {
            return None;
        }
        let start = self.offset(x, y)?;
        Some(self.data[start + channel as usize])
    }

    /// Overwrite the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds and
    /// [`Error::DataLengthMismatch`] if `values.len()` differs from the channel count.
    pub fn set_pixel(&mut self, x: u32, y: u32, values: &[u8]) -> Result<()> {
        let start = self
            .offset(x, y)
            .ok_or_else(|| self.out_of_bounds(x, y, 0))?;
        if values.len() != self.channels as usize {
            return Err(Error::DataLengthMismatch {
                expected: self.channels as usize,
                actual: values.len(),
            });
        }
        self.data[start..start + values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Overwrite one channel sample of the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for a bad coordinate or channel.
    pub fn set_sample(&mut self, x: u32, y: u32, channel: u32, value: u8) -> Result<()> {
        if channel >= self.channels {
            return Err(self.out_of_bounds(x, y, channel));
        }
        let start = self
            .offset(x, y)
            .ok_or_else(|| self.out_of_bounds(x, y, channel))?;
        self.data[start + channel as usize] = value;
        Ok(())
    }

    /// Get the samples of row `y`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let len = self.row_len();
        let start = y as usize * len;
        Some(&self.data[start..start + len])
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.channels as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let mut grid = PixelGrid::new(3, 2, 3).unwrap();
        grid.set_pixel(2, 1, &[1, 2, 3]).unwrap();
        assert_eq!(grid.get_pixel(2, 1), Some(&[1u8, 2, 3][..]));
        assert_eq!(grid.get_sample(2, 1, 1), Some(2));
        assert_eq!(grid.get_pixel(3, 1), None);
        assert_eq!(grid.get_sample(0, 0, 3), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut grid = PixelGrid::new(3, 2, 1).unwrap();
        assert!(matches!(
            grid.set_pixel(0, 2, &[1]),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            grid.set_pixel(0, 0, &[1, 2]),
            Err(Error::DataLengthMismatch { .. })
        ));
        assert!(matches!(
            grid.set_sample(0, 0, 1, 9),
            Err(Error::IndexOutOfBounds { channel: 1, .. })
        ));
    }

    #[test]
    fn test_row() {
        let grid = PixelGrid::from_vec(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.row(0), Some(&[1u8, 2][..]));
        assert_eq!(grid.row(1), Some(&[3u8, 4][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn test_pixels() {
        let grid = PixelGrid::from_vec(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let pixels: Vec<&[u8]> = grid.pixels().collect();
        assert_eq!(pixels, vec![&[1u8, 2, 3][..], &[4u8, 5, 6][..]]);
        assert_eq!(PixelGrid::new(0, 4, 2).unwrap().pixels().count(), 0);
    }
}
