//! Binary masks
//!
//! A [`Mask`] is a single-channel [`PixelGrid`] whose samples are either
//! [`BACKGROUND`] or [`FOREGROUND`]. The constructors enforce that
//! invariant, so downstream stages can test `!= 0` without re-validating.

use crate::error::{Error, Result};
use crate::grid::PixelGrid;

/// Sample value for background pixels
pub const BACKGROUND: u8 = 0;
/// Sample value for foreground pixels
pub const FOREGROUND: u8 = 255;

/// Single-channel background/foreground grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    grid: PixelGrid,
}

impl Mask {
    /// Create an all-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: PixelGrid {
                width,
                height,
                channels: 1,
                data: vec![BACKGROUND; width as usize * height as usize],
            },
        }
    }

    /// Build a mask from one boolean per pixel in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if `bits.len() != width * height`.
    pub fn from_bools(width: u32, height: u32, bits: &[bool]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if bits.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: bits.len(),
            });
        }
        let data = bits
            .iter()
            .map(|&on| if on { FOREGROUND } else { BACKGROUND })
            .collect();
        Ok(Self {
            grid: PixelGrid {
                width,
                height,
                channels: 1,
                data,
            },
        })
    }

    /// Wrap a single-channel grid whose samples are all 0 or 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if the grid has more than one
    /// channel and [`Error::InvalidMaskValue`] for the first other sample.
    pub fn from_grid(grid: PixelGrid) -> Result<Self> {
        if grid.channels() != 1 {
            return Err(Error::InvalidChannelCount(grid.channels()));
        }
        let width = grid.width().max(1) as usize;
        if let Some((i, &value)) = grid
            .data()
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != BACKGROUND && v != FOREGROUND)
        {
            return Err(Error::InvalidMaskValue {
                x: (i % width) as u32,
                y: (i / width) as u32,
                value,
            });
        }
        Ok(Self { grid })
    }

    /// Wrap a buffer already known to hold only 0 / 255.
    ///
    /// Used by stages that compute the buffer themselves.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            grid: PixelGrid {
                width,
                height,
                channels: 1,
                data,
            },
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(if f(x, y) { FOREGROUND } else { BACKGROUND });
            }
        }
        Self::from_raw(width, height, data)
    }

    /// Build a mask from a 0/255 buffer produced by a stage.
    ///
    /// # Errors
    ///
    /// Same as [`Mask::from_grid`].
    pub fn from_samples(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_grid(PixelGrid::from_vec(width, height, 1, data)?)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// Check whether the mask has no pixels.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Check whether (x, y) is foreground.
    ///
    /// Out-of-bounds coordinates read as background.
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.grid.get_sample(x, y, 0) == Some(FOREGROUND)
    }

    /// Mark (x, y) as foreground or background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, on: bool) -> Result<()> {
        self.grid
            .set_sample(x, y, 0, if on { FOREGROUND } else { BACKGROUND })
    }

    /// Number of foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.grid.data().iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// Check whether no pixel is foreground.
    pub fn is_all_background(&self) -> bool {
        self.grid.data().iter().all(|&v| v == BACKGROUND)
    }

    /// Check whether every foreground pixel of `self` is foreground in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the masks differ in size.
    pub fn is_subset_of(&self, other: &Mask) -> Result<bool> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(self
            .data()
            .iter()
            .zip(other.data())
            .all(|(&a, &b)| a == BACKGROUND || b == FOREGROUND))
    }

    /// Raw 0/255 sample buffer, one byte per pixel
    pub fn data(&self) -> &[u8] {
        self.grid.data()
    }
}
