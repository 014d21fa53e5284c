//! Color range thresholding
//!
//! Turns a multi-channel grid into a [`Mask`]: a pixel is foreground only
//! when every channel lies inside its inclusive bound.

use crate::{ColorError, ColorResult};
use blobcount_core::{BACKGROUND, FOREGROUND, Mask, PixelGrid};
use log::debug;
use rayon::prelude::*;

/// Inclusive per-channel bounds
///
/// Constructed once from configuration and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRange {
    lower: Vec<u8>,
    upper: Vec<u8>,
}

impl ColorRange {
    /// Create a range from per-channel lower and upper bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidRange`] if the bound lists differ in
    /// length, are empty, or if any `lower[i] > upper[i]`.
    pub fn new(lower: Vec<u8>, upper: Vec<u8>) -> ColorResult<Self> {
        if lower.is_empty() {
            return Err(ColorError::InvalidRange("no channel bounds".into()));
        }
        if lower.len() != upper.len() {
            return Err(ColorError::InvalidRange(format!(
                "{} lower bounds but {} upper bounds",
                lower.len(),
                upper.len()
            )));
        }
        if let Some(i) = (0..lower.len()).find(|&i| lower[i] > upper[i]) {
            return Err(ColorError::InvalidRange(format!(
                "channel {i}: lower {} > upper {}",
                lower[i], upper[i]
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Number of channels this range constrains
    pub fn channels(&self) -> u32 {
        self.lower.len() as u32
    }

    pub fn lower(&self) -> &[u8] {
        &self.lower
    }

    pub fn upper(&self) -> &[u8] {
        &self.upper
    }

    /// Check whether every channel of `pixel` lies inside its bound.
    #[inline]
    pub fn contains(&self, pixel: &[u8]) -> bool {
        pixel
            .iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

/// Threshold a grid against an inclusive color range
///
/// # Errors
///
/// - [`ColorError::EmptyGrid`] if the grid has no pixels
/// - [`ColorError::ChannelCountMismatch`] if the range does not declare
///   exactly one bound per grid channel
pub fn threshold(grid: &PixelGrid, range: &ColorRange) -> ColorResult<Mask> {
    if grid.is_empty() {
        return Err(ColorError::empty(grid.width(), grid.height()));
    }
    if range.channels() != grid.channels() {
        return Err(ColorError::ChannelCountMismatch {
            grid: grid.channels(),
            range: range.channels(),
        });
    }

    let channels = grid.channels() as usize;
    let width = grid.width() as usize;
    let mut out = vec![BACKGROUND; width * grid.height() as usize];

    out.par_chunks_mut(width)
        .zip(grid.data().par_chunks(grid.row_len()))
        .for_each(|(dst, src)| {
            for (d, px) in dst.iter_mut().zip(src.chunks_exact(channels)) {
                if range.contains(px) {
                    *d = FOREGROUND;
                }
            }
        });

    let mask = Mask::from_samples(grid.width(), grid.height(), out)?;
    debug!(
        "threshold {}x{}: {} foreground pixels",
        grid.width(),
        grid.height(),
        mask.count_foreground()
    );
    Ok(mask)
}
