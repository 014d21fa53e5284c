//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for masks.
//!
//! A brick is separable: the window test over a `w x h` rectangle equals a
//! horizontal test over `w` columns followed by a vertical test over `h`
//! rows. Each pass keeps a running foreground count (row prefix sums for
//! the horizontal pass, column prefix sums for the vertical pass), so one
//! iteration costs O(width * height) regardless of the element size.
//!
//! Boundary handling is asymmetric in effect but uniform in rule: cells
//! outside the mask are background. Erosion therefore clears any pixel
//! whose window leaves the mask, while dilation simply ignores the
//! missing cells.

use crate::{MorphError, MorphResult, Sel};
use blobcount_core::{BACKGROUND, FOREGROUND, Mask};
use log::debug;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Every covered cell must be in bounds and foreground (erosion)
    All,
    /// At least one in-bounds covered cell must be foreground (dilation)
    Any,
}

impl Rule {
    /// Evaluate the window `[lo, hi)` over a line of `len` cells whose
    /// clamped foreground count is `count`.
    #[inline]
    fn holds(self, lo: i64, hi: i64, len: i64, count: u32) -> bool {
        match self {
            Rule::All => lo >= 0 && hi <= len && count as i64 == hi - lo,
            Rule::Any => count > 0,
        }
    }
}

#[inline]
fn clamp_window(lo: i64, hi: i64, len: i64) -> (usize, usize) {
    (lo.clamp(0, len) as usize, hi.clamp(0, len) as usize)
}

/// One erosion or dilation pass over a row-major 0/255 buffer.
fn brick_pass(src: &[u8], width: usize, height: usize, sel: &Sel, rule: Rule) -> Vec<u8> {
    let kw = sel.width() as i64;
    let kh = sel.height() as i64;
    let cx = sel.origin_x() as i64;
    let cy = sel.origin_y() as i64;

    // Horizontal pass
    let mut horiz = vec![BACKGROUND; width * height];
    horiz
        .par_chunks_mut(width)
        .zip(src.par_chunks(width))
        .for_each(|(dst, row)| {
            let mut prefix = Vec::with_capacity(width + 1);
            prefix.push(0u32);
            let mut acc = 0u32;
            for &v in row {
                acc += (v == FOREGROUND) as u32;
                prefix.push(acc);
            }
            for (x, d) in dst.iter_mut().enumerate() {
                let lo = x as i64 - cx;
                let hi = lo + kw;
                let (a, b) = clamp_window(lo, hi, width as i64);
                if rule.holds(lo, hi, width as i64, prefix[b] - prefix[a]) {
                    *d = FOREGROUND;
                }
            }
        });

    // Column prefix counts: cols[y * width + x] = foreground cells in rows [0, y)
    let mut cols = vec![0u32; (height + 1) * width];
    for y in 0..height {
        for x in 0..width {
            cols[(y + 1) * width + x] =
                cols[y * width + x] + (horiz[y * width + x] == FOREGROUND) as u32;
        }
    }

    // Vertical pass
    let mut out = vec![BACKGROUND; width * height];
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, dst)| {
            let lo = y as i64 - cy;
            let hi = lo + kh;
            let (a, b) = clamp_window(lo, hi, height as i64);
            for (x, d) in dst.iter_mut().enumerate() {
                let count = cols[b * width + x] - cols[a * width + x];
                if rule.holds(lo, hi, height as i64, count) {
                    *d = FOREGROUND;
                }
            }
        });

    out
}

fn check_args(mask: &Mask, iterations: i32) -> MorphResult<()> {
    if mask.is_empty() {
        let (width, height) = mask.dimensions();
        return Err(MorphError::EmptyGrid { width, height });
    }
    if iterations < 0 {
        return Err(MorphError::InvalidIterationCount(iterations));
    }
    Ok(())
}

fn iterate(mask: &Mask, sel: &Sel, iterations: i32, rule: Rule) -> MorphResult<Mask> {
    check_args(mask, iterations)?;

    let (w, h) = mask.dimensions();
    let mut data = mask.data().to_vec();
    for i in 0..iterations {
        let next = brick_pass(&data, w as usize, h as usize, sel, rule);
        // Further passes cannot change a fixed point
        if next == data {
            debug!("{rule:?} pass unchanged after {} iterations", i + 1);
            break;
        }
        data = next;
        // An empty mask is a fixed point of both operations
        if data.iter().all(|&v| v == BACKGROUND) {
            debug!("{rule:?} pass reached an empty mask after {} iterations", i + 1);
            break;
        }
    }
    Ok(Mask::from_samples(w, h, data)?)
}

/// Erode a mask with a brick, `iterations` times
///
/// Erosion shrinks foreground regions. An output pixel is foreground only
/// if every pixel covered by the element placed at it is foreground; a
/// window that leaves the mask never qualifies. Each iteration erodes the
/// previous iteration's output. Zero iterations return a copy.
///
/// # Errors
///
/// - [`MorphError::EmptyGrid`] if the mask has no pixels
/// - [`MorphError::InvalidIterationCount`] if `iterations < 0`
pub fn erode(mask: &Mask, sel: &Sel, iterations: i32) -> MorphResult<Mask> {
    let out = iterate(mask, sel, iterations, Rule::All)?;
    debug!(
        "erode {}x{} brick x{}: {} -> {} foreground pixels",
        sel.width(),
        sel.height(),
        iterations,
        mask.count_foreground(),
        out.count_foreground()
    );
    Ok(out)
}

/// Dilate a mask with a brick, `iterations` times
///
/// Dilation expands foreground regions. An output pixel is foreground if
/// any in-bounds pixel covered by the element placed at it is foreground.
///
/// # Errors
///
/// Same as [`erode`].
pub fn dilate(mask: &Mask, sel: &Sel, iterations: i32) -> MorphResult<Mask> {
    let out = iterate(mask, sel, iterations, Rule::Any)?;
    debug!(
        "dilate {}x{} brick x{}: {} -> {} foreground pixels",
        sel.width(),
        sel.height(),
        iterations,
        mask.count_foreground(),
        out.count_foreground()
    );
    Ok(out)
}

/// Open a mask
///
/// Opening = Erosion followed by Dilation, with the same element and count.
/// Removes foreground specks smaller than the element.
pub fn open(mask: &Mask, sel: &Sel, iterations: i32) -> MorphResult<Mask> {
    let eroded = erode(mask, sel, iterations)?;
    dilate(&eroded, sel, iterations)
}

/// Close a mask
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(mask: &Mask, sel: &Sel, iterations: i32) -> MorphResult<Mask> {
    let dilated = dilate(mask, sel, iterations)?;
    erode(&dilated, sel, iterations)
}
