//! blobcount-test - Regression test framework for blobcount
//!
//! This crate provides a small regression harness and synthetic fixtures.
//! Checks are numbered and keep running after a failure, so a single run
//! reports every mismatch:
//!
//! - **Compare**: run the checks and report failures (default)
//! - **Display**: also dump every compared mask to stderr
//!
//! # Usage
//!
//! ```ignore
//! use blobcount_test::{RegParams, mask_from_rows};
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode, render_mask};

use blobcount_core::{Mask, PixelGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a mask from rows of 'x' (foreground) and '.' (background)
///
/// ```
/// let mask = blobcount_test::mask_from_rows(&["x.", ".x"]).unwrap();
/// assert_eq!(mask.count_foreground(), 2);
/// ```
pub fn mask_from_rows(rows: &[&str]) -> TestResult<Mask> {
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut bits = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != width {
            return Err(TestError::RaggedFixture {
                row: y,
                expected: width,
                actual: len,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            match ch {
                'x' => bits.push(true),
                '.' => bits.push(false),
                ch => return Err(TestError::InvalidFixtureChar { ch, x, y }),
            }
        }
    }
    Ok(Mask::from_bools(width as u32, rows.len() as u32, &bits)?)
}

/// Seeded random mask where each pixel is foreground with probability `density`
pub fn random_mask(width: u32, height: u32, density: f64, seed: u64) -> Mask {
    let mut rng = StdRng::seed_from_u64(seed);
    Mask::from_fn(width, height, |_, _| rng.random_bool(density))
}

/// Paint a solid rectangle of `pixel` into `grid`, clipped to its bounds
pub fn paint_rect(grid: &mut PixelGrid, x: u32, y: u32, w: u32, h: u32, pixel: &[u8]) {
    let x_end = (x + w).min(grid.width());
    let y_end = (y + h).min(grid.height());
    for py in y..y_end {
        for px in x..x_end {
            // Clipped coordinates are always in bounds
            let _ = grid.set_pixel(px, py, pixel);
        }
    }
}
