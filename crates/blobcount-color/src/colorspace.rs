//! Color space conversion
//!
//! Provides conversion between the color encodings a blob counter sees:
//! - RGB <-> BGR (channel order swap)
//! - RGB/BGR <-> HSV (Hue, Saturation, Value)
//! - RGB/BGR/HSV -> Grayscale
//!
//! # 8-bit HSV layout
//!
//! HSV grids store hue in half-degrees so that it fits a byte:
//! `H = hue_degrees / 2` in `[0, 180)`, while `S` and `V` span `[0, 255]`.

use crate::{ColorError, ColorResult};
use blobcount_core::PixelGrid;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Color encoding of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red
    Bgr,
    /// Hue (half-degrees), saturation, value
    Hsv,
    /// Single luma channel
    Gray,
}

impl ColorSpace {
    /// Number of channels a grid in this space carries
    pub fn channels(self) -> u32 {
        match self {
            ColorSpace::Rgb | ColorSpace::Bgr | ColorSpace::Hsv => 3,
            ColorSpace::Gray => 1,
        }
    }
}

/// HSV color representation
///
/// - `h`: Hue in range [0.0, 1.0) (where 1.0 wraps to 0.0)
/// - `s`: Saturation in range [0.0, 1.0]
/// - `v`: Value in range [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Encode as 8-bit `[H, S, V]` with hue in half-degrees.
    pub fn to_bytes(self) -> [u8; 3] {
        let h = (self.h * 180.0).round() as u32 % 180;
        [
            h as u8,
            (self.s * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.v * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Decode 8-bit `[H, S, V]` with hue in half-degrees.
    pub fn from_bytes(hsv: [u8; 3]) -> Self {
        Self {
            h: (hsv[0] % 180) as f32 / 180.0,
            s: hsv[1] as f32 / 255.0,
            v: hsv[2] as f32 / 255.0,
        }
    }
}

/// Convert RGB to grayscale using ITU-R BT.601 coefficients
///
/// Formula: gray = 0.299*R + 0.587*G + 0.114*B
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Convert RGB values to HSV
///
/// Returns HSV with all components in range [0.0, 1.0]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let v = max as f32 / 255.0;
    if max == 0 || delta == 0.0 {
        return Hsv::new(0.0, 0.0, v);
    }
    let s = delta / max as f32;

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let degrees = if max as f32 == r {
        60.0 * (g - b) / delta
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

    Hsv::new(degrees / 360.0, s, v)
}

/// Convert HSV values to RGB
///
/// Input HSV should have all components in range [0.0, 1.0]
pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let v = hsv.v * 255.0;
    if hsv.s <= 0.0 {
        let v = v.round() as u8;
        return (v, v, v);
    }

    let h = (hsv.h.rem_euclid(1.0)) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - hsv.s);
    let q = v * (1.0 - hsv.s * f);
    let t = v * (1.0 - hsv.s * (1.0 - f));

    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    (
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    )
}

type PixelOp = fn(&[u8], &mut [u8]);

fn copy_px(src: &[u8], dst: &mut [u8]) {
    dst.copy_from_slice(src);
}

fn swap_rb_px(src: &[u8], dst: &mut [u8]) {
    dst[0] = src[2];
    dst[1] = src[1];
    dst[2] = src[0];
}

fn rgb_to_hsv_px(src: &[u8], dst: &mut [u8]) {
    dst.copy_from_slice(&rgb_to_hsv(src[0], src[1], src[2]).to_bytes());
}

fn bgr_to_hsv_px(src: &[u8], dst: &mut [u8]) {
    dst.copy_from_slice(&rgb_to_hsv(src[2], src[1], src[0]).to_bytes());
}

fn hsv_to_rgb_px(src: &[u8], dst: &mut [u8]) {
    let (r, g, b) = hsv_to_rgb(Hsv::from_bytes([src[0], src[1], src[2]]));
    dst.copy_from_slice(&[r, g, b]);
}

fn hsv_to_bgr_px(src: &[u8], dst: &mut [u8]) {
    let (r, g, b) = hsv_to_rgb(Hsv::from_bytes([src[0], src[1], src[2]]));
    dst.copy_from_slice(&[b, g, r]);
}

fn rgb_to_gray_px(src: &[u8], dst: &mut [u8]) {
    dst[0] = rgb_to_gray(src[0], src[1], src[2]);
}

fn bgr_to_gray_px(src: &[u8], dst: &mut [u8]) {
    dst[0] = rgb_to_gray(src[2], src[1], src[0]);
}

fn hsv_to_gray_px(src: &[u8], dst: &mut [u8]) {
    let (r, g, b) = hsv_to_rgb(Hsv::from_bytes([src[0], src[1], src[2]]));
    dst[0] = rgb_to_gray(r, g, b);
}

fn pixel_op(from: ColorSpace, to: ColorSpace) -> Option<PixelOp> {
    use ColorSpace::*;
    let op: PixelOp = match (from, to) {
        (Rgb, Rgb) | (Bgr, Bgr) | (Hsv, Hsv) | (Gray, Gray) => copy_px,
        (Rgb, Bgr) | (Bgr, Rgb) => swap_rb_px,
        (Rgb, Hsv) => rgb_to_hsv_px,
        (Bgr, Hsv) => bgr_to_hsv_px,
        (Hsv, Rgb) => hsv_to_rgb_px,
        (Hsv, Bgr) => hsv_to_bgr_px,
        (Rgb, Gray) => rgb_to_gray_px,
        (Bgr, Gray) => bgr_to_gray_px,
        (Hsv, Gray) => hsv_to_gray_px,
        (Gray, _) => return None,
    };
    Some(op)
}

/// Convert a grid from one color space to another
///
/// The output keeps the input's width and height and carries
/// `to.channels()` channels. The input is never modified.
///
/// # Errors
///
/// - [`ColorError::EmptyGrid`] if the grid has no pixels
/// - [`ColorError::InvalidChannelCount`] if the grid does not carry
///   `from.channels()` channels
/// - [`ColorError::UnsupportedConversion`] for conversions out of grayscale
pub fn convert(grid: &PixelGrid, from: ColorSpace, to: ColorSpace) -> ColorResult<PixelGrid> {
    if grid.is_empty() {
        return Err(ColorError::empty(grid.width(), grid.height()));
    }
    if grid.channels() != from.channels() {
        return Err(ColorError::InvalidChannelCount {
            space: from,
            expected: from.channels(),
            actual: grid.channels(),
        });
    }
    let op = pixel_op(from, to).ok_or(ColorError::UnsupportedConversion { from, to })?;

    let in_channels = from.channels() as usize;
    let out_channels = to.channels() as usize;
    let mut out = PixelGrid::new(grid.width(), grid.height(), to.channels())?;
    let src_row = grid.row_len();
    let dst_row = out.row_len();

    out.data_mut()
        .par_chunks_mut(dst_row)
        .zip(grid.data().par_chunks(src_row))
        .for_each(|(dst, src)| {
            for (d, s) in dst
                .chunks_exact_mut(out_channels)
                .zip(src.chunks_exact(in_channels))
            {
                op(s, d);
            }
        });

    debug!(
        "convert {:?} -> {:?}: {}x{}",
        from,
        to,
        grid.width(),
        grid.height()
    );
    Ok(out)
}

/// Extract one channel of a grid as a single-channel grid
///
/// # Errors
///
/// Returns [`ColorError::EmptyGrid`] for an empty grid and
/// [`ColorError::Core`] if `channel` is out of range.
pub fn extract_channel(grid: &PixelGrid, channel: u32) -> ColorResult<PixelGrid> {
    if grid.is_empty() {
        return Err(ColorError::empty(grid.width(), grid.height()));
    }
    if channel >= grid.channels() {
        return Err(blobcount_core::Error::IndexOutOfBounds {
            x: 0,
            y: 0,
            channel,
            width: grid.width(),
            height: grid.height(),
            channels: grid.channels(),
        }
        .into());
    }
    let data = grid.pixels().map(|px| px[channel as usize]).collect();
    Ok(PixelGrid::from_vec(grid.width(), grid.height(), 1, data)?)
}
