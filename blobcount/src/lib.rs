//! blobcount - Count color-defined objects in raster images
//!
//! The pipeline converts an RGB grid to a target color space, thresholds
//! it against a per-channel range, cleans the mask with brick erosion and
//! dilation, and labels the connected components that remain:
//!
//! ```text
//! convert → threshold → erode → dilate → label → (size filter) → report
//! ```
//!
//! Stage crates are re-exported as modules; the pipeline itself lives here.
//!
//! # Example
//!
//! ```
//! use blobcount::{ColorSpace, PipelineConfig, PixelGrid, RangeConfig, SelConfig, count_objects};
//!
//! let mut grid = PixelGrid::filled(12, 12, &[0, 0, 0]).unwrap();
//! for y in 2..8 {
//!     for x in 2..8 {
//!         grid.set_pixel(x, y, &[255, 255, 255]).unwrap();
//!     }
//! }
//!
//! let config = PipelineConfig {
//!     source_space: ColorSpace::Rgb,
//!     target_space: ColorSpace::Gray,
//!     range: RangeConfig { lower: vec![128], upper: vec![255] },
//!     erosion: SelConfig::brick(3, 3, 1),
//!     dilation: SelConfig::brick(3, 3, 1),
//!     connectivity: 8,
//!     expected_count: Some(1),
//!     min_area: None,
//!     max_area: None,
//!     keep_stages: false,
//! };
//! let out = count_objects(&grid, &config).unwrap();
//! assert_eq!(out.report.count, 1);
//! assert_eq!(out.report.accuracy_percent, Some(100.0));
//! ```

mod config;
mod error;
mod pipeline;
mod report;

// Re-export core types (primary data structures used everywhere)
pub use blobcount_core::{BACKGROUND, Error, FOREGROUND, LabelMap, Mask, PixelGrid, Result};

// Re-export domain crates as modules to avoid name conflicts
pub use blobcount_color as color;
pub use blobcount_io as io;
pub use blobcount_morph as morph;
pub use blobcount_region as region;

pub use blobcount_color::ColorSpace;
pub use config::{PipelineConfig, RangeConfig, SelConfig, load_config};
pub use error::{ConfigError, PipelineError, PipelineResult};
pub use pipeline::{
    Pipeline, PipelineOutput, StageOutputs, count_batch, count_files, count_objects,
};
pub use report::{CountReport, report};
