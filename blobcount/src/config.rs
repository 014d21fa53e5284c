//! Pipeline configuration
//!
//! Configuration is plain data deserialized from JSON. Nothing is
//! validated here; [`crate::Pipeline::from_config`] resolves the values
//! into stage parameters and reports the first one that is rejected.

use crate::error::{PipelineError, PipelineResult};
use blobcount_color::ColorSpace;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete description of one counting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Space the input pixels are encoded in
    #[serde(default = "default_source_space")]
    pub source_space: ColorSpace,
    /// Space the threshold range is expressed in
    #[serde(default = "default_target_space")]
    pub target_space: ColorSpace,
    pub range: RangeConfig,
    pub erosion: SelConfig,
    pub dilation: SelConfig,
    /// Neighborhood used for labeling, 4 or 8
    #[serde(default = "default_connectivity")]
    pub connectivity: u32,
    /// Ground-truth count for the accuracy figure
    #[serde(default)]
    pub expected_count: Option<i64>,
    /// Drop components smaller than this many pixels
    #[serde(default)]
    pub min_area: Option<u32>,
    /// Drop components larger than this many pixels
    #[serde(default)]
    pub max_area: Option<u32>,
    /// Return the intermediate grids and masks with the result
    #[serde(default)]
    pub keep_stages: bool,
}

/// Inclusive per-channel bounds in the target space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub lower: Vec<u8>,
    pub upper: Vec<u8>,
}

/// Brick structuring element and how many times to apply it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelConfig {
    pub width: u32,
    pub height: u32,
    /// Origin inside the brick; defaults to the center
    #[serde(default)]
    pub anchor: Option<[u32; 2]>,
    #[serde(default = "default_iterations")]
    pub iterations: i32,
}

impl SelConfig {
    /// A centered brick applied `iterations` times
    pub fn brick(width: u32, height: u32, iterations: i32) -> Self {
        Self {
            width,
            height,
            anchor: None,
            iterations,
        }
    }
}

fn default_source_space() -> ColorSpace {
    ColorSpace::Rgb
}

fn default_target_space() -> ColorSpace {
    ColorSpace::Hsv
}

fn default_connectivity() -> u32 {
    8
}

fn default_iterations() -> i32 {
    1
}

/// Load a pipeline configuration from a JSON file
pub fn load_config(path: impl AsRef<Path>) -> PipelineResult<PipelineConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| PipelineError::Json {
        path: path.display().to_string(),
        source,
    })
}
