//! Counting pipeline
//!
//! convert → threshold → erode → dilate → label → (size filter) → report.
//! Each stage borrows its input and allocates its output, so the input
//! grid is never modified and intermediate results can be handed back to
//! the caller unchanged.

use crate::config::{PipelineConfig, SelConfig};
use crate::error::{ConfigError, PipelineError, PipelineResult};
use crate::report::{CountReport, report};
use blobcount_color::{ColorRange, ColorSpace, convert, threshold};
use blobcount_core::{LabelMap, Mask, PixelGrid};
use blobcount_io::read_image;
use blobcount_morph::{Sel, dilate, erode};
use blobcount_region::{ConnectivityType, filter_components_by_size, label_components};
use log::info;
use rayon::prelude::*;
use std::path::Path;

/// Intermediate results of a run, for visualization
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutputs {
    /// Input converted to the target space
    pub converted: PixelGrid,
    /// Threshold mask
    pub mask: Mask,
    pub eroded: Mask,
    pub dilated: Mask,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub report: CountReport,
    /// Final component labels, dense in `1..=report.count`
    pub labels: LabelMap,
    /// Present only when the config asked for `keep_stages`
    pub stages: Option<StageOutputs>,
}

#[derive(Debug, Clone)]
struct MorphStep {
    sel: Sel,
    iterations: i32,
}

impl MorphStep {
    fn resolve(config: &SelConfig, parameter: &'static str) -> PipelineResult<Self> {
        let sel = match config.anchor {
            Some([cx, cy]) => Sel::with_origin(config.width, config.height, cx, cy),
            None => Sel::create_brick(config.width, config.height),
        }
        .map_err(|e| PipelineError::config(parameter, e))?;
        Ok(Self {
            sel,
            iterations: config.iterations,
        })
    }
}

/// A validated pipeline, ready to run on any number of grids
#[derive(Debug, Clone)]
pub struct Pipeline {
    source: ColorSpace,
    target: ColorSpace,
    range: ColorRange,
    erosion: MorphStep,
    dilation: MorphStep,
    connectivity: ConnectivityType,
    expected: Option<i64>,
    min_area: Option<u32>,
    max_area: Option<u32>,
    keep_stages: bool,
}

impl Pipeline {
    /// Resolve a configuration into stage parameters
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] naming the first rejected value:
    /// `range`, `erosion`, `dilation`, `connectivity` or `area`.
    pub fn from_config(config: &PipelineConfig) -> PipelineResult<Self> {
        let range = ColorRange::new(config.range.lower.clone(), config.range.upper.clone())
            .map_err(|e| PipelineError::config("range", e))?;
        let erosion = MorphStep::resolve(&config.erosion, "erosion")?;
        let dilation = MorphStep::resolve(&config.dilation, "dilation")?;
        let connectivity = ConnectivityType::try_from(config.connectivity)
            .map_err(|e| PipelineError::config("connectivity", e))?;
        if let (Some(min), Some(max)) = (config.min_area, config.max_area)
            && min > max
        {
            return Err(PipelineError::config(
                "area",
                ConfigError::AreaBounds {
                    min_area: min,
                    max_area: max,
                },
            ));
        }

        Ok(Self {
            source: config.source_space,
            target: config.target_space,
            range,
            erosion,
            dilation,
            connectivity,
            expected: config.expected_count,
            min_area: config.min_area,
            max_area: config.max_area,
            keep_stages: config.keep_stages,
        })
    }

    /// Run every stage on one grid
    pub fn run(&self, grid: &PixelGrid) -> PipelineResult<PipelineOutput> {
        let converted =
            convert(grid, self.source, self.target).map_err(PipelineError::Convert)?;
        let mask = threshold(&converted, &self.range).map_err(PipelineError::Threshold)?;
        let eroded = erode(&mask, &self.erosion.sel, self.erosion.iterations)
            .map_err(PipelineError::Erode)?;
        let dilated = dilate(&eroded, &self.dilation.sel, self.dilation.iterations)
            .map_err(PipelineError::Dilate)?;
        let (mut labels, mut count) =
            label_components(&dilated, self.connectivity).map_err(PipelineError::Label)?;

        if self.min_area.is_some() || self.max_area.is_some() {
            let found = count;
            (labels, count) =
                filter_components_by_size(&labels, self.min_area.unwrap_or(0), self.max_area)
                    .map_err(PipelineError::Filter)?;
            info!("size filter kept {count} of {found} components");
        }

        let report = report(count, self.expected);
        info!(
            "counted {}x{} grid: {} foreground pixels after morphology, {}",
            grid.width(),
            grid.height(),
            dilated.count_foreground(),
            report
        );

        let stages = self.keep_stages.then(|| StageOutputs {
            converted,
            mask,
            eroded,
            dilated,
        });
        Ok(PipelineOutput {
            report,
            labels,
            stages,
        })
    }
}

/// Count the objects in one grid
///
/// Resolves `config` and runs the full pipeline. The input grid is only
/// read.
pub fn count_objects(grid: &PixelGrid, config: &PipelineConfig) -> PipelineResult<PipelineOutput> {
    Pipeline::from_config(config)?.run(grid)
}

/// Count the objects in many grids in parallel
///
/// The config is resolved once; a configuration error fails the whole
/// batch. Stage errors are per grid, in input order.
pub fn count_batch(
    grids: &[PixelGrid],
    config: &PipelineConfig,
) -> PipelineResult<Vec<PipelineResult<PipelineOutput>>> {
    let pipeline = Pipeline::from_config(config)?;
    Ok(grids.par_iter().map(|grid| pipeline.run(grid)).collect())
}

/// Read and count many image files in parallel
///
/// Like [`count_batch`], but each file is decoded inside its own job, so an
/// unreadable file only fails its own entry with [`PipelineError::Image`].
pub fn count_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    config: &PipelineConfig,
) -> PipelineResult<Vec<PipelineResult<PipelineOutput>>> {
    let pipeline = Pipeline::from_config(config)?;
    Ok(paths
        .par_iter()
        .map(|path| pipeline.run(&read_image(path)?))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RangeConfig;
    use blobcount_color::ColorError;
    use blobcount_morph::MorphError;
    use blobcount_region::RegionError;
    use blobcount_test::paint_rect;

    const RED: [u8; 3] = [220, 20, 20];

    fn red_config() -> PipelineConfig {
        PipelineConfig {
            source_space: ColorSpace::Rgb,
            target_space: ColorSpace::Hsv,
            range: RangeConfig {
                lower: vec![0, 100, 100],
                upper: vec![10, 255, 255],
            },
            erosion: SelConfig::brick(3, 3, 1),
            dilation: SelConfig::brick(3, 3, 1),
            connectivity: 8,
            expected_count: None,
            min_area: None,
            max_area: None,
            keep_stages: false,
        }
    }

    fn scene() -> PixelGrid {
        let mut grid = PixelGrid::filled(40, 30, &[30, 160, 40]).unwrap();
        paint_rect(&mut grid, 2, 2, 6, 6, &RED);
        paint_rect(&mut grid, 20, 4, 8, 5, &RED);
        paint_rect(&mut grid, 10, 18, 5, 7, &RED);
        // Isolated specks that erosion must remove
        paint_rect(&mut grid, 35, 2, 1, 1, &RED);
        paint_rect(&mut grid, 33, 25, 2, 1, &RED);
        grid
    }

    #[test]
    fn test_counts_blobs_and_drops_specks() {
        let out = count_objects(&scene(), &red_config()).unwrap();
        assert_eq!(out.report.count, 3);
        assert!(out.labels.is_dense());
        assert_eq!(out.labels.max_label(), 3);
        assert!(out.stages.is_none());
    }

    #[test]
    fn test_keep_stages() {
        let config = PipelineConfig {
            keep_stages: true,
            expected_count: Some(4),
            ..red_config()
        };
        let grid = scene();
        let out = count_objects(&grid, &config).unwrap();
        let stages = out.stages.unwrap();
        assert_eq!(stages.converted.channels(), 3);
        assert_eq!(stages.mask.count_foreground(), 36 + 40 + 35 + 1 + 2);
        assert!(stages.eroded.is_subset_of(&stages.mask).unwrap());
        assert!(stages.eroded.is_subset_of(&stages.dilated).unwrap());
        assert_eq!(out.report.accuracy_percent, Some(75.0));
        // Input untouched
        assert_eq!(grid, scene());
    }

    #[test]
    fn test_size_filter() {
        let config = PipelineConfig {
            min_area: Some(36),
            ..red_config()
        };
        let out = count_objects(&scene(), &config).unwrap();
        assert_eq!(out.report.count, 2);
        assert!(out.labels.is_dense());
    }

    #[test]
    fn test_config_errors() {
        let bad_range = PipelineConfig {
            range: RangeConfig {
                lower: vec![0, 0],
                upper: vec![10, 255, 255],
            },
            ..red_config()
        };
        assert!(matches!(
            count_objects(&scene(), &bad_range),
            Err(PipelineError::Config {
                parameter: "range",
                source: ConfigError::Range(ColorError::InvalidRange(_)),
            })
        ));

        let bad_sel = PipelineConfig {
            dilation: SelConfig::brick(0, 3, 1),
            ..red_config()
        };
        assert!(matches!(
            count_objects(&scene(), &bad_sel),
            Err(PipelineError::Config {
                parameter: "dilation",
                source: ConfigError::Sel(MorphError::DegenerateElement {
                    width: 0,
                    height: 3
                }),
            })
        ));

        let bad_conn = PipelineConfig {
            connectivity: 6,
            ..red_config()
        };
        assert!(matches!(
            count_objects(&scene(), &bad_conn),
            Err(PipelineError::Config {
                parameter: "connectivity",
                source: ConfigError::Connectivity(RegionError::InvalidConnectivity(6)),
            })
        ));

        let bad_area = PipelineConfig {
            min_area: Some(10),
            max_area: Some(5),
            ..red_config()
        };
        assert!(matches!(
            count_objects(&scene(), &bad_area),
            Err(PipelineError::Config {
                parameter: "area",
                source: ConfigError::AreaBounds {
                    min_area: 10,
                    max_area: 5
                },
            })
        ));
    }

    #[test]
    fn test_config_error_keeps_source() {
        use std::error::Error as _;

        let config = PipelineConfig {
            erosion: SelConfig::brick(0, 3, 1),
            ..red_config()
        };
        let err = Pipeline::from_config(&config).unwrap_err();
        let source = err.source().expect("config error has a source");
        assert_eq!(
            source.to_string(),
            MorphError::DegenerateElement {
                width: 0,
                height: 3
            }
            .to_string()
        );
    }

    #[test]
    fn test_stage_errors() {
        let negative = PipelineConfig {
            erosion: SelConfig::brick(3, 3, -1),
            ..red_config()
        };
        assert!(matches!(
            count_objects(&scene(), &negative),
            Err(PipelineError::Erode(_))
        ));

        let gray = PixelGrid::new(4, 4, 1).unwrap();
        assert!(matches!(
            count_objects(&gray, &red_config()),
            Err(PipelineError::Convert(_))
        ));

        let empty = PixelGrid::new(0, 0, 3).unwrap();
        assert!(matches!(
            count_objects(&empty, &red_config()),
            Err(PipelineError::Convert(_))
        ));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut other = PixelGrid::filled(16, 16, &[0, 0, 0]).unwrap();
        paint_rect(&mut other, 1, 1, 4, 4, &RED);
        let grids = vec![scene(), other, PixelGrid::new(3, 3, 1).unwrap()];

        let batch = count_batch(&grids, &red_config()).unwrap();
        assert_eq!(batch.len(), 3);
        for (grid, result) in grids.iter().zip(&batch) {
            let sequential = count_objects(grid, &red_config());
            match (result, sequential) {
                (Ok(a), Ok(b)) => assert_eq!(*a, b),
                (Err(_), Err(_)) => {}
                _ => panic!("batch and sequential results differ"),
            }
        }
        assert_eq!(batch[0].as_ref().unwrap().report.count, 3);
        assert_eq!(batch[1].as_ref().unwrap().report.count, 1);
    }
}
