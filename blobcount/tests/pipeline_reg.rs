//! End-to-end counting regression test
//!
//! Run with:
//! ```
//! cargo test -p blobcount --test pipeline_reg
//! ```

use blobcount::{
    ColorSpace, PipelineConfig, PipelineError, PixelGrid, RangeConfig, SelConfig, count_batch,
    count_files, count_objects, load_config, report,
};
use blobcount_test::{RegParams, paint_rect};
use std::fs;

const BACKGROUND: [u8; 3] = [200, 200, 190];
const BROWN: [u8; 3] = [120, 70, 30];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 6 x 5 lattice of 6x6 brown squares with single-pixel specks between them
fn lattice() -> PixelGrid {
    let mut grid = PixelGrid::filled(76, 64, &BACKGROUND).unwrap();
    for j in 0..5 {
        for i in 0..6 {
            paint_rect(&mut grid, 4 + 12 * i, 4 + 12 * j, 6, 6, &BROWN);
            paint_rect(&mut grid, 12 * i + 1, 12 * j + 1, 1, 1, &BROWN);
        }
    }
    grid
}

fn brown_config() -> PipelineConfig {
    PipelineConfig {
        source_space: ColorSpace::Rgb,
        target_space: ColorSpace::Hsv,
        range: RangeConfig {
            lower: vec![5, 100, 60],
            upper: vec![20, 255, 200],
        },
        erosion: SelConfig::brick(3, 3, 1),
        dilation: SelConfig::brick(3, 3, 1),
        connectivity: 8,
        expected_count: Some(29),
        min_area: None,
        max_area: None,
        keep_stages: false,
    }
}

#[test]
fn pipeline_reg() {
    init_logger();
    let mut rp = RegParams::new("pipeline");

    // -----------------------------------------------------------
    // Lattice: specks removed, every square counted
    // -----------------------------------------------------------
    let grid = lattice();
    let out = count_objects(&grid, &brown_config()).unwrap();
    rp.compare_values(30.0, out.report.count as f64, 0.0);
    rp.compare_values(30.0 / 29.0 * 100.0, out.report.accuracy_percent.unwrap(), 1e-9);
    rp.check(out.labels.is_dense(), "labels dense");
    rp.compare_values(30.0, out.labels.max_label() as f64, 0.0);
    rp.check(grid == lattice(), "input grid unchanged");

    // Without morphology the specks count too
    let raw = PipelineConfig {
        erosion: SelConfig::brick(3, 3, 0),
        dilation: SelConfig::brick(3, 3, 0),
        ..brown_config()
    };
    let out = count_objects(&grid, &raw).unwrap();
    rp.compare_values(60.0, out.report.count as f64, 0.0);

    // The size filter does the same job as the opening
    let filtered = PipelineConfig {
        min_area: Some(2),
        ..raw
    };
    let out = count_objects(&grid, &filtered).unwrap();
    rp.compare_values(30.0, out.report.count as f64, 0.0);

    // -----------------------------------------------------------
    // Opening splits squares joined by a thin bridge
    // -----------------------------------------------------------
    let mut bridged = PixelGrid::filled(24, 12, &BACKGROUND).unwrap();
    paint_rect(&mut bridged, 2, 2, 6, 6, &BROWN);
    paint_rect(&mut bridged, 9, 2, 6, 6, &BROWN);
    paint_rect(&mut bridged, 8, 5, 1, 1, &BROWN);
    let raw_config = PipelineConfig {
        expected_count: None,
        ..raw_brown()
    };
    let out = count_objects(&bridged, &raw_config).unwrap();
    rp.compare_values(1.0, out.report.count as f64, 0.0);
    rp.check(out.report.accuracy_percent.is_none(), "no accuracy without expectation");
    let out = count_objects(&bridged, &brown_config()).unwrap();
    rp.compare_values(2.0, out.report.count as f64, 0.0);

    // -----------------------------------------------------------
    // Reporting
    // -----------------------------------------------------------
    let r = report(26, Some(29));
    rp.compare_values(89.6552, r.accuracy_percent.unwrap(), 1e-4);
    rp.check(report(0, None).accuracy_percent.is_none(), "report(0, None)");

    assert!(rp.cleanup(), "pipeline regression test failed");
}

fn raw_brown() -> PipelineConfig {
    PipelineConfig {
        erosion: SelConfig::brick(1, 1, 0),
        dilation: SelConfig::brick(1, 1, 0),
        ..brown_config()
    }
}

#[test]
fn pipeline_config_reg() {
    init_logger();
    let mut rp = RegParams::new("pipeline_config");

    let json = r#"{
        "source_space": "rgb",
        "target_space": "hsv",
        "range": { "lower": [5, 100, 60], "upper": [20, 255, 200] },
        "erosion": { "width": 3, "height": 3, "iterations": 1 },
        "dilation": { "width": 3, "height": 3, "anchor": [1, 1], "iterations": 1 },
        "connectivity": 8,
        "expected_count": 29,
        "keep_stages": true
    }"#;
    let path = std::env::temp_dir().join(format!("blobcount_config_{}.json", std::process::id()));
    fs::write(&path, json).unwrap();
    let config = load_config(&path).unwrap();
    let _ = fs::remove_file(&path);

    let expected = PipelineConfig {
        dilation: SelConfig {
            anchor: Some([1, 1]),
            ..SelConfig::brick(3, 3, 1)
        },
        keep_stages: true,
        ..brown_config()
    };
    rp.check(config == expected, "config loaded from JSON");

    // Serialized config reads back the same
    let text = serde_json::to_string(&config).unwrap();
    let back: PipelineConfig = serde_json::from_str(&text).unwrap();
    rp.check(back == config, "config survives serialization");

    let out = count_objects(&lattice(), &config).unwrap();
    rp.compare_values(30.0, out.report.count as f64, 0.0);
    let stages = out.stages.unwrap();
    rp.compare_values(
        (30 * 36 + 30) as f64,
        stages.mask.count_foreground() as f64,
        0.0,
    );
    rp.compare_values(30.0 * 16.0, stages.eroded.count_foreground() as f64, 0.0);
    rp.compare_values(30.0 * 36.0, stages.dilated.count_foreground() as f64, 0.0);

    // Errors name what failed
    let bad = PipelineConfig {
        connectivity: 5,
        ..config.clone()
    };
    let err = count_objects(&lattice(), &bad).unwrap_err();
    rp.check(
        matches!(err, PipelineError::Config { parameter: "connectivity", .. }),
        "bad connectivity reported as config error",
    );
    let err = count_objects(&PixelGrid::new(4, 4, 4).unwrap(), &config).unwrap_err();
    rp.check(
        matches!(err, PipelineError::Convert(_)),
        "four-channel input fails in convert",
    );
    rp.check(
        matches!(load_config("/nonexistent/config.json"), Err(PipelineError::Io { .. })),
        "missing config file",
    );

    assert!(rp.cleanup(), "pipeline_config regression test failed");
}

#[test]
fn pipeline_batch_reg() {
    init_logger();
    let mut rp = RegParams::new("pipeline_batch");

    let mut grids: Vec<PixelGrid> = (0..6u32)
        .map(|n| {
            let mut grid = PixelGrid::filled(64, 16, &BACKGROUND).unwrap();
            for i in 0..n {
                paint_rect(&mut grid, 2 + 10 * i, 4, 7, 7, &BROWN);
            }
            grid
        })
        .collect();
    grids.push(lattice());
    grids.push(PixelGrid::new(8, 8, 1).unwrap());

    let config = brown_config();
    let batch = count_batch(&grids, &config).unwrap();
    rp.compare_values(grids.len() as f64, batch.len() as f64, 0.0);

    for (n, (grid, result)) in grids.iter().zip(&batch).enumerate() {
        match (result, count_objects(grid, &config)) {
            (Ok(a), Ok(b)) => {
                rp.check(*a == b, &format!("batch result {n} equals sequential"));
            }
            (Err(a), Err(b)) => {
                rp.check(a.to_string() == b.to_string(), "same error");
            }
            _ => {
                rp.check(false, &format!("batch result {n} differs from sequential"));
            }
        }
    }
    for n in 0..6 {
        rp.compare_values(n as f64, batch[n].as_ref().unwrap().report.count as f64, 0.0);
    }
    rp.compare_values(30.0, batch[6].as_ref().unwrap().report.count as f64, 0.0);
    rp.check(matches!(batch[7], Err(PipelineError::Convert(_))), "gray grid fails");

    // A bad config fails the whole batch
    let bad = PipelineConfig {
        erosion: SelConfig::brick(0, 0, 1),
        ..config
    };
    rp.check(
        matches!(count_batch(&grids, &bad), Err(PipelineError::Config { parameter: "erosion", .. })),
        "config error fails batch",
    );

    assert!(rp.cleanup(), "pipeline_batch regression test failed");
}

#[test]
fn pipeline_image_reg() {
    init_logger();
    let mut rp = RegParams::new("pipeline_image");

    // Write a mask as PNG, read it back as RGB and count the white blobs
    let mask = blobcount::Mask::from_fn(30, 20, |x, y| {
        ((2..8).contains(&x) && (3..9).contains(&y)) || ((15..25).contains(&x) && (10..17).contains(&y))
    });
    let path = std::env::temp_dir().join(format!("blobcount_image_{}.png", std::process::id()));
    blobcount::io::write_mask(&mask, &path).unwrap();
    let grid = blobcount::io::read_image(&path).unwrap();
    let _ = fs::remove_file(&path);

    let config = PipelineConfig {
        target_space: ColorSpace::Gray,
        range: RangeConfig {
            lower: vec![128],
            upper: vec![255],
        },
        expected_count: Some(2),
        ..brown_config()
    };
    let out = count_objects(&grid, &config).unwrap();
    rp.compare_values(2.0, out.report.count as f64, 0.0);
    rp.compare_values(100.0, out.report.accuracy_percent.unwrap(), 0.0);

    let labels_img = blobcount::io::labels_to_image(&out.labels).unwrap();
    rp.compare_values(255.0, labels_img.get_pixel(20, 12).0[0] as f64, 0.0);
    rp.compare_values(1.0, labels_img.get_pixel(4, 4).0[0] as f64, 0.0);

    assert!(rp.cleanup(), "pipeline_image regression test failed");
}

#[test]
fn pipeline_files_reg() {
    init_logger();
    let mut rp = RegParams::new("pipeline_files");

    let mask = blobcount::Mask::from_fn(20, 20, |x, y| (4..12).contains(&x) && (4..12).contains(&y));
    let good = std::env::temp_dir().join(format!("blobcount_files_{}.png", std::process::id()));
    let missing = std::env::temp_dir().join(format!("blobcount_missing_{}.png", std::process::id()));
    blobcount::io::write_mask(&mask, &good).unwrap();

    let config = PipelineConfig {
        target_space: ColorSpace::Gray,
        range: RangeConfig {
            lower: vec![128],
            upper: vec![255],
        },
        ..brown_config()
    };
    // An unreadable file fails only its own entry
    let results = count_files(&[missing.clone(), good.clone(), good.clone()], &config).unwrap();
    let _ = fs::remove_file(&good);

    rp.compare_values(3.0, results.len() as f64, 0.0);
    rp.compare_values(
        1.0,
        matches!(results[0], Err(PipelineError::Image(_))) as u8 as f64,
        0.0,
    );
    for result in &results[1..] {
        rp.compare_values(1.0, result.as_ref().unwrap().report.count as f64, 0.0);
    }

    assert!(rp.cleanup(), "pipeline_files regression test failed");
}
