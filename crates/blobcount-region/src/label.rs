//! Component statistics over label maps
//!
//! This module provides measurements of labeled components (area,
//! bounding box, centroid) and size-based filtering of a label map.

use crate::error::{RegionError, RegionResult};
use blobcount_core::LabelMap;
use log::debug;

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Component statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Bounding box
    pub bounds: BoundingBox,
    /// Number of pixels
    pub area: u32,
    /// Centroid X coordinate
    pub centroid_x: f64,
    /// Centroid Y coordinate
    pub centroid_y: f64,
}

/// Get pixel count for each component
///
/// The index in the returned vector corresponds to (label - 1).
pub fn component_sizes(labels: &LabelMap) -> Vec<u32> {
    let mut sizes = vec![0u32; labels.max_label() as usize];
    for &label in labels.labels().iter().filter(|&&l| l > 0) {
        sizes[label as usize - 1] += 1;
    }
    sizes
}

/// Get detailed statistics for all components
///
/// Returns one entry per label in `1..=max_label`, in label order.
/// Labels absent from the map are skipped.
pub fn component_stats(labels: &LabelMap) -> Vec<ComponentStats> {
    struct Acc {
        area: u32,
        min_x: u32,
        min_y: u32,
        max_x: u32,
        max_y: u32,
        sum_x: u64,
        sum_y: u64,
    }

    let width = labels.width();
    let mut accs: Vec<Option<Acc>> = Vec::new();
    accs.resize_with(labels.max_label() as usize, || None);

    for (i, &label) in labels.labels().iter().enumerate() {
        if label == 0 {
            continue;
        }
        let x = i as u32 % width;
        let y = i as u32 / width;
        let acc = accs[label as usize - 1].get_or_insert(Acc {
            area: 0,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            sum_x: 0,
            sum_y: 0,
        });
        acc.area += 1;
        acc.min_x = acc.min_x.min(x);
        acc.min_y = acc.min_y.min(y);
        acc.max_x = acc.max_x.max(x);
        acc.max_y = acc.max_y.max(y);
        acc.sum_x += x as u64;
        acc.sum_y += y as u64;
    }

    accs.into_iter()
        .enumerate()
        .filter_map(|(i, acc)| {
            let acc = acc?;
            Some(ComponentStats {
                label: i as u32 + 1,
                bounds: BoundingBox {
                    x: acc.min_x,
                    y: acc.min_y,
                    w: acc.max_x - acc.min_x + 1,
                    h: acc.max_y - acc.min_y + 1,
                },
                area: acc.area,
                centroid_x: acc.sum_x as f64 / acc.area as f64,
                centroid_y: acc.sum_y as f64 / acc.area as f64,
            })
        })
        .collect()
}

/// Filter components by size, keeping only those within the given range
///
/// `max_area` of `None` means unbounded. Surviving components are
/// renumbered densely to `1..=count`, preserving their relative order.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `min_area > max_area`.
pub fn filter_components_by_size(
    labels: &LabelMap,
    min_area: u32,
    max_area: Option<u32>,
) -> RegionResult<(LabelMap, u32)> {
    if let Some(max) = max_area
        && min_area > max
    {
        return Err(RegionError::InvalidParameters(format!(
            "min_area {min_area} > max_area {max}"
        )));
    }

    let sizes = component_sizes(labels);
    let mut remap = vec![0u32; sizes.len() + 1];
    let mut count = 0u32;
    for (i, &size) in sizes.iter().enumerate() {
        let keep = size > 0 && size >= min_area && max_area.is_none_or(|max| size <= max);
        if keep {
            count += 1;
            remap[i + 1] = count;
        }
    }

    let (w, h) = labels.dimensions();
    let filtered = labels.labels().iter().map(|&l| remap[l as usize]).collect();
    debug!(
        "filter_components_by_size [{min_area}, {max_area:?}]: {} -> {} components",
        sizes.len(),
        count
    );
    Ok((LabelMap::from_vec(w, h, filtered)?, count))
}
