//! Connected component analysis
//!
//! This module labels connected components in masks with the classic
//! two-pass algorithm:
//!
//! 1. A forward raster scan gives each foreground pixel the smallest label
//!    among its already-visited foreground neighbors (or a fresh one) and
//!    records every neighbor-label equivalence in a [`UnionFind`].
//! 2. A resolution pass replaces each provisional label by its class
//!    representative, renumbered densely to `1..=count` in scan order.
//!
//! The output is fully determined by the mask and the connectivity.

use crate::error::{RegionError, RegionResult};
use crate::union_find::UnionFind;
use blobcount_core::{LabelMap, Mask};
use log::debug;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl TryFrom<u32> for ConnectivityType {
    type Error = RegionError;

    fn try_from(value: u32) -> RegionResult<Self> {
        match value {
            4 => Ok(ConnectivityType::FourWay),
            8 => Ok(ConnectivityType::EightWay),
            other => Err(RegionError::InvalidConnectivity(other)),
        }
    }
}

/// Label all connected components in a mask
///
/// Returns a label map (0 = background, components numbered `1..=count`
/// in order of first appearance in a row-major scan) and the component
/// count.
///
/// # Errors
///
/// Returns [`RegionError::EmptyGrid`] if the mask has no pixels.
pub fn label_components(
    mask: &Mask,
    connectivity: ConnectivityType,
) -> RegionResult<(LabelMap, u32)> {
    if mask.is_empty() {
        let (width, height) = mask.dimensions();
        return Err(RegionError::EmptyGrid { width, height });
    }

    let (w, h) = mask.dimensions();
    let (wu, hu) = (w as usize, h as usize);
    let data = mask.data();
    let mut labels = vec![0u32; wu * hu];
    let mut uf = UnionFind::new();

    // Forward pass: provisional labels and equivalences
    for y in 0..hu {
        for x in 0..wu {
            let idx = y * wu + x;
            if data[idx] == 0 {
                continue;
            }

            let mut neighbors = [0u32; 4];
            let mut n = 0;
            let mut push = |label: u32| {
                if label != 0 {
                    neighbors[n] = label;
                    n += 1;
                }
            };
            if x > 0 {
                push(labels[idx - 1]);
            }
            if y > 0 {
                push(labels[idx - wu]);
                if connectivity == ConnectivityType::EightWay {
                    if x > 0 {
                        push(labels[idx - wu - 1]);
                    }
                    if x + 1 < wu {
                        push(labels[idx - wu + 1]);
                    }
                }
            }

            let found = &neighbors[..n];
            labels[idx] = match found.iter().copied().min() {
                None => uf.make_set(),
                Some(smallest) => {
                    for &other in found {
                        if other != smallest {
                            uf.union(smallest, other);
                        }
                    }
                    smallest
                }
            };
        }
    }

    // Representatives are class minima, so ascending order is scan order
    let provisional = uf.len();
    let mut dense = vec![0u32; provisional + 1];
    let mut count = 0u32;
    for id in 1..=provisional as u32 {
        if uf.is_root(id) {
            count += 1;
            dense[id as usize] = count;
        }
    }

    // Resolution pass
    for label in labels.iter_mut().filter(|l| **l != 0) {
        *label = dense[uf.find(*label) as usize];
    }

    debug!(
        "label_components {}x{} {:?}: {} provisional labels, {} components",
        w, h, connectivity, provisional, count
    );
    Ok((LabelMap::from_vec(w, h, labels)?, count))
}

/// Count the number of connected components
pub fn count_components(mask: &Mask, connectivity: ConnectivityType) -> RegionResult<u32> {
    label_components(mask, connectivity).map(|(_, count)| count)
}

/// Extract a single component from a label map as a mask
pub fn extract_component(labels: &LabelMap, label: u32) -> RegionResult<Mask> {
    if label == 0 {
        return Err(RegionError::InvalidParameters(
            "label 0 is background".to_string(),
        ));
    }
    let (w, h) = labels.dimensions();
    let bits: Vec<bool> = labels.labels().iter().map(|&l| l == label).collect();
    Ok(Mask::from_bools(w, h, &bits)?)
}
