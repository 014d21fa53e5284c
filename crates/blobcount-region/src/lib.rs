//! blobcount-region - Region processing for blob counting
//!
//! This crate provides region processing functionality including:
//!
//! - **Connected component labeling** - two-pass labeling backed by union-find
//! - **Union-find** - disjoint sets over dense integer ids
//! - **Component statistics** - area, bounding box, centroid, size filtering
//!
//! # Examples
//!
//! ## Counting connected components
//!
//! ```
//! use blobcount_region::{ConnectivityType, label_components};
//! use blobcount_core::Mask;
//!
//! let mut mask = Mask::new(10, 10);
//! mask.set(1, 1, true).unwrap();
//! mask.set(2, 2, true).unwrap();
//! mask.set(7, 7, true).unwrap();
//!
//! let (_, four) = label_components(&mask, ConnectivityType::FourWay).unwrap();
//! let (_, eight) = label_components(&mask, ConnectivityType::EightWay).unwrap();
//! assert_eq!(four, 3);
//! assert_eq!(eight, 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod label;
pub mod union_find;

// Re-export core types
pub use blobcount_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{ConnectivityType, count_components, extract_component, label_components};

// Re-export label types and functions
pub use label::{
    BoundingBox, ComponentStats, component_sizes, component_stats, filter_components_by_size,
};

pub use union_find::UnionFind;
