//! regionlab - Binary region segmentation for Rust
//!
//! Splits a binary (foreground/background) image into connected regions
//! and extracts each region's outer and hole contours, ready for shape
//! analysis.
//!
//! # Overview
//!
//! - 4- and 8-connectivity
//! - Flood-fill (breadth-first, depth-first, recursive order), sequential
//!   and combined region-and-contour labeling
//! - Region statistics: size, bounding box, centroid, central moments
//! - Ordered contour point lists with chain codes and signed area
//!
//! # Example
//!
//! ```
//! use regionlab::BinaryImage;
//! use regionlab::region::{ConnectivityType, SegmentationOptions, segment};
//!
//! let image = BinaryImage::from_ascii("#####\n#...#\n#####\n").unwrap();
//! let opts = SegmentationOptions::default().with_connectivity(ConnectivityType::FourWay);
//! let seg = segment(&image, &opts).unwrap();
//!
//! assert_eq!(seg.region_count(), 1);
//! assert_eq!(seg.regions()[0].hole_count(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use regionlab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use regionlab_region as region;
