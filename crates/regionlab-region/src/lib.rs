//! regionlab-region - Binary region labeling and contour tracing
//!
//! This crate splits a binary image into connected regions and, optionally,
//! traces each region's outer boundary and the boundaries of its holes:
//!
//! - **Label grid** - per-pixel labeling state with a one-pixel background ring
//! - **Flood-fill labeling** - breadth-first, depth-first and recursive order
//! - **Sequential labeling** - two passes with label equivalence resolution
//! - **Region-and-contour tracing** - labeling and boundary following in one scan
//! - **Region aggregation** - pixel counts, bounding boxes, centroids, moments
//!
//! # Examples
//!
//! ## Segmenting an image
//!
//! ```
//! use regionlab_core::BinaryImage;
//! use regionlab_region::{SegmentationOptions, segment};
//!
//! let image = BinaryImage::from_ascii("###..\n#.#..\n###.#\n").unwrap();
//! let seg = segment(&image, &SegmentationOptions::default()).unwrap();
//!
//! assert_eq!(seg.region_count(), 2);
//! let ring = seg.region_at(0, 0).unwrap();
//! assert_eq!(ring.size(), 8);
//! assert_eq!(ring.hole_count(), 1);
//! ```
//!
//! ## Labeling a grid directly
//!
//! ```
//! use regionlab_core::BinaryImage;
//! use regionlab_region::{ConnectivityType, LabelGrid, collect_regions, label_sequential};
//!
//! let image = BinaryImage::from_ascii("#.\n.#\n").unwrap();
//! let mut grid = LabelGrid::from_binary(&image).unwrap();
//! let count = label_sequential(&mut grid, ConnectivityType::FourWay).unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(collect_regions(&grid, false).len(), 2);
//! ```

pub mod conncomp;
pub mod contour;
pub mod equivalence;
pub mod error;
pub mod grid;
pub mod label;
pub mod region;
pub mod segmentation;
pub mod seedfill;
pub mod sequential;
pub mod tracer;

// Re-export core types
pub use regionlab_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use conncomp::ConnectivityType;

pub use contour::{Contour, ContourKind, Direction};

pub use equivalence::{Collision, CollisionSet, LabelEquivalence, resolve_collisions};

pub use grid::{BACKGROUND, FOREGROUND, LabelGrid, MIN_LABEL, VISITED};

pub use label::{BACKGROUND_COLOR, collect_regions, color_label_image, label_image};

pub use region::{CentralMoments, Region, RegionTable};

pub use segmentation::{
    LabelingMethod, Segmentation, SegmentationOptions, segment, segment_bytes,
};

pub use seedfill::{
    floodfill_breadth_first, floodfill_depth_first, floodfill_recursive, label_breadth_first,
    label_depth_first, label_recursive,
};

pub use sequential::label_sequential;

pub use tracer::{TracedContours, trace_regions};
