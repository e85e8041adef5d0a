//! Error types for regionlab-region

use crate::contour::ContourKind;
use thiserror::Error;

/// Errors that can occur during region labeling and contour tracing
///
/// `InvalidDimensions` is an ordinary caller error. `LabelOutOfRange`,
/// `UnmatchedContour` and `TraceDiverged` report a broken invariant inside
/// the labeling engine itself and abort the run.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] regionlab_core::Error),

    /// Zero-sized input grid
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A resolved label fell outside the replacement table
    #[error("internal error: label {label} outside replacement table of size {table_size}")]
    LabelOutOfRange { label: i32, table_size: usize },

    /// A traced contour carries a label that no region owns
    #[error("internal error: {kind:?} contour with label {label} has no matching region")]
    UnmatchedContour { label: i32, kind: ContourKind },

    /// The boundary follower did not return to its starting transition
    #[error("internal error: contour trace for label {label} from ({x}, {y}) did not close")]
    TraceDiverged { x: i32, y: i32, label: i32 },

    /// Moments were requested from a region without pixels
    #[error("region {label} is empty, moments are undefined")]
    EmptyRegion { label: i32 },
}

impl RegionError {
    /// Check whether this error reports a bug in the labeling engine rather
    /// than a problem with the caller's input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RegionError::LabelOutOfRange { .. }
                | RegionError::UnmatchedContour { .. }
                | RegionError::TraceDiverged { .. }
        )
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
