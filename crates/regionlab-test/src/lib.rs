//! regionlab-test - Regression test framework for regionlab
//!
//! Regression tests number their checks, keep going after a failure and
//! report every mismatch at the end, in two modes:
//!
//! - **Compare**: check results and record failures (default)
//! - **Display**: additionally print intermediate results for inspection
//!
//! # Usage
//!
//! ```ignore
//! use regionlab_test::{RegParams, load_test_mask};
//!
//! let mask = load_test_mask("annulus.txt").unwrap();
//! let mut rp = RegParams::new("contour");
//! rp.compare_values(1.0, holes as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode, same_partition};

use regionlab_core::BinaryImage;

/// Load a test mask from the test data directory
///
/// Masks are ASCII art, `#` for foreground and `.` for background.
///
/// # Arguments
///
/// * `name` - Mask filename (e.g., "annulus.txt")
pub fn load_test_mask(name: &str) -> TestResult<BinaryImage> {
    let path = test_data_path(name);
    let text = std::fs::read_to_string(&path)?;
    BinaryImage::from_ascii(&text).map_err(|e| TestError::MaskLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // regionlab-test is at crates/regionlab-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/masks/{}", workspace_root(), name)
}
