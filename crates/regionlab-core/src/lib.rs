//! Regionlab Core - Basic data structures for binary region analysis
//!
//! This crate provides the caller-facing data structures shared by the
//! regionlab crates:
//!
//! - [`BinaryImage`] - A thresholded foreground/background grid
//! - [`Box`] - Rectangle regions
//! - [`Point`] - Integer pixel coordinates
//!
//! Decoding and thresholding of source images happen outside this crate;
//! callers hand in an already binarized grid.

pub mod binary;
pub mod box_;
pub mod error;
pub mod point;

pub use binary::BinaryImage;
pub use box_::Box;
pub use error::{Error, Result};
pub use point::Point;
