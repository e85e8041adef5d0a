//! Box - Rectangle regions
//!
//! Axis-aligned rectangles used for region bounding boxes.

use crate::error::{Error, Result};

/// A rectangle region
///
/// `x` and `y` are the top-left pixel; `w` and `h` count pixels, so a
/// single pixel has `w == h == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from inclusive pixel extremes.
    ///
    /// `from_extremes(2, 2, 2, 2)` is the 1x1 box covering pixel (2, 2).
    ///
    /// # Errors
    ///
    /// Returns an error if `right < left` or `bottom < top`.
    pub fn from_extremes(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self> {
        if right < left || bottom < top {
            return Err(Error::InvalidParameter(format!(
                "inverted extremes: ({}, {}) .. ({}, {})",
                left, top, right, bottom
            )));
        }
        Ok(Self {
            x: left,
            y: top,
            w: right - left + 1,
            h: bottom - top + 1,
        })
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extremes_is_inclusive() {
        let b = Box::from_extremes(2, 2, 2, 2).unwrap();
        assert_eq!(b, Box::new_unchecked(2, 2, 1, 1));
        assert_eq!(b.area(), 1);

        let wide = Box::from_extremes(0, 1, 3, 2).unwrap();
        assert_eq!(wide, Box::new_unchecked(0, 1, 4, 2));
        assert_eq!(wide.area(), 8);

        assert!(Box::from_extremes(3, 0, 2, 0).is_err());
    }
}
