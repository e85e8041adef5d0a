//! Label grid
//!
//! The per-pixel state of one segmentation run. Every cell holds one of
//! [`BACKGROUND`], [`FOREGROUND`] (unlabeled foreground), the transient
//! [`VISITED`] marker used by the boundary follower, or a region label
//! `>= MIN_LABEL`.
//!
//! The grid is stored with a one-pixel ring of background around the image
//! area, so boundary following can probe the neighbours of edge pixels
//! without range tests. Coordinates on that ring (`-1` and `width`/`height`)
//! are addressable; anything beyond it reads as [`BACKGROUND`] and ignores
//! writes.

use crate::error::{RegionError, RegionResult};
use regionlab_core::BinaryImage;

/// Background pixel
pub const BACKGROUND: i32 = 0;

/// Foreground pixel that has not been labeled yet
pub const FOREGROUND: i32 = 1;

/// Background pixel already probed by the boundary follower
pub const VISITED: i32 = -1;

/// Smallest region label; 0 and 1 are reserved
pub const MIN_LABEL: i32 = 2;

/// Mutable label array paired with its dimensions and label counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: u32,
    height: u32,
    stride: usize,
    cells: Vec<i32>,
    current_label: i32,
    max_label: i32,
}

impl LabelGrid {
    /// Create an all-background grid.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> RegionResult<Self> {
        if width == 0 || height == 0 {
            return Err(RegionError::InvalidDimensions { width, height });
        }
        let stride = width as usize + 2;
        Ok(Self {
            width,
            height,
            stride,
            cells: vec![BACKGROUND; stride * (height as usize + 2)],
            current_label: 0,
            max_label: 0,
        })
    }

    /// Create a grid with every foreground pixel of `image` marked
    /// [`FOREGROUND`].
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidDimensions`] if the image is empty.
    pub fn from_binary(image: &BinaryImage) -> RegionResult<Self> {
        let mut grid = Self::new(image.width(), image.height())?;
        for (i, row) in image.data().chunks(image.width() as usize).enumerate() {
            let start = (i + 1) * grid.stride + 1;
            for (cell, &value) in grid.cells[start..start + row.len()].iter_mut().zip(row) {
                *cell = if value != 0 { FOREGROUND } else { BACKGROUND };
            }
        }
        Ok(grid)
    }

    /// Get the grid width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether `(u, v)` lies inside the image area (excluding the ring)
    #[inline]
    pub fn in_bounds(&self, u: i32, v: i32) -> bool {
        u >= 0 && v >= 0 && (u as u32) < self.width && (v as u32) < self.height
    }

    #[inline]
    fn index(&self, u: i32, v: i32) -> Option<usize> {
        if u >= -1 && v >= -1 && u <= self.width as i32 && v <= self.height as i32 {
            Some((v + 1) as usize * self.stride + (u + 1) as usize)
        } else {
            None
        }
    }

    /// Get the label at `(u, v)`; [`BACKGROUND`] outside the grid
    #[inline]
    pub fn get_label(&self, u: i32, v: i32) -> i32 {
        self.index(u, v).map_or(BACKGROUND, |i| self.cells[i])
    }

    /// Set the label at `(u, v)`; ignored outside the grid
    #[inline]
    pub fn set_label(&mut self, u: i32, v: i32, label: i32) {
        if let Some(i) = self.index(u, v) {
            self.cells[i] = label;
        }
    }

    /// Allocate the next region label.
    ///
    /// Labels start at [`MIN_LABEL`] and increase by one per call; the
    /// counter belongs to this grid alone.
    pub fn next_label(&mut self) -> i32 {
        self.current_label = if self.current_label < MIN_LABEL {
            MIN_LABEL
        } else {
            self.current_label + 1
        };
        self.max_label = self.current_label;
        self.current_label
    }

    /// Largest label allocated so far, 0 if none
    #[inline]
    pub fn max_label(&self) -> i32 {
        self.max_label
    }

    /// Reset the label counter after the grid has been renumbered
    pub(crate) fn set_max_label(&mut self, max_label: i32) {
        self.current_label = max_label;
        self.max_label = max_label;
    }

    /// Turn every [`VISITED`] cell back into [`BACKGROUND`], returning the
    /// number of cells touched
    pub(crate) fn clear_visited(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == VISITED) {
            *cell = BACKGROUND;
            cleared += 1;
        }
        cleared
    }

    /// Check that no cell is unlabeled foreground or a transient mark
    pub fn is_fully_labeled(&self) -> bool {
        self.cells.iter().all(|&c| c == BACKGROUND || c >= MIN_LABEL)
    }

    /// Iterate over `(u, v, label)` for the image area in row-major order
    pub fn labels(&self) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        (0..self.height as i32)
            .flat_map(move |v| (0..self.width as i32).map(move |u| (u, v, self.get_label(u, v))))
    }

    /// Copy the image area into a row-major vector
    pub fn to_vec(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for v in 0..self.height as usize {
            let start = (v + 1) * self.stride + 1;
            out.extend_from_slice(&self.cells[start..start + self.width as usize]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            LabelGrid::new(0, 4),
            Err(RegionError::InvalidDimensions {
                width: 0,
                height: 4
            })
        ));
    }

    #[test]
    fn test_from_binary_marks_foreground() {
        let image = BinaryImage::from_ascii("#.\n.#\n").unwrap();
        let grid = LabelGrid::from_binary(&image).unwrap();
        assert_eq!(grid.to_vec(), vec![1, 0, 0, 1]);
        assert!(!grid.is_fully_labeled());
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = LabelGrid::new(3, 2).unwrap();
        assert_eq!(grid.get_label(-5, 0), BACKGROUND);
        assert_eq!(grid.get_label(0, 100), BACKGROUND);
        grid.set_label(100, 100, 7);
        assert_eq!(grid.get_label(100, 100), BACKGROUND);

        // the one-pixel ring is addressable
        grid.set_label(-1, -1, VISITED);
        assert_eq!(grid.get_label(-1, -1), VISITED);
        grid.set_label(3, 2, VISITED);
        assert_eq!(grid.get_label(3, 2), VISITED);
        assert_eq!(grid.clear_visited(), 2);
        assert_eq!(grid.get_label(-1, -1), BACKGROUND);
    }

    #[test]
    fn test_next_label_sequence() {
        let mut grid = LabelGrid::new(1, 1).unwrap();
        assert_eq!(grid.max_label(), 0);
        assert_eq!(grid.next_label(), 2);
        assert_eq!(grid.next_label(), 3);
        assert_eq!(grid.next_label(), 4);
        assert_eq!(grid.max_label(), 4);

        grid.set_max_label(2);
        assert_eq!(grid.next_label(), 3);
    }

    #[test]
    fn test_labels_iterator_is_row_major() {
        let mut grid = LabelGrid::new(2, 2).unwrap();
        grid.set_label(1, 0, 5);
        grid.set_label(0, 1, 6);
        let cells: Vec<_> = grid.labels().collect();
        assert_eq!(cells, vec![(0, 0, 0), (1, 0, 5), (0, 1, 6), (1, 1, 0)]);
    }
}
