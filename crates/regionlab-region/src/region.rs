//! Region records
//!
//! A [`Region`] summarises one labeled component: pixel count, inclusive
//! bounding extremes and the raw coordinate sums from which centroid and
//! second-order moments are derived. Contours are referenced by index into
//! the owning segmentation's contour lists.

use crate::error::{RegionError, RegionResult};
use regionlab_core::Box;
use std::collections::BTreeMap;
use std::fmt;

/// Second-order central moments of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralMoments {
    /// Sum of squared x deviations from the centroid
    pub mu20: f64,
    /// Sum of squared y deviations from the centroid
    pub mu02: f64,
    /// Sum of products of x and y deviations
    pub mu11: f64,
}

/// Statistics of one labeled component
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    label: i32,
    size: usize,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    x1_sum: i64,
    y1_sum: i64,
    x2_sum: i64,
    y2_sum: i64,
    xy_sum: i64,
    centroid: Option<(f64, f64)>,
    outer_contour: Option<usize>,
    inner_contours: Vec<usize>,
}

impl Region {
    /// Create an empty region for `label`
    pub(crate) fn new(label: i32) -> Self {
        Self {
            label,
            size: 0,
            left: i32::MAX,
            top: i32::MAX,
            right: -1,
            bottom: -1,
            x1_sum: 0,
            y1_sum: 0,
            x2_sum: 0,
            y2_sum: 0,
            xy_sum: 0,
            centroid: None,
            outer_contour: None,
            inner_contours: Vec::new(),
        }
    }

    /// Accumulate pixel `(u, v)`
    pub(crate) fn add_pixel(&mut self, u: i32, v: i32) {
        let (x, y) = (u as i64, v as i64);
        self.size += 1;
        self.x1_sum += x;
        self.y1_sum += y;
        self.x2_sum += x * x;
        self.y2_sum += y * y;
        self.xy_sum += x * y;
        self.left = self.left.min(u);
        self.top = self.top.min(v);
        self.right = self.right.max(u);
        self.bottom = self.bottom.max(v);
    }

    /// Finalize after the last pixel; computes the centroid
    pub(crate) fn update(&mut self) {
        self.centroid = if self.size > 0 {
            let n = self.size as f64;
            Some((self.x1_sum as f64 / n, self.y1_sum as f64 / n))
        } else {
            None
        };
    }

    pub(crate) fn set_outer_contour(&mut self, index: usize) {
        self.outer_contour = Some(index);
    }

    pub(crate) fn add_inner_contour(&mut self, index: usize) {
        self.inner_contours.push(index);
    }

    /// Region label, `>= 2`
    #[inline]
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Number of pixels
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether no pixel was accumulated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Leftmost pixel column (inclusive)
    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Topmost pixel row (inclusive)
    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Rightmost pixel column (inclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.right
    }

    /// Bottom pixel row (inclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Bounding rectangle, `None` for an empty region
    pub fn bounding_box(&self) -> Option<Box> {
        if self.is_empty() {
            return None;
        }
        Box::from_extremes(self.left, self.top, self.right, self.bottom).ok()
    }

    /// Sum of x coordinates
    pub fn x1_sum(&self) -> i64 {
        self.x1_sum
    }

    /// Sum of y coordinates
    pub fn y1_sum(&self) -> i64 {
        self.y1_sum
    }

    /// Sum of squared x coordinates
    pub fn x2_sum(&self) -> i64 {
        self.x2_sum
    }

    /// Sum of squared y coordinates
    pub fn y2_sum(&self) -> i64 {
        self.y2_sum
    }

    /// Sum of x * y
    pub fn xy_sum(&self) -> i64 {
        self.xy_sum
    }

    /// Mean pixel position `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyRegion`] if the region has no pixels.
    pub fn centroid(&self) -> RegionResult<(f64, f64)> {
        self.centroid
            .ok_or(RegionError::EmptyRegion { label: self.label })
    }

    /// Second-order central moments.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyRegion`] if the region has no pixels.
    pub fn central_moments(&self) -> RegionResult<CentralMoments> {
        if self.is_empty() {
            return Err(RegionError::EmptyRegion { label: self.label });
        }
        let n = self.size as f64;
        let (x1, y1) = (self.x1_sum as f64, self.y1_sum as f64);
        Ok(CentralMoments {
            mu20: self.x2_sum as f64 - x1 * x1 / n,
            mu02: self.y2_sum as f64 - y1 * y1 / n,
            mu11: self.xy_sum as f64 - x1 * y1 / n,
        })
    }

    /// Covariance matrix `[[mu20, mu11], [mu11, mu02]] / size`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyRegion`] if the region has no pixels.
    pub fn covariance_matrix(&self) -> RegionResult<[[f64; 2]; 2]> {
        let m = self.central_moments()?;
        let n = self.size as f64;
        Ok([[m.mu20 / n, m.mu11 / n], [m.mu11 / n, m.mu02 / n]])
    }

    /// Index of the outer contour in the segmentation's outer contour list
    pub fn outer_contour_index(&self) -> Option<usize> {
        self.outer_contour
    }

    /// Indices of the hole contours in the segmentation's inner contour list
    pub fn inner_contour_indices(&self) -> &[usize] {
        &self.inner_contours
    }

    /// Check whether any hole contour is attached
    pub fn has_holes(&self) -> bool {
        !self.inner_contours.is_empty()
    }

    /// Number of attached hole contours
    pub fn hole_count(&self) -> usize {
        self.inner_contours.len()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region {}, area = {}, bounding box = ({}, {}, {}, {})",
            self.label, self.size, self.left, self.top, self.right, self.bottom
        )?;
        match self.centroid {
            Some((x, y)) => write!(f, ", centroid = ({:.2}, {:.2})", x, y)?,
            None => write!(f, ", centroid = undefined")?,
        }
        write!(f, ", holes = {}", self.inner_contours.len())
    }
}

/// Typed per-region values computed downstream, keyed by region label
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable<T> {
    entries: BTreeMap<i32, T>,
}

impl<T> Default for RegionTable<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> RegionTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `value` to `region`, returning the previous value if any
    pub fn insert(&mut self, region: &Region, value: T) -> Option<T> {
        self.entries.insert(region.label(), value)
    }

    /// Value attached to `region`
    pub fn get(&self, region: &Region) -> Option<&T> {
        self.entries.get(&region.label())
    }

    /// Value attached to the region with `label`
    pub fn get_by_label(&self, label: i32) -> Option<&T> {
        self.entries.get(&label)
    }

    /// Detach and return the value for `region`
    pub fn remove(&mut self, region: &Region) -> Option<T> {
        self.entries.remove(&region.label())
    }

    /// Number of regions with a value
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(label, value)` in ascending label order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> {
        self.entries.iter().map(|(&label, value)| (label, value))
    }
}

impl<T> FromIterator<(i32, T)> for RegionTable<T> {
    fn from_iter<I: IntoIterator<Item = (i32, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(label: i32, x0: i32, y0: i32, side: i32) -> Region {
        let mut r = Region::new(label);
        for v in y0..y0 + side {
            for u in x0..x0 + side {
                r.add_pixel(u, v);
            }
        }
        r.update();
        r
    }

    #[test]
    fn test_square_statistics() {
        let r = square(2, 0, 0, 3);
        assert_eq!(r.size(), 9);
        assert_eq!(r.x1_sum(), 9);
        assert_eq!(r.y1_sum(), 9);
        assert_eq!(r.x2_sum(), 15);
        assert_eq!(r.xy_sum(), 9);
        assert_eq!(r.centroid().unwrap(), (1.0, 1.0));
        let m = r.central_moments().unwrap();
        assert_eq!(m.mu20, 6.0);
        assert_eq!(m.mu02, 6.0);
        assert_eq!(m.mu11, 0.0);
        let cov = r.covariance_matrix().unwrap();
        assert!((cov[0][0] - 6.0 / 9.0).abs() < 1e-12);
        assert_eq!(cov[0][1], 0.0);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (0, 0, 2, 2));
        assert_eq!(r.bounding_box(), Some(Box::new_unchecked(0, 0, 3, 3)));
    }

    #[test]
    fn test_diagonal_has_correlated_moments() {
        let mut r = Region::new(4);
        for i in 0..4 {
            r.add_pixel(i, i);
        }
        r.update();
        let m = r.central_moments().unwrap();
        assert_eq!(m.mu20, 5.0);
        assert_eq!(m.mu11, 5.0);
    }

    #[test]
    fn test_empty_region_refuses_moments() {
        let mut r = Region::new(7);
        r.update();
        assert!(r.is_empty());
        assert!(matches!(r.centroid(), Err(RegionError::EmptyRegion { label: 7 })));
        assert!(r.central_moments().is_err());
        assert!(r.covariance_matrix().is_err());
        assert_eq!(r.bounding_box(), None);
    }

    #[test]
    fn test_display() {
        let r = square(2, 0, 0, 3);
        assert_eq!(
            r.to_string(),
            "Region 2, area = 9, bounding box = (0, 0, 2, 2), centroid = (1.00, 1.00), holes = 0"
        );
    }

    #[test]
    fn test_contour_references() {
        let mut r = square(3, 1, 1, 2);
        assert!(!r.has_holes());
        r.set_outer_contour(0);
        r.add_inner_contour(4);
        r.add_inner_contour(6);
        assert_eq!(r.outer_contour_index(), Some(0));
        assert_eq!(r.inner_contour_indices(), &[4, 6]);
        assert_eq!(r.hole_count(), 2);
    }

    #[test]
    fn test_region_table() {
        let a = square(2, 0, 0, 1);
        let b = square(3, 5, 5, 2);
        let mut table = RegionTable::new();
        assert!(table.insert(&b, 1.5).is_none());
        table.insert(&a, 0.25);
        assert_eq!(table.insert(&a, 0.5), Some(0.25));
        assert_eq!(table.get(&a), Some(&0.5));
        assert_eq!(table.get_by_label(3), Some(&1.5));
        assert_eq!(table.iter().map(|(l, _)| l).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(table.remove(&b), Some(1.5));
        assert_eq!(table.len(), 1);
    }
}
