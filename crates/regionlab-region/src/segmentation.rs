//! Segmentation runs
//!
//! [`segment`] is the one-call entry point: it builds a [`LabelGrid`] from
//! the input, labels it with the selected [`LabelingMethod`], aggregates
//! the regions and, for the contour tracer, attaches each contour to its
//! region. The resulting [`Segmentation`] owns the grid, the regions and
//! the contour lists side by side; regions refer to contours by index.

use crate::conncomp::ConnectivityType;
use crate::contour::{Contour, ContourKind};
use crate::error::{RegionError, RegionResult};
use crate::grid::{LabelGrid, MIN_LABEL};
use crate::label::{collect_regions, color_label_image, label_image};
use crate::region::Region;
use crate::seedfill::{label_breadth_first, label_depth_first, label_recursive};
use crate::sequential::label_sequential;
use crate::tracer::{TracedContours, trace_regions};
use regionlab_core::{BinaryImage, Point};
use std::collections::HashMap;
use tracing::{debug, debug_span};

/// Labeling algorithm used for a segmentation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelingMethod {
    /// Flood fill with a FIFO queue
    BreadthFirst,
    /// Flood fill with a LIFO stack
    DepthFirst,
    /// Flood fill in recursive visiting order; slowest, for small inputs
    Recursive,
    /// Two-pass labeling with equivalence resolution
    Sequential,
    /// Single-pass labeling that also traces outer and hole contours
    #[default]
    RegionContour,
}

impl LabelingMethod {
    /// All methods, in declaration order
    pub const ALL: [LabelingMethod; 5] = [
        LabelingMethod::BreadthFirst,
        LabelingMethod::DepthFirst,
        LabelingMethod::Recursive,
        LabelingMethod::Sequential,
        LabelingMethod::RegionContour,
    ];

    /// Check whether this method produces contours
    pub fn traces_contours(self) -> bool {
        self == LabelingMethod::RegionContour
    }
}

/// Options for a segmentation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentationOptions {
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
    /// Labeling algorithm
    pub method: LabelingMethod,
    /// Return regions largest first instead of in label order
    pub sort_by_size: bool,
}

impl SegmentationOptions {
    /// Create new options with the specified method
    pub fn new(method: LabelingMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the labeling method
    pub fn with_method(mut self, method: LabelingMethod) -> Self {
        self.method = method;
        self
    }

    /// Set whether regions are sorted by descending size
    pub fn with_sort_by_size(mut self, sort_by_size: bool) -> Self {
        self.sort_by_size = sort_by_size;
        self
    }
}

/// Result of one segmentation run
#[derive(Debug, Clone)]
pub struct Segmentation {
    grid: LabelGrid,
    regions: Vec<Region>,
    index: HashMap<i32, usize>,
    outer: Vec<Contour>,
    inner: Vec<Contour>,
    options: SegmentationOptions,
}

/// Segment a binary image into labeled regions.
///
/// An image without foreground is not an error; the result simply has no
/// regions.
///
/// # Errors
///
/// Returns the internal-consistency variants of [`RegionError`] if a
/// labeling invariant is broken. These never stem from the input.
pub fn segment(image: &BinaryImage, options: &SegmentationOptions) -> RegionResult<Segmentation> {
    let span = debug_span!(
        "segment",
        width = image.width(),
        height = image.height(),
        method = ?options.method,
        connectivity = ?options.connectivity
    );
    let _enter = span.enter();

    let mut grid = LabelGrid::from_binary(image)?;
    let conn = options.connectivity;
    let contours = match options.method {
        LabelingMethod::BreadthFirst => {
            label_breadth_first(&mut grid, conn);
            TracedContours::default()
        }
        LabelingMethod::DepthFirst => {
            label_depth_first(&mut grid, conn);
            TracedContours::default()
        }
        LabelingMethod::Recursive => {
            label_recursive(&mut grid, conn);
            TracedContours::default()
        }
        LabelingMethod::Sequential => {
            label_sequential(&mut grid, conn)?;
            TracedContours::default()
        }
        LabelingMethod::RegionContour => trace_regions(image, &mut grid, conn)?,
    };

    let segmentation = Segmentation::assemble(grid, contours, *options)?;
    debug!(
        regions = segmentation.regions.len(),
        outer_contours = segmentation.outer.len(),
        inner_contours = segmentation.inner.len(),
        "segmentation finished"
    );
    Ok(segmentation)
}

/// Segment a row-major byte grid where any value `> 0` is foreground.
///
/// # Errors
///
/// Returns [`RegionError::InvalidDimensions`] for a zero width or height,
/// and [`RegionError::Core`] if `data` does not hold `width * height` bytes.
pub fn segment_bytes(
    width: u32,
    height: u32,
    data: &[u8],
    options: &SegmentationOptions,
) -> RegionResult<Segmentation> {
    if width == 0 || height == 0 {
        return Err(RegionError::InvalidDimensions { width, height });
    }
    let image = BinaryImage::from_bytes(width, height, data)?;
    segment(&image, options)
}

impl Segmentation {
    fn assemble(
        grid: LabelGrid,
        contours: TracedContours,
        options: SegmentationOptions,
    ) -> RegionResult<Self> {
        let mut regions = collect_regions(&grid, options.sort_by_size);
        let index: HashMap<i32, usize> = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.label(), i))
            .collect();

        for (i, contour) in contours.outer.iter().enumerate() {
            let slot = Self::owner(&index, contour)?;
            regions[slot].set_outer_contour(i);
        }
        for (i, contour) in contours.inner.iter().enumerate() {
            let slot = Self::owner(&index, contour)?;
            regions[slot].add_inner_contour(i);
        }

        Ok(Self {
            grid,
            regions,
            index,
            outer: contours.outer,
            inner: contours.inner,
            options,
        })
    }

    fn owner(index: &HashMap<i32, usize>, contour: &Contour) -> RegionResult<usize> {
        index
            .get(&contour.label())
            .copied()
            .ok_or(RegionError::UnmatchedContour {
                label: contour.label(),
                kind: contour.kind(),
            })
    }

    /// Options this run was made with
    pub fn options(&self) -> &SegmentationOptions {
        &self.options
    }

    /// All regions, in label order or largest first per the options
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Region with `label`
    pub fn region(&self, label: i32) -> Option<&Region> {
        self.index.get(&label).map(|&i| &self.regions[i])
    }

    /// Region owning pixel `(u, v)`, if any
    pub fn region_at(&self, u: i32, v: i32) -> Option<&Region> {
        self.region(self.label(u, v))
    }

    /// Label at `(u, v)`; 0 for background and outside the image
    pub fn label(&self, u: i32, v: i32) -> i32 {
        if self.grid.in_bounds(u, v) {
            self.grid.get_label(u, v).max(0)
        } else {
            0
        }
    }

    /// Check whether pixel `(u, v)` belongs to `region`
    pub fn contains(&self, region: &Region, u: i32, v: i32) -> bool {
        self.label(u, v) == region.label()
    }

    /// Pixels of `region` in row-major order
    pub fn region_pixels<'a>(&'a self, region: &'a Region) -> impl Iterator<Item = Point> + 'a {
        let (left, right) = (region.left(), region.right());
        (region.top()..=region.bottom())
            .flat_map(move |v| (left..=right).map(move |u| Point::new(u, v)))
            .filter(move |p| self.contains(region, p.x, p.y))
    }

    /// Outer contours in discovery order; empty unless the run traced contours
    pub fn outer_contours(&self) -> &[Contour] {
        &self.outer
    }

    /// Hole contours in discovery order
    pub fn inner_contours(&self) -> &[Contour] {
        &self.inner
    }

    /// Outer contours, longest first
    pub fn outer_contours_sorted(&self) -> Vec<&Contour> {
        sorted_by_length(&self.outer)
    }

    /// Hole contours, longest first
    pub fn inner_contours_sorted(&self) -> Vec<&Contour> {
        sorted_by_length(&self.inner)
    }

    /// Outer contour of `region`
    pub fn outer_contour_of(&self, region: &Region) -> Option<&Contour> {
        region.outer_contour_index().and_then(|i| self.outer.get(i))
    }

    /// Hole contours of `region`
    pub fn inner_contours_of<'a>(
        &'a self,
        region: &'a Region,
    ) -> impl Iterator<Item = &'a Contour> + 'a {
        region
            .inner_contour_indices()
            .iter()
            .filter_map(move |&i| self.inner.get(i))
    }

    /// The final label grid
    pub fn label_grid(&self) -> &LabelGrid {
        &self.grid
    }

    /// Row-major label image, 0 for background
    pub fn label_image(&self) -> Vec<u32> {
        label_image(&self.grid)
    }

    /// Row-major colour image, one reproducible random colour per region
    pub fn color_label_image(&self, seed: u64) -> Vec<u32> {
        color_label_image(&self.grid, seed)
    }

    /// Smallest label a region can carry
    pub fn min_label(&self) -> i32 {
        MIN_LABEL
    }

    /// Largest label in use, 0 if there are no regions
    pub fn max_label(&self) -> i32 {
        self.regions.iter().map(Region::label).max().unwrap_or(0)
    }

    /// Contours of the given kind
    pub fn contours(&self, kind: ContourKind) -> &[Contour] {
        match kind {
            ContourKind::Outer => &self.outer,
            ContourKind::Inner => &self.inner,
        }
    }
}

fn sorted_by_length(contours: &[Contour]) -> Vec<&Contour> {
    let mut sorted: Vec<&Contour> = contours.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(text: &str) -> BinaryImage {
        BinaryImage::from_ascii(text).unwrap()
    }

    const SINGLE: &str = ".....\n.....\n..#..\n.....\n.....\n";

    #[test]
    fn test_single_pixel_every_method() {
        for method in LabelingMethod::ALL {
            for conn in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
                let opts = SegmentationOptions::new(method).with_connectivity(conn);
                let seg = segment(&image(SINGLE), &opts).unwrap();
                assert_eq!(seg.region_count(), 1, "{method:?}");
                let r = &seg.regions()[0];
                assert_eq!(r.size(), 1);
                assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (2, 2, 2, 2));
                assert_eq!(r.centroid().unwrap(), (2.0, 2.0));
                if method.traces_contours() {
                    let outer = seg.outer_contour_of(r).unwrap();
                    assert_eq!(outer.points(), &[Point::new(2, 2)]);
                } else {
                    assert!(seg.outer_contour_of(r).is_none());
                }
            }
        }
    }

    #[test]
    fn test_annulus_has_one_hole() {
        let text = "\
.......
.#####.
.#####.
.##.##.
.#####.
.#####.
.......
";
        let seg = segment(&image(text), &SegmentationOptions::default()).unwrap();
        assert_eq!(seg.region_count(), 1);
        assert_eq!(seg.outer_contours().len(), 1);
        assert_eq!(seg.inner_contours().len(), 1);
        let r = &seg.regions()[0];
        assert!(r.has_holes());
        assert_eq!(seg.inner_contours_of(r).count(), 1);
        assert_eq!(r.size(), 24);
        assert!(seg.outer_contour_of(r).unwrap().signed_area() < 0.0);
        assert!(seg.inner_contours_of(r).all(|c| c.signed_area() > 0.0));
    }

    #[test]
    fn test_queries() {
        let text = "\
##...
##..#
....#
";
        let opts = SegmentationOptions::new(LabelingMethod::Sequential).with_sort_by_size(true);
        let seg = segment(&image(text), &opts).unwrap();
        assert_eq!(seg.region_count(), 2);
        assert_eq!(seg.regions()[0].size(), 4);
        assert_eq!(seg.min_label(), 2);
        assert_eq!(seg.max_label(), 3);

        let big = seg.region_at(1, 1).unwrap();
        assert_eq!(big.label(), 2);
        assert!(seg.contains(big, 0, 0));
        assert!(!seg.contains(big, 4, 1));
        assert!(seg.region_at(2, 0).is_none());
        assert_eq!(seg.label(-1, 0), 0);
        assert_eq!(seg.region(3).unwrap().size(), 2);

        let pixels: Vec<_> = seg.region_pixels(seg.region(3).unwrap()).collect();
        assert_eq!(pixels, vec![Point::new(4, 1), Point::new(4, 2)]);
        assert_eq!(seg.label_image(), vec![2, 2, 0, 0, 0, 2, 2, 0, 0, 3, 0, 0, 0, 0, 3]);
        assert!(seg.outer_contours().is_empty());
    }

    #[test]
    fn test_contours_sorted_longest_first() {
        let text = "\
#..###
...###
...###
";
        let seg = segment(&image(text), &SegmentationOptions::default()).unwrap();
        let sorted = seg.outer_contours_sorted();
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].len(), 8);
        assert_eq!(sorted[1].len(), 1);
        assert!(seg.inner_contours_sorted().is_empty());
        assert_eq!(seg.contours(ContourKind::Outer).len(), 2);
    }

    #[test]
    fn test_empty_image_is_not_an_error() {
        let seg = segment_bytes(4, 3, &[0; 12], &SegmentationOptions::default()).unwrap();
        assert_eq!(seg.region_count(), 0);
        assert_eq!(seg.max_label(), 0);
        assert!(seg.outer_contours().is_empty());
    }

    #[test]
    fn test_segment_bytes_validation() {
        let opts = SegmentationOptions::default();
        assert!(matches!(
            segment_bytes(0, 3, &[], &opts),
            Err(RegionError::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(matches!(
            segment_bytes(2, 2, &[1, 0, 1], &opts),
            Err(RegionError::Core(_))
        ));
        let seg = segment_bytes(2, 2, &[0, 200, 0, 7], &opts).unwrap();
        assert_eq!(seg.region_count(), 1);
        assert_eq!(seg.regions()[0].size(), 2);
    }

    #[test]
    fn test_options_builders() {
        let opts = SegmentationOptions::default();
        assert_eq!(opts.connectivity, ConnectivityType::EightWay);
        assert_eq!(opts.method, LabelingMethod::RegionContour);
        assert!(!opts.sort_by_size);

        let opts = SegmentationOptions::new(LabelingMethod::DepthFirst)
            .with_connectivity(ConnectivityType::FourWay)
            .with_method(LabelingMethod::Recursive)
            .with_sort_by_size(true);
        assert_eq!(opts.method, LabelingMethod::Recursive);
        assert_eq!(opts.connectivity, ConnectivityType::FourWay);
        assert!(opts.sort_by_size);
    }
}
