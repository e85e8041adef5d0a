//! Region aggregation and label images
//!
//! [`collect_regions`] turns any fully labeled [`LabelGrid`] into region
//! records in one pass over the grid. The label-image helpers map the grid
//! back into pixel space for display.

use crate::grid::{LabelGrid, MIN_LABEL};
use crate::region::Region;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Opaque black, the colour of background pixels
pub const BACKGROUND_COLOR: u32 = 0x0000_00ff;

/// Aggregate one [`Region`] per label found in `grid`.
///
/// Regions come back in ascending label order, or by descending pixel count
/// if `sort_by_size` is set (ties keep label order). Labels that were
/// allocated but never used produce no region, and labels written by the
/// caller count even if the grid's counter never reached them. The grid is
/// only read, so repeated calls return identical results.
pub fn collect_regions(grid: &LabelGrid, sort_by_size: bool) -> Vec<Region> {
    let mut by_label: BTreeMap<i32, Region> = BTreeMap::new();
    for (u, v, label) in grid.labels() {
        if label >= MIN_LABEL {
            by_label
                .entry(label)
                .or_insert_with(|| Region::new(label))
                .add_pixel(u, v);
        }
    }

    let mut regions: Vec<Region> = by_label
        .into_values()
        .map(|mut r| {
            r.update();
            r
        })
        .collect();

    if sort_by_size {
        regions.sort_by(|a, b| b.size().cmp(&a.size()));
    }
    regions
}

/// Row-major label image; background and unlabeled pixels are 0
pub fn label_image(grid: &LabelGrid) -> Vec<u32> {
    grid.labels()
        .map(|(_, _, label)| if label >= MIN_LABEL { label as u32 } else { 0 })
        .collect()
}

/// Row-major colour image with one random colour per label, packed as
/// `0xRRGGBBAA`.
///
/// Colours are drawn in label order from an RNG seeded with `seed`, so the
/// same grid and seed always give the same image. Background is
/// [`BACKGROUND_COLOR`].
pub fn color_label_image(grid: &LabelGrid, seed: u64) -> Vec<u32> {
    let max_label = grid
        .labels()
        .map(|(_, _, label)| label)
        .fold(grid.max_label(), i32::max);
    let mut rng = StdRng::seed_from_u64(seed);
    let palette: Vec<u32> = (MIN_LABEL..=max_label)
        .map(|_| {
            let r: u32 = rng.random_range(64..=255);
            let g: u32 = rng.random_range(64..=255);
            let b: u32 = rng.random_range(64..=255);
            (r << 24) | (g << 16) | (b << 8) | 0xff
        })
        .collect();

    grid.labels()
        .map(|(_, _, label)| {
            if label >= MIN_LABEL {
                palette
                    .get((label - MIN_LABEL) as usize)
                    .copied()
                    .unwrap_or(BACKGROUND_COLOR)
            } else {
                BACKGROUND_COLOR
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::ConnectivityType;
    use crate::seedfill::label_breadth_first;
    use regionlab_core::BinaryImage;

    fn labeled(text: &str) -> LabelGrid {
        let image = BinaryImage::from_ascii(text).unwrap();
        let mut grid = LabelGrid::from_binary(&image).unwrap();
        label_breadth_first(&mut grid, ConnectivityType::EightWay);
        grid
    }

    const TWO_BLOBS: &str = "\
#....
...##
...##
";

    #[test]
    fn test_collect_regions() {
        let grid = labeled(TWO_BLOBS);
        let regions = collect_regions(&grid, false);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].label(), 2);
        assert_eq!(regions[0].size(), 1);
        assert_eq!(regions[1].label(), 3);
        assert_eq!(regions[1].size(), 4);
        assert_eq!(regions[1].centroid().unwrap(), (3.5, 1.5));

        let sorted = collect_regions(&grid, true);
        assert_eq!(sorted[0].label(), 3);
        assert_eq!(sorted[1].label(), 2);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let grid = labeled(TWO_BLOBS);
        assert_eq!(collect_regions(&grid, false), collect_regions(&grid, false));
    }

    #[test]
    fn test_unused_labels_are_dropped() {
        let mut grid = labeled(TWO_BLOBS);
        // allocated but never written
        grid.next_label();
        let regions = collect_regions(&grid, false);
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_externally_labeled_grid() {
        let mut grid = LabelGrid::new(3, 3).unwrap();
        grid.set_label(0, 0, 5);
        grid.set_label(1, 0, 5);
        grid.set_label(2, 2, 9);
        assert!(grid.max_label() < 5);

        let regions = collect_regions(&grid, false);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].label(), 5);
        assert_eq!(regions[0].size(), 2);
        assert_eq!(regions[0].centroid().unwrap(), (0.5, 0.0));
        assert_eq!(regions[1].label(), 9);
        assert_eq!(regions[1].size(), 1);

        let colors = color_label_image(&grid, 7);
        assert_ne!(colors[0], BACKGROUND_COLOR);
        assert_eq!(colors[0], colors[1]);
        assert_ne!(colors[8], BACKGROUND_COLOR);
        assert_eq!(colors[4], BACKGROUND_COLOR);
    }

    #[test]
    fn test_empty_grid() {
        let grid = LabelGrid::new(3, 3).unwrap();
        assert!(collect_regions(&grid, true).is_empty());
        assert_eq!(label_image(&grid), vec![0; 9]);
        assert_eq!(color_label_image(&grid, 1), vec![BACKGROUND_COLOR; 9]);
    }

    #[test]
    fn test_label_images() {
        let grid = labeled(TWO_BLOBS);
        let image = label_image(&grid);
        assert_eq!(image[0], 2);
        assert_eq!(image[3 + 5], 3);
        assert_eq!(image[1], 0);

        let colors = color_label_image(&grid, 42);
        assert_eq!(colors, color_label_image(&grid, 42));
        assert_eq!(colors[1], BACKGROUND_COLOR);
        assert_ne!(colors[0], BACKGROUND_COLOR);
        assert_eq!(colors[0] & 0xff, 0xff);
        assert_eq!(colors[8], colors[9]);
    }
}
