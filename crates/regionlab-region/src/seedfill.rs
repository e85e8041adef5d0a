//! Flood-fill labeling
//!
//! Three labelers that share one shape: scan the grid row-major, and on
//! every unlabeled foreground pixel allocate a new label and flood it through
//! the pixel's connected component. They differ only in traversal order:
//!
//! - [`label_breadth_first`] - FIFO queue
//! - [`label_depth_first`] - LIFO stack
//! - [`label_recursive`] - the visiting order of a recursive fill, with
//!   the recursion frames kept on the heap
//!
//! All three produce the same partition of the foreground; label numbers
//! follow the row-major order of each component's first pixel.

use crate::conncomp::ConnectivityType;
use crate::grid::{FOREGROUND, LabelGrid};
use std::collections::VecDeque;

/// Scan for unlabeled foreground and hand each seed to `fill`.
///
/// Returns the number of labels allocated.
fn label_with<F>(grid: &mut LabelGrid, connectivity: ConnectivityType, mut fill: F) -> usize
where
    F: FnMut(&mut LabelGrid, i32, i32, i32, ConnectivityType) -> usize,
{
    let mut regions = 0;
    for v in 0..grid.height() as i32 {
        for u in 0..grid.width() as i32 {
            if grid.get_label(u, v) == FOREGROUND {
                let label = grid.next_label();
                fill(grid, u, v, label, connectivity);
                regions += 1;
            }
        }
    }
    regions
}

#[inline]
fn is_unlabeled(grid: &LabelGrid, x: i32, y: i32) -> bool {
    grid.in_bounds(x, y) && grid.get_label(x, y) == FOREGROUND
}

/// Label all components using a breadth-first flood fill.
///
/// Returns the number of regions found.
pub fn label_breadth_first(grid: &mut LabelGrid, connectivity: ConnectivityType) -> usize {
    label_with(grid, connectivity, floodfill_breadth_first)
}

/// Label all components using a depth-first flood fill with an explicit stack.
///
/// Returns the number of regions found.
pub fn label_depth_first(grid: &mut LabelGrid, connectivity: ConnectivityType) -> usize {
    label_with(grid, connectivity, floodfill_depth_first)
}

/// Label all components in the order a recursive flood fill would visit them.
///
/// The frames live in a `Vec`, so deep components cannot overflow the call
/// stack, but every frame is kept until its neighbours are exhausted. This
/// is the slowest and most memory-hungry of the flood fills; prefer the
/// breadth-first, depth-first or sequential labelers for large images.
///
/// Returns the number of regions found.
pub fn label_recursive(grid: &mut LabelGrid, connectivity: ConnectivityType) -> usize {
    label_with(grid, connectivity, floodfill_recursive)
}

/// Fill the component containing `(u, v)` with `label` using a FIFO queue.
///
/// Returns the number of pixels relabeled.
pub fn floodfill_breadth_first(
    grid: &mut LabelGrid,
    u: i32,
    v: i32,
    label: i32,
    connectivity: ConnectivityType,
) -> usize {
    let mut filled = 0;
    let mut queue = VecDeque::new();
    queue.push_back((u, v));

    while let Some((x, y)) = queue.pop_front() {
        if !is_unlabeled(grid, x, y) {
            continue;
        }
        grid.set_label(x, y, label);
        filled += 1;
        for &(dx, dy) in connectivity.neighbors() {
            queue.push_back((x + dx, y + dy));
        }
    }

    filled
}

/// Fill the component containing `(u, v)` with `label` using a LIFO stack.
///
/// Returns the number of pixels relabeled.
pub fn floodfill_depth_first(
    grid: &mut LabelGrid,
    u: i32,
    v: i32,
    label: i32,
    connectivity: ConnectivityType,
) -> usize {
    let mut filled = 0;
    let mut stack = vec![(u, v)];

    while let Some((x, y)) = stack.pop() {
        if !is_unlabeled(grid, x, y) {
            continue;
        }
        grid.set_label(x, y, label);
        filled += 1;
        for &(dx, dy) in connectivity.neighbors() {
            stack.push((x + dx, y + dy));
        }
    }

    filled
}

/// Fill the component containing `(u, v)` with `label`, descending into each
/// neighbour completely before trying the next one.
///
/// Returns the number of pixels relabeled.
pub fn floodfill_recursive(
    grid: &mut LabelGrid,
    u: i32,
    v: i32,
    label: i32,
    connectivity: ConnectivityType,
) -> usize {
    if !is_unlabeled(grid, u, v) {
        return 0;
    }
    let offsets = connectivity.neighbors();
    grid.set_label(u, v, label);
    let mut filled = 1;

    // (x, y, index of the next neighbour to try)
    let mut frames: Vec<(i32, i32, usize)> = vec![(u, v, 0)];
    while let Some(frame) = frames.last_mut() {
        let (x, y, k) = *frame;
        if k == offsets.len() {
            frames.pop();
            continue;
        }
        frame.2 += 1;

        let (dx, dy) = offsets[k];
        let (nx, ny) = (x + dx, y + dy);
        if is_unlabeled(grid, nx, ny) {
            grid.set_label(nx, ny, label);
            filled += 1;
            frames.push((nx, ny, 0));
        }
    }

    filled
}
