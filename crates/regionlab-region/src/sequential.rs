//! Sequential (two-pass) labeling
//!
//! Labels components without flood filling:
//!
//! 1. Row-major provisional pass. Each foreground pixel takes the smallest
//!    label among its already-scanned neighbours, or a fresh label if it has
//!    none; every other neighbour label is recorded as a collision.
//! 2. Collisions are resolved into equivalence classes.
//! 3. Each grid cell is rewritten through the compacted replacement table,
//!    so final labels run contiguously from [`MIN_LABEL`].
//!
//! Final label numbers follow the row-major order of each component's first
//! pixel, the same numbering the flood-fill labelers produce.

use crate::conncomp::ConnectivityType;
use crate::equivalence::{CollisionSet, resolve_collisions};
use crate::error::{RegionError, RegionResult};
use crate::grid::{FOREGROUND, LabelGrid, MIN_LABEL};
use tracing::debug;

/// Label all components with the sequential two-pass method.
///
/// Returns the number of regions found.
///
/// # Errors
///
/// Returns [`RegionError::LabelOutOfRange`] if the grid holds a label the
/// grid's own counter never allocated (for example one written with
/// [`LabelGrid::set_label`] before the call), or if the provisional labels
/// and the replacement table otherwise disagree.
pub fn label_sequential(grid: &mut LabelGrid, connectivity: ConnectivityType) -> RegionResult<usize> {
    let collisions = assign_provisional_labels(grid, connectivity);
    debug!(
        max_provisional = grid.max_label(),
        collisions = collisions.len(),
        "sequential provisional pass"
    );

    let max_label = grid.max_label();
    let mut used = vec![false; max_label.max(0) as usize + 1];
    let table_size = used.len();
    for (_, _, label) in grid.labels() {
        if label >= MIN_LABEL {
            let slot = used
                .get_mut(label as usize)
                .ok_or(RegionError::LabelOutOfRange { label, table_size })?;
            *slot = true;
        }
    }

    let (table, new_max) = resolve_collisions(&collisions, max_label, |label| {
        used.get(label as usize).copied().unwrap_or(false)
    })?;
    relabel(grid, &table)?;
    grid.set_max_label(new_max);

    Ok(if new_max >= MIN_LABEL {
        (new_max - MIN_LABEL + 1) as usize
    } else {
        0
    })
}

/// Pass 1: give every foreground pixel a provisional label.
pub(crate) fn assign_provisional_labels(
    grid: &mut LabelGrid,
    connectivity: ConnectivityType,
) -> CollisionSet {
    let mut collisions = CollisionSet::new();
    let causal = connectivity.causal_neighbors();

    for v in 0..grid.height() as i32 {
        for u in 0..grid.width() as i32 {
            if grid.get_label(u, v) != FOREGROUND {
                continue;
            }

            let smallest = causal
                .iter()
                .map(|&(dx, dy)| grid.get_label(u + dx, v + dy))
                .filter(|&l| l >= MIN_LABEL)
                .min();

            let label = match smallest {
                None => grid.next_label(),
                Some(min) => {
                    for &(dx, dy) in causal {
                        let other = grid.get_label(u + dx, v + dy);
                        if other >= MIN_LABEL && other != min {
                            collisions.register(min, other);
                        }
                    }
                    min
                }
            };
            grid.set_label(u, v, label);
        }
    }

    collisions
}

/// Pass 3: rewrite every labeled cell through `table`.
fn relabel(grid: &mut LabelGrid, table: &[i32]) -> RegionResult<()> {
    for v in 0..grid.height() as i32 {
        for u in 0..grid.width() as i32 {
            let label = grid.get_label(u, v);
            if label < MIN_LABEL {
                continue;
            }
            let replacement = table
                .get(label as usize)
                .copied()
                .ok_or(RegionError::LabelOutOfRange {
                    label,
                    table_size: table.len(),
                })?;
            grid.set_label(u, v, replacement);
        }
    }
    Ok(())
}
