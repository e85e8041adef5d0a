//! Combined region labeling and contour tracing
//!
//! One row-major scan labels every component and records its outer
//! boundary and the boundaries of all its holes (Chang, Chen and Lu's
//! contour-tracing labeler). A per-row `label` tracks whether the scan is
//! currently inside a region:
//!
//! - entering an unlabeled foreground pixel starts a new region and traces
//!   its outer contour from that pixel;
//! - leaving a region onto a background pixel the follower has not yet
//!   visited starts a hole, traced from the last foreground pixel.
//!
//! The boundary follower marks every background pixel it probes as
//! [`VISITED`], which is how later rows recognise hole edges that have
//! already been traced. The marks are cleared before returning.

use crate::conncomp::ConnectivityType;
use crate::contour::{Contour, ContourKind, DIRECTION_DELTAS};
use crate::error::{RegionError, RegionResult};
use crate::grid::{BACKGROUND, LabelGrid, MIN_LABEL, VISITED};
use regionlab_core::{BinaryImage, Point};
use tracing::trace;

/// Direction in which outer traces start probing (East)
const OUTER_START: usize = 0;

/// Outer and inner contours produced by one tracing run, in discovery order
#[derive(Debug, Clone, Default)]
pub struct TracedContours {
    /// One outer contour per region
    pub outer: Vec<Contour>,
    /// Hole contours, any number per region
    pub inner: Vec<Contour>,
}

/// Label `grid` from `image` and trace all region contours.
///
/// `grid` must have the dimensions of `image`; foreground is read from
/// `image`, labels are written to `grid`. Labels are allocated in row-major
/// order of each region's first pixel.
///
/// # Errors
///
/// Returns [`RegionError::InvalidDimensions`] if the grid does not match the
/// image, and [`RegionError::TraceDiverged`] if the boundary follower fails
/// to close a contour (an internal inconsistency).
pub fn trace_regions(
    image: &BinaryImage,
    grid: &mut LabelGrid,
    connectivity: ConnectivityType,
) -> RegionResult<TracedContours> {
    if grid.width() != image.width() || grid.height() != image.height() {
        return Err(RegionError::InvalidDimensions {
            width: grid.width(),
            height: grid.height(),
        });
    }

    let max_steps = 8 * (image.width() as usize + 2) * (image.height() as usize + 2);
    let mut tracer = Tracer {
        image,
        grid,
        connectivity,
        max_steps,
    };
    let contours = tracer.run()?;
    let cleared = tracer.grid.clear_visited();
    trace!(cleared, "cleared visited marks");
    Ok(contours)
}

struct Tracer<'a> {
    image: &'a BinaryImage,
    grid: &'a mut LabelGrid,
    connectivity: ConnectivityType,
    max_steps: usize,
}

impl Tracer<'_> {
    fn run(&mut self) -> RegionResult<TracedContours> {
        let mut contours = TracedContours::default();
        let inner_start = self.connectivity.inner_start_direction();

        for v in 0..self.image.height() as i32 {
            let mut label = 0;
            for u in 0..self.image.width() as i32 {
                if self.image.is_foreground(u, v) {
                    if label != 0 {
                        self.grid.set_label(u, v, label);
                        continue;
                    }
                    let existing = self.grid.get_label(u, v);
                    if existing >= MIN_LABEL {
                        label = existing;
                    } else {
                        label = self.grid.next_label();
                        trace!(label, u, v, "new region");
                        let outer =
                            self.trace_contour(Point::new(u, v), OUTER_START, label, ContourKind::Outer)?;
                        contours.outer.push(outer);
                        self.grid.set_label(u, v, label);
                    }
                } else if label != 0 {
                    if self.grid.get_label(u, v) == BACKGROUND {
                        let inner = self.trace_contour(
                            Point::new(u - 1, v),
                            inner_start,
                            label,
                            ContourKind::Inner,
                        )?;
                        contours.inner.push(inner);
                    }
                    label = 0;
                }
            }
        }

        Ok(contours)
    }

    /// Follow one boundary from `start`, first probing in direction `dir`.
    ///
    /// The point list starts with the successor of `start` and ends with
    /// `start` itself. Tracing stops when the follower leaves `start`
    /// towards that same successor a second time.
    fn trace_contour(
        &mut self,
        start: Point,
        dir: usize,
        label: i32,
        kind: ContourKind,
    ) -> RegionResult<Contour> {
        let mut contour = Contour::new(label, kind);
        let (second, mut dir) = self.find_next_point(start, dir);
        contour.push(second);

        // isolated pixel
        if second == start {
            return Ok(contour);
        }

        let mut current = second;
        for _ in 0..self.max_steps {
            self.grid.set_label(current.x, current.y, label);
            let (next, next_dir) = self.find_next_point(current, (dir + 6) % 8);
            dir = next_dir;
            let previous = current;
            current = next;
            if previous == start && current == second {
                return Ok(contour);
            }
            contour.push(current);
        }

        Err(RegionError::TraceDiverged {
            x: start.x,
            y: start.y,
            label,
        })
    }

    /// Probe the neighbours of `point` from direction `dir` onwards.
    ///
    /// Returns the first foreground neighbour and the direction it was found
    /// in. Every background neighbour probed on the way is marked visited.
    /// If none is found the point itself is returned.
    fn find_next_point(&mut self, point: Point, mut dir: usize) -> (Point, usize) {
        let step = self.connectivity.direction_step();
        for _ in 0..self.connectivity.probe_count() {
            let (dx, dy) = DIRECTION_DELTAS[dir];
            let (x, y) = (point.x + dx, point.y + dy);
            if self.image.is_foreground(x, y) {
                return (Point::new(x, y), dir);
            }
            self.grid.set_label(x, y, VISITED);
            dir = (dir + step) % 8;
        }
        (point, dir)
    }
}
