//! Region contours
//!
//! A contour is the closed boundary polygon of one region, stored as the
//! ordered sequence of boundary pixels visited by the boundary follower.
//! There is no closing duplicate: the last point is a neighbour of the
//! first under the connectivity used for tracing.
//!
//! Outer contours run clockwise as seen on screen (y pointing down) and
//! hole contours run counter-clockwise.

use crate::conncomp::ConnectivityType;
use regionlab_core::{Box, Point};
use std::fmt;

/// Freeman chain-code direction, starting at East and turning clockwise on
/// screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// East (1, 0)
    East = 0,
    /// Southeast (1, 1)
    SouthEast = 1,
    /// South (0, 1)
    South = 2,
    /// Southwest (-1, 1)
    SouthWest = 3,
    /// West (-1, 0)
    West = 4,
    /// Northwest (-1, -1)
    NorthWest = 5,
    /// North (0, -1)
    North = 6,
    /// Northeast (1, -1)
    NorthEast = 7,
}

/// `(dx, dy)` for each direction code
pub(crate) const DIRECTION_DELTAS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        DIRECTION_DELTAS[self as usize].0
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        DIRECTION_DELTAS[self as usize].1
    }

    /// Direction code as an index 0..8
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get direction from a unit offset; `None` for `(0, 0)` or longer steps
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        DIRECTION_DELTAS
            .iter()
            .position(|&d| d == (dx, dy))
            .map(Self::from_index)
    }

    /// Create direction from index, taken mod 8
    #[inline]
    pub fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::East,
            1 => Direction::SouthEast,
            2 => Direction::South,
            3 => Direction::SouthWest,
            4 => Direction::West,
            5 => Direction::NorthWest,
            6 => Direction::North,
            _ => Direction::NorthEast,
        }
    }

    /// Check whether this is one of E, S, W, N
    #[inline]
    pub fn is_axial(self) -> bool {
        (self as usize) % 2 == 0
    }
}

/// Which side of a region a contour bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContourKind {
    /// Outer boundary (clockwise)
    #[default]
    Outer,
    /// Boundary of a hole (counter-clockwise)
    Inner,
}

impl fmt::Display for ContourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourKind::Outer => write!(f, "outer"),
            ContourKind::Inner => write!(f, "inner"),
        }
    }
}

/// Closed boundary of one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    label: i32,
    kind: ContourKind,
    points: Vec<Point>,
}

impl Contour {
    /// Create an empty contour for the region with `label`
    pub fn new(label: i32, kind: ContourKind) -> Self {
        Self {
            label,
            kind,
            points: Vec::new(),
        }
    }

    /// Create a contour from an ordered point list
    pub fn from_points(label: i32, kind: ContourKind, points: Vec<Point>) -> Self {
        Self {
            label,
            kind,
            points,
        }
    }

    /// Rebuild a contour by walking `codes` from `start`.
    ///
    /// If the walk ends back at `start`, that closing point is not repeated,
    /// so `from_chain_code` inverts [`Contour::chain_code`].
    pub fn from_chain_code(
        label: i32,
        kind: ContourKind,
        start: Point,
        codes: &[Direction],
    ) -> Self {
        let mut points = Vec::with_capacity(codes.len() + 1);
        points.push(start);
        let mut current = start;
        for &dir in codes {
            current = current.offset(dir.dx(), dir.dy());
            points.push(current);
        }
        if points.len() > 1 && current == start {
            points.pop();
        }
        Self::from_points(label, kind, points)
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Label of the region this contour bounds
    #[inline]
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Outer boundary or hole
    #[inline]
    pub fn kind(&self) -> ContourKind {
        self.kind
    }

    /// Boundary points in traversal order
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of boundary points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the contour has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest box covering every point, `None` for an empty contour
    pub fn bounding_box(&self) -> Option<Box> {
        let first = self.points.first()?;
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }
        Box::from_extremes(left, top, right, bottom).ok()
    }

    /// Signed polygon area by the shoelace formula.
    ///
    /// Positive for counter-clockwise traversal on screen (y down), so an
    /// outer contour yields a value `<= 0` and a hole contour `>= 0`.
    /// Contours with fewer than three points have zero area.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice: i64 = 0;
        for (i, p) in self.points.iter().enumerate() {
            let q = self.points[(i + 1) % n];
            twice += q.x as i64 * p.y as i64 - p.x as i64 * q.y as i64;
        }
        twice as f64 / 2.0
    }

    /// Check that consecutive points, including last to first, are
    /// neighbours under `connectivity`.
    ///
    /// A single-point contour is closed; an empty one is not.
    pub fn is_closed(&self, connectivity: ConnectivityType) -> bool {
        match self.points.len() {
            0 => false,
            1 => true,
            n => (0..n).all(|i| connectivity.is_adjacent(self.points[i], self.points[(i + 1) % n])),
        }
    }

    /// Freeman chain code of the closed contour, one code per point
    /// (the last code leads back to the first point).
    ///
    /// Returns `None` if two consecutive points are not 8-neighbours.
    /// A single-point contour has an empty chain code.
    pub fn chain_code(&self) -> Option<Vec<Direction>> {
        let n = self.points.len();
        if n < 2 {
            return Some(Vec::new());
        }
        (0..n)
            .map(|i| {
                let p = self.points[i];
                let q = self.points[(i + 1) % n];
                Direction::from_offset(q.x - p.x, q.y - p.y)
            })
            .collect()
    }

    /// Perimeter estimate: axial steps count 1, diagonal steps count sqrt(2)
    pub fn length(&self) -> f64 {
        match self.chain_code() {
            Some(codes) => codes
                .iter()
                .map(|d| if d.is_axial() { 1.0 } else { std::f64::consts::SQRT_2 })
                .sum(),
            None => 0.0,
        }
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contour {} ({}), {} points",
            self.label,
            self.kind,
            self.points.len()
        )
    }
}
