//! Connectivity policy
//!
//! Selects whether diagonal neighbours count as adjacent. The same value
//! drives flood-fill adjacency, the causal neighbourhood of the sequential
//! labeler, and the step size of the boundary follower.

use regionlab_core::Point;

/// Neighbour offsets for flood filling: right, down, up, left
const FLOOD_OFFSETS_4: [(i32, i32); 4] = [(1, 0), (0, 1), (0, -1), (-1, 0)];

/// Flood offsets followed by the four diagonals
const FLOOD_OFFSETS_8: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Already-scanned neighbours in a row-major pass: west, north
const CAUSAL_OFFSETS_4: [(i32, i32); 2] = [(-1, 0), (0, -1)];

/// Already-scanned neighbours in a row-major pass: west, northwest, north, northeast
const CAUSAL_OFFSETS_8: [(i32, i32); 4] = [(-1, 0), (-1, -1), (0, -1), (1, -1)];

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbour offsets in flood-fill order
    #[inline]
    pub fn neighbors(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FLOOD_OFFSETS_4,
            ConnectivityType::EightWay => &FLOOD_OFFSETS_8,
        }
    }

    /// Neighbours that precede a pixel in row-major scan order
    #[inline]
    pub fn causal_neighbors(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &CAUSAL_OFFSETS_4,
            ConnectivityType::EightWay => &CAUSAL_OFFSETS_8,
        }
    }

    /// Increment applied to a direction code when the boundary follower
    /// skips a background neighbour
    #[inline]
    pub(crate) fn direction_step(self) -> usize {
        match self {
            ConnectivityType::FourWay => 2,
            ConnectivityType::EightWay => 1,
        }
    }

    /// Maximum number of neighbours probed per boundary step
    #[inline]
    pub(crate) fn probe_count(self) -> usize {
        match self {
            ConnectivityType::FourWay => 4,
            ConnectivityType::EightWay => 7,
        }
    }

    /// Direction code at which the boundary follower starts probing when it
    /// enters a hole from the pixel left of the hole's first background cell
    #[inline]
    pub(crate) fn inner_start_direction(self) -> usize {
        match self {
            ConnectivityType::FourWay => 2,
            ConnectivityType::EightWay => 1,
        }
    }

    /// Check whether two distinct points are neighbours under this connectivity
    pub fn is_adjacent(self, a: Point, b: Point) -> bool {
        match self {
            ConnectivityType::FourWay => a.city_block_distance(b) == 1,
            ConnectivityType::EightWay => a.chessboard_distance(b) == 1,
        }
    }
}
