//! # stepwise_pathfinding
//!
//! A grid-based pathfinding system built to be advanced one unit of work at a time. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over a boolean occupancy grid, driven
//! by an indexed binary heap, followed by a string-pulling pass that prunes the grid path down to
//! the waypoints that are needed to keep line of sight between consecutive points.
//!
//! Both phases can either be stepped (one expansion or one pruning test per call, for
//! visualisation) or run to completion, selected per call through [StepMode].
//! Pre-computes [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! on the grid so callers can classify a query as unreachable without searching.
pub mod cell;
pub mod error;
pub mod heap;
pub mod occupancy_grid;
pub mod pathfinder;
pub mod search;
pub mod settings;
pub mod smoothing;

pub use error::{Result, SearchError};
pub use glam::Vec2;
pub use grid_util::point::Point;
pub use occupancy_grid::OccupancyGrid;
pub use pathfinder::Pathfinder;
pub use search::{AStar, SearchStatus};
pub use settings::{Connectivity, SearchSettings, StepMode};
pub use smoothing::{has_line_of_sight, SmoothStatus};

use itertools::Itertools;

/// Cost of a straight (orthogonal) move.
pub const C: i32 = 10;
/// Cost of a diagonal move, roughly `C * sqrt(2)`.
pub const D: i32 = 14;

/// Whether a move between two adjacent cells is straight rather than diagonal.
pub fn is_orthogonal(a: &Point, b: &Point) -> bool {
    a.x == b.x || a.y == b.y
}

/// Sums the step costs along a sequence of adjacent cells, using [C] for straight moves and [D]
/// for diagonal ones. The first point is treated as the origin and contributes no cost.
pub fn path_cost(points: &[Point]) -> i32 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| if is_orthogonal(a, b) { C } else { D })
        .sum()
}

/// Euclidean length of the polyline through the given waypoints.
pub fn waypoints_length(waypoints: &[Vec2]) -> f32 {
    waypoints
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(*b))
        .sum()
}
