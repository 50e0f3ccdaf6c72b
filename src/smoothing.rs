//! Line-of-sight pruning of a grid path.
//!
//! The buffer is seeded with the start cell centre, the raw integer coordinate of every path
//! cell and the destination cell centre. A cursor starting at index 2 compares its point with the
//! point two positions earlier; when the two see each other the point in between is dropped,
//! otherwise the cursor moves on. The first and last points are never dropped.
use glam::Vec2;
use grid_util::point::Point;
use log::debug;

use crate::occupancy_grid::OccupancyGrid;
use crate::settings::sanitize_sight_step;

/// Progress of the smoothing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmoothStatus {
    /// The grid search has not found a path yet, so there is nothing to smooth.
    AwaitingGridPath,
    Smoothing,
    Done,
}

/// Samples the segment from `from` towards `to` every `step` cells and reports whether none of
/// the samples lands on an obstacle. Sampling stops once within one cell of `to`, or as soon as
/// a sample has moved past it. The step is passed through [sanitize_sight_step] first.
///
/// Segments whose samples cannot advance, because the step vanishes in `f32` rounding at large
/// coordinates, are reported as blocked.
pub fn has_line_of_sight(grid: &OccupancyGrid, from: Vec2, to: Vec2, step: f32) -> bool {
    let step = sanitize_sight_step(step);
    let direction = (to - from).normalize_or_zero();
    let initial_distance = from.distance(to);
    let mut position = from;
    let mut distance = initial_distance;
    while distance > 1.0 {
        let next = position + direction * step;
        if next == position {
            return false;
        }
        position = next;
        if grid.is_obstacle(position.x as i32, position.y as i32) {
            return false;
        }
        distance = position.distance(to);
        if distance > initial_distance {
            return true;
        }
    }
    true
}

#[derive(Clone, Debug, Default)]
pub(crate) struct WaypointBuffer {
    points: Vec<Vec2>,
    cursor: usize,
}

impl WaypointBuffer {
    pub(crate) fn seed(&mut self, start: &Point, path: &[Point], destination: &Point) {
        self.points.clear();
        self.points.reserve(path.len() + 2);
        self.points.push(cell_centre(start));
        self.points
            .extend(path.iter().map(|p| Vec2::new(p.x as f32, p.y as f32)));
        self.points.push(cell_centre(destination));
        self.cursor = 2;
    }
    pub(crate) fn clear(&mut self) {
        self.points.clear();
        self.cursor = 0;
    }
    pub(crate) fn points(&self) -> &[Vec2] {
        &self.points
    }
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
    pub(crate) fn is_finished(&self) -> bool {
        self.cursor >= self.points.len()
    }
    /// Runs one visibility test at the cursor. Returns whether a point was dropped.
    pub(crate) fn prune_next(&mut self, grid: &OccupancyGrid, step: f32) -> bool {
        if self.is_finished() || self.cursor < 2 {
            return false;
        }
        let current = self.points[self.cursor];
        let query = self.points[self.cursor - 2];
        if has_line_of_sight(grid, current, query, step) {
            let dropped = self.points.remove(self.cursor - 1);
            debug!("Dropped waypoint {:?}, {} remain", dropped, self.points.len());
            true
        } else {
            self.cursor += 1;
            false
        }
    }
}

fn cell_centre(point: &Point) -> Vec2 {
    Vec2::new(point.x as f32 + 0.5, point.y as f32 + 0.5)
}
