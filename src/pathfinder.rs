use grid_util::point::Point;
use log::debug;

use crate::error::Result;
use crate::occupancy_grid::OccupancyGrid;
use crate::search::{AStar, SearchStatus};
use crate::settings::{Connectivity, SearchSettings, StepMode};
use crate::smoothing::SmoothStatus;

/// Owns an editable grid, the two endpoints and an [AStar] session, and maps discrete triggers
/// (edit a cell, move an endpoint, advance a phase) onto them. Every edit and every mode change
/// discards the session, which is rebuilt from the current grid on the next search step.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: OccupancyGrid,
    start: Point,
    target: Point,
    astar: AStar,
    step_mode: StepMode,
}

impl Pathfinder {
    /// An open grid with the start at `(0, 0)` and the target at `(0, 1)`.
    pub fn new(width: usize, height: usize) -> Pathfinder {
        Pathfinder::with_settings(width, height, SearchSettings::default())
    }
    pub fn with_settings(width: usize, height: usize, settings: SearchSettings) -> Pathfinder {
        let mut grid = OccupancyGrid::new(width, height);
        grid.set_connectivity(settings.connectivity);
        Pathfinder {
            grid,
            start: Point::new(0, 0),
            target: Point::new(0, 1),
            astar: AStar::new(settings),
            step_mode: StepMode::Single,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }
    pub fn astar(&self) -> &AStar {
        &self.astar
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn target(&self) -> Point {
        self.target
    }
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.is_in_bounds(x, y)
    }
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.grid.is_obstacle(x, y)
    }

    pub fn set_obstacle(&mut self, x: i32, y: i32, value: bool) {
        self.grid.set_obstacle(x, y, value);
        self.reset_search();
    }
    /// Moves the start, ignoring coordinates outside the grid.
    pub fn set_start(&mut self, x: i32, y: i32) {
        if self.grid.is_in_bounds(x, y) {
            self.start = Point::new(x, y);
        }
        self.reset_search();
    }
    /// Moves the target, ignoring coordinates outside the grid.
    pub fn set_target(&mut self, x: i32, y: i32) {
        if self.grid.is_in_bounds(x, y) {
            self.target = Point::new(x, y);
        }
        self.reset_search();
    }
    /// Opens every cell and puts the endpoints back at `(0, 0)` and `(0, 1)`.
    pub fn clear_map(&mut self) {
        self.grid.clear();
        self.start = Point::new(0, 0);
        self.target = Point::new(0, 1);
        self.reset_search();
    }
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.grid.set_connectivity(connectivity);
        let settings = self.astar.settings().with_connectivity(connectivity);
        self.astar.set_settings(settings);
    }
    pub fn toggle_step_mode(&mut self) -> StepMode {
        self.step_mode = self.step_mode.toggled();
        debug!("Step mode is now {:?}", self.step_mode);
        self.reset_search();
        self.step_mode
    }
    pub fn reset_search(&mut self) {
        self.astar.clear_data();
    }

    /// Advances the grid search, initialising it from the current grid and endpoints first if
    /// needed.
    pub fn step_search(&mut self) -> Result<SearchStatus> {
        if !self.astar.search_initialized() {
            self.astar.init_search(&self.grid, self.start, self.target)?;
        }
        self.astar.find_path(self.step_mode)
    }
    pub fn step_smoothing(&mut self) -> SmoothStatus {
        self.astar.find_smooth_path(&self.grid, self.step_mode)
    }

    /// Whether the target can be reached from the start, regenerating components if needed.
    pub fn is_reachable(&mut self) -> bool {
        self.grid.update();
        self.grid.reachable(&self.start, &self.target)
    }
}
