//! The steppable A* session.
//!
//! An [AStar] owns all per-query state: the arena of [Cell]s, the open list, the closed set, the
//! reconstructed grid path and the smoothing buffer. The lifecycle is
//! `init_search` → `find_path`* → `find_smooth_path`*, with `clear_data` returning to the
//! uninitialised state whenever the grid or the endpoints change.
use fxhash::FxBuildHasher;
use glam::Vec2;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info, warn};

use crate::cell::Cell;
use crate::error::{Result, SearchError};
use crate::heap::IndexedMinHeap;
use crate::occupancy_grid::OccupancyGrid;
use crate::settings::{SearchSettings, StepMode};
use crate::smoothing::{SmoothStatus, WaypointBuffer};
use crate::{is_orthogonal, C, D};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Outcome of a grid-search step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The open list still holds cells to expand.
    Searching,
    /// The destination was popped from the open list and the path is available.
    Found,
    /// The open list ran empty without reaching the destination.
    Unreachable,
    /// The destination is an obstacle, so no search is performed.
    TargetBlocked,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        self != SearchStatus::Searching
    }
}

#[derive(Clone, Debug)]
pub struct AStar {
    settings: SearchSettings,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    open_list: IndexedMinHeap,
    closed_list: FxIndexSet<usize>,
    final_path: Vec<Point>,
    waypoints: WaypointBuffer,
    start: usize,
    destination: usize,
    target: Point,
    current: Option<usize>,
    grid_path_found: bool,
    smooth_path_found: bool,
    search_initialized: bool,
    exhausted: bool,
}

impl Default for AStar {
    fn default() -> AStar {
        AStar::new(SearchSettings::default())
    }
}

impl AStar {
    pub fn new(settings: SearchSettings) -> AStar {
        AStar {
            settings,
            width: 0,
            height: 0,
            cells: Vec::new(),
            open_list: IndexedMinHeap::new(),
            closed_list: FxIndexSet::default(),
            final_path: Vec::new(),
            waypoints: WaypointBuffer::default(),
            start: 0,
            destination: 0,
            target: Point::new(0, 0),
            current: None,
            grid_path_found: false,
            smooth_path_found: false,
            search_initialized: false,
            exhausted: false,
        }
    }
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }
    /// Replaces the settings, discarding any search in progress.
    pub fn set_settings(&mut self, settings: SearchSettings) {
        self.settings = settings;
        self.clear_data();
    }

    /// Resets every cell for the grid's dimensions, copies the obstacle flags and seeds the open
    /// list with the start cell. Fails if either endpoint lies outside the grid.
    pub fn init_search(
        &mut self,
        grid: &OccupancyGrid,
        start: Point,
        destination: Point,
    ) -> Result<()> {
        self.clear_data();
        for p in [&start, &destination] {
            if !grid.point_in_bounds(p) {
                return Err(SearchError::OutOfBounds {
                    x: p.x,
                    y: p.y,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
        }
        self.width = grid.width();
        self.height = grid.height();
        self.cells.clear();
        self.cells.reserve(self.width * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.cells.push(Cell::new(x, y, grid.is_obstacle(x, y)));
            }
        }
        self.open_list.allocate_space(self.width * self.height);
        self.start = grid.cell_index(&start);
        self.destination = grid.cell_index(&destination);
        self.target = destination;
        self.current = Some(self.start);

        let start_cell = &mut self.cells[self.start];
        start_cell.g = 0;
        start_cell.f(&destination);
        self.open_list.add_item(&mut self.cells, self.start);
        self.search_initialized = true;

        if self.cells[self.destination].obstacle {
            warn!("Destination {:?} is an obstacle, no search will run", destination);
        }
        debug!(
            "Initialised search from {:?} to {:?} on a {}x{} grid",
            start, destination, self.width, self.height
        );
        Ok(())
    }

    /// Returns to the uninitialised state, keeping allocations for the next search.
    pub fn clear_data(&mut self) {
        self.closed_list.clear();
        self.final_path.clear();
        self.open_list.clear();
        self.waypoints.clear();
        self.current = None;
        self.grid_path_found = false;
        self.smooth_path_found = false;
        self.search_initialized = false;
        self.exhausted = false;
    }

    /// Advances the grid search by one expansion, or until it reaches a terminal status when
    /// `mode` is [StepMode::RunToCompletion]. Stepping a finished search changes nothing.
    pub fn find_path(&mut self, mode: StepMode) -> Result<SearchStatus> {
        if !self.search_initialized {
            return Err(SearchError::NotInitialized);
        }
        loop {
            let status = self.expand_next();
            if mode == StepMode::Single || status.is_terminal() {
                return Ok(status);
            }
        }
    }

    /// Advances the smoothing phase by one visibility test, or until it is done when `mode` is
    /// [StepMode::RunToCompletion]. Does nothing until the grid path has been found.
    pub fn find_smooth_path(&mut self, grid: &OccupancyGrid, mode: StepMode) -> SmoothStatus {
        if !self.grid_path_found {
            return SmoothStatus::AwaitingGridPath;
        }
        loop {
            let status = self.smooth_next(grid);
            if mode == StepMode::Single || status == SmoothStatus::Done {
                return status;
            }
        }
    }

    fn expand_next(&mut self) -> SearchStatus {
        if self.cells[self.destination].obstacle {
            return SearchStatus::TargetBlocked;
        }
        if self.grid_path_found {
            return SearchStatus::Found;
        }
        let Some(current) = self.open_list.remove_first(&mut self.cells) else {
            if !self.exhausted {
                self.exhausted = true;
                info!(
                    "Open list exhausted after closing {} cells, {:?} is unreachable",
                    self.closed_list.len(),
                    self.target
                );
            }
            return SearchStatus::Unreachable;
        };
        self.current = Some(current);
        if current == self.destination {
            self.grid_path_found = true;
            self.build_final_path();
            info!(
                "Found path of {} cells with cost {} after closing {} cells",
                self.final_path.len(),
                self.cells[current].g,
                self.closed_list.len()
            );
            return SearchStatus::Found;
        }
        self.closed_list.insert(current);

        let current_point = self.cells[current].point();
        let current_g = self.cells[current].g;
        for neighbour in self.find_neighbours(current) {
            let step = if is_orthogonal(&current_point, &self.cells[neighbour].point()) {
                C
            } else {
                D
            };
            let new_g = current_g + step;
            let open = self.open_list.contains(&self.cells, neighbour);
            if open || self.closed_list.contains(&neighbour) {
                if new_g < self.cells[neighbour].g {
                    self.cells[neighbour].relax(current, new_g, &self.target);
                    if open && self.settings.resift_on_relax {
                        self.open_list.update(&mut self.cells, neighbour);
                    }
                }
            } else {
                self.cells[neighbour].relax(current, new_g, &self.target);
                self.open_list.add_item(&mut self.cells, neighbour);
            }
        }
        SearchStatus::Searching
    }

    /// Passable neighbours of a cell, computed from the obstacle snapshot on first use.
    fn find_neighbours(&mut self, index: usize) -> Vec<usize> {
        if let Some(neighbours) = &self.cells[index].neighbours {
            return neighbours.clone();
        }
        let point = self.cells[index].point();
        let neighbours = self
            .settings
            .connectivity
            .neighbourhood(&point, |x, y| self.is_open(x, y))
            .iter()
            .map(|p| self.index_of(p))
            .collect::<Vec<usize>>();
        self.cells[index].neighbours = Some(neighbours.clone());
        neighbours
    }

    fn build_final_path(&mut self) {
        let start = self.start;
        let cells = &self.cells;
        let mut path = std::iter::successors(Some(self.destination), |&i| cells[i].parent)
            .take_while(|&i| i != start)
            .map(|i| cells[i].point())
            .collect::<Vec<Point>>();
        path.reverse();
        self.final_path = path;

        self.smooth_path_found = false;
        let start_point = self.cells[self.start].point();
        self.waypoints
            .seed(&start_point, &self.final_path, &self.target);
    }

    fn smooth_next(&mut self, grid: &OccupancyGrid) -> SmoothStatus {
        if !self.smooth_path_found {
            self.waypoints
                .prune_next(grid, self.settings.effective_sight_step());
            if self.waypoints.is_finished() {
                self.smooth_path_found = true;
                debug!(
                    "Smoothed {} path cells down to {} waypoints",
                    self.final_path.len(),
                    self.waypoints.points().len()
                );
            }
        }
        if self.smooth_path_found {
            SmoothStatus::Done
        } else {
            SmoothStatus::Smoothing
        }
    }

    fn is_open(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && !self.cells[self.index_of(&Point::new(x, y))].obstacle
    }
    fn index_of(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    pub fn grid_path_found(&self) -> bool {
        self.grid_path_found
    }
    pub fn smooth_path_found(&self) -> bool {
        self.smooth_path_found
    }
    pub fn search_initialized(&self) -> bool {
        self.search_initialized
    }
    /// The grid path from start to destination, excluding the start cell.
    pub fn path(&self) -> &[Point] {
        &self.final_path
    }
    /// The waypoint buffer: seeded when the grid path is found, pruned by smoothing steps.
    pub fn waypoints(&self) -> &[Vec2] {
        self.waypoints.points()
    }
    /// Index into [waypoints](Self::waypoints) the next smoothing step examines.
    pub fn smoothing_cursor(&self) -> usize {
        self.waypoints.cursor()
    }
    pub fn open_list(&self) -> &IndexedMinHeap {
        &self.open_list
    }
    /// Cells currently in the open list, in heap order.
    pub fn open_points(&self) -> Vec<Point> {
        self.open_list
            .items()
            .iter()
            .map(|&i| self.cells[i].point())
            .collect()
    }
    /// Closed cells in the order they were closed.
    pub fn closed_points(&self) -> Vec<Point> {
        self.closed_list
            .iter()
            .map(|&i| self.cells[i].point())
            .collect()
    }
    pub fn current(&self) -> Option<Point> {
        self.current.map(|i| self.cells[i].point())
    }
    /// Per-search state of a cell, if a search has been initialised and the point is in bounds.
    pub fn cell(&self, point: &Point) -> Option<&Cell> {
        if !self.search_initialized
            || point.x < 0
            || point.y < 0
            || point.x as usize >= self.width
            || point.y as usize >= self.height
        {
            return None;
        }
        self.cells.get(self.index_of(point))
    }
}
