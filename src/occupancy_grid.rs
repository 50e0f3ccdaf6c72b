use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::settings::Connectivity;

/// [OccupancyGrid] stores which cells are obstacles ([true]) and which are open ([false]) in a
/// [BoolGrid], and maintains information about connected components using a [UnionFind]
/// structure under the configured [Connectivity].
///
/// Every coordinate is validated before it touches the grid. Reads outside the grid report an
/// open cell and writes outside the grid are ignored, since the grid is typically edited from
/// pointer input that can drift past its edges.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    connectivity: Connectivity,
}

impl Default for OccupancyGrid {
    fn default() -> OccupancyGrid {
        OccupancyGrid::new(0, 0)
    }
}

impl OccupancyGrid {
    /// Creates a grid with every cell open.
    pub fn new(width: usize, height: usize) -> OccupancyGrid {
        OccupancyGrid {
            grid: BoolGrid::new(width, height, false),
            components: UnionFind::new(width * height),
            components_dirty: true,
            connectivity: Connectivity::Orthogonal,
        }
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
    /// Changes the neighbourhood used for components, marking them for regeneration.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        if self.connectivity != connectivity {
            self.connectivity = connectivity;
            self.components_dirty = true;
        }
    }
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
    pub fn point_in_bounds(&self, point: &Point) -> bool {
        self.is_in_bounds(point.x, point.y)
    }
    /// Returns [false] for coordinates outside the grid.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.is_in_bounds(x, y) && self.grid.get(x, y)
    }
    /// In bounds and not an obstacle.
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.is_in_bounds(x, y) && !self.grid.get(x, y)
    }
    /// Updates a position on the grid, ignoring coordinates outside it. Joins newly connected
    /// components and flags the components as dirty if they are (potentially) broken apart.
    pub fn set_obstacle(&mut self, x: i32, y: i32, value: bool) {
        if !self.is_in_bounds(x, y) {
            return;
        }
        let was_obstacle = self.grid.get(x, y);
        self.grid.set(x, y, value);
        if value {
            if !was_obstacle {
                self.components_dirty = true;
            }
        } else if !self.components_dirty {
            let p = Point::new(x, y);
            let p_ix = self.cell_index(&p);
            for n in self.neighbours(&p) {
                let n_ix = self.cell_index(&n);
                self.components.union(p_ix, n_ix);
            }
        }
    }
    /// Opens every cell.
    pub fn clear(&mut self) {
        *self = OccupancyGrid {
            connectivity: self.connectivity,
            ..OccupancyGrid::new(self.width(), self.height())
        };
    }
    /// Row-major index of an in-bounds point.
    pub fn cell_index(&self, point: &Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }
    /// The passable neighbours of a point under the grid's [Connectivity].
    pub fn neighbours(&self, point: &Point) -> Vec<Point> {
        self.connectivity
            .neighbourhood(point, |x, y| self.is_passable(x, y))
    }

    /// Retrieves the component id a given [Point] belongs to, or [None] outside the grid.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.point_in_bounds(point)
            .then(|| self.components.find(self.cell_index(point)))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Obstacle endpoints are
    /// unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_passable(start.x, start.y) && self.is_passable(goal.x, goal.y) {
            let start_ix = self.cell_index(start);
            let goal_ix = self.cell_index(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        let mut components = UnionFind::new(w * h);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = self.cell_index(&point);
                for n in self.neighbours(&point) {
                    components.union(parent_ix, self.cell_index(&n));
                }
            }
        }
        self.components = components;
        self.components_dirty = false;
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
