use grid_util::point::Point;

use crate::{C, D};

/// `g` of a cell the current search has not reached yet.
pub const UNREACHED: i32 = 99_999;

/// Per-search state of one grid coordinate. Cells live in a flat arena owned by the search
/// session; `parent` and `neighbours` are indices into that arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    /// Obstacle state copied from the grid when the search was initialised.
    pub obstacle: bool,
    /// Accumulated cost from the start.
    pub g: i32,
    h: Option<i32>,
    f: Option<i32>,
    pub parent: Option<usize>,
    /// Passable neighbours, filled on first expansion.
    pub neighbours: Option<Vec<usize>>,
    /// Slot in the open list, maintained by [IndexedMinHeap](crate::heap::IndexedMinHeap).
    pub heap_index: Option<usize>,
}

impl Cell {
    pub fn new(x: i32, y: i32, obstacle: bool) -> Cell {
        Cell {
            x,
            y,
            obstacle,
            g: UNREACHED,
            h: None,
            f: None,
            parent: None,
            neighbours: None,
            heap_index: None,
        }
    }
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
    /// Octile estimate of the remaining cost to `target`, computed on first use and cached.
    pub fn h(&mut self, target: &Point) -> i32 {
        let (x, y) = (self.x, self.y);
        *self.h.get_or_insert_with(|| {
            let dx = (x - target.x).abs();
            let dy = (y - target.y).abs();
            C * dx.max(dy) + (D - C) * dx.min(dy)
        })
    }
    /// `g + h`, computed on first use and cached.
    pub fn f(&mut self, target: &Point) -> i32 {
        if let Some(f) = self.f {
            return f;
        }
        let f = self.g + self.h(target);
        self.f = Some(f);
        f
    }
    /// Records a better route through `parent`, refreshing the cached `f`.
    pub fn relax(&mut self, parent: usize, g: i32, target: &Point) {
        self.g = g;
        self.f = Some(g + self.h(target));
        self.parent = Some(parent);
    }
    pub fn cached_h(&self) -> Option<i32> {
        self.h
    }
    pub fn cached_f(&self) -> Option<i32> {
        self.f
    }
    /// Ordering key of the open list. Cells without an `f` sort last.
    pub fn key(&self) -> i32 {
        self.f.unwrap_or(i32::MAX)
    }
    pub fn reached(&self) -> bool {
        self.g != UNREACHED
    }
}
