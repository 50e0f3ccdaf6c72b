//! Binary min-heap of cell indices ordered by `f`, in which every queued cell records its own
//! slot. This makes membership tests and re-sifting after a cost decrease O(1) to locate,
//! which [BinaryHeap](std::collections::BinaryHeap) cannot offer without duplicate entries.
//!
//! Ties between equal `f` are broken by heap mechanics only; callers must not rely on an order.
use crate::cell::Cell;

#[derive(Clone, Debug, Default)]
pub struct IndexedMinHeap {
    items: Vec<usize>,
}

impl IndexedMinHeap {
    pub fn new() -> IndexedMinHeap {
        IndexedMinHeap::default()
    }
    /// Empties the heap and reserves room for `capacity` cells, so a bounded search never
    /// reallocates.
    pub fn allocate_space(&mut self, capacity: usize) {
        self.items.clear();
        self.items.reserve(capacity);
    }
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
    /// Appends the cell and sifts it up, recording its slot in the cell.
    pub fn add_item(&mut self, cells: &mut [Cell], index: usize) {
        cells[index].heap_index = Some(self.items.len());
        self.items.push(index);
        self.sort_up(cells, index);
    }
    /// Whether the slot recorded in the cell currently holds that cell.
    pub fn contains(&self, cells: &[Cell], index: usize) -> bool {
        cells[index]
            .heap_index
            .and_then(|slot| self.items.get(slot))
            .is_some_and(|&held| held == index)
    }
    /// Pops the cell with the lowest `f`, or [None] if the heap is empty.
    pub fn remove_first(&mut self, cells: &mut [Cell]) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let first = self.items.swap_remove(0);
        cells[first].heap_index = None;
        if let Some(&moved) = self.items.first() {
            cells[moved].heap_index = Some(0);
            self.sort_down(cells, moved);
        }
        Some(first)
    }
    /// Restores the heap order after the cell's `f` decreased.
    pub fn update(&mut self, cells: &mut [Cell], index: usize) {
        debug_assert!(self.contains(cells, index));
        self.sort_up(cells, index);
    }
    pub fn peek(&self) -> Option<usize> {
        self.items.first().copied()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn size(&self) -> usize {
        self.items.len()
    }
    /// Forgets all cells while keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
    /// Queued cell indices in heap order.
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    fn sort_up(&mut self, cells: &mut [Cell], index: usize) {
        let Some(mut slot) = cells[index].heap_index else {
            return;
        };
        while slot > 0 {
            let parent_slot = (slot - 1) / 2;
            let parent = self.items[parent_slot];
            if cells[parent].key() > cells[index].key() {
                self.swap(cells, index, parent);
                slot = parent_slot;
            } else {
                break;
            }
        }
    }
    fn sort_down(&mut self, cells: &mut [Cell], index: usize) {
        while let Some(slot) = cells[index].heap_index {
            let left = slot * 2 + 1;
            let right = slot * 2 + 2;
            if left >= self.items.len() {
                return;
            }
            let mut swap_slot = left;
            if right < self.items.len()
                && cells[self.items[left]].key() > cells[self.items[right]].key()
            {
                swap_slot = right;
            }
            let child = self.items[swap_slot];
            if cells[index].key() > cells[child].key() {
                self.swap(cells, index, child);
            } else {
                return;
            }
        }
    }
    fn swap(&mut self, cells: &mut [Cell], a: usize, b: usize) {
        if let (Some(slot_a), Some(slot_b)) = (cells[a].heap_index, cells[b].heap_index) {
            self.items.swap(slot_a, slot_b);
            cells[a].heap_index = Some(slot_b);
            cells[b].heap_index = Some(slot_a);
        }
    }
}
