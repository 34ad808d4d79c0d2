//! Fixed-size play field
//!
//! Coordinates are screen-oriented: `x` grows to the right, `y` grows downward.

use std::collections::{HashSet, VecDeque};

use glam::IVec2;

use crate::consts::{GRID_SIZE, START_LENGTH};

/// A grid coordinate `(x, y)`
pub type Cell = IVec2;

/// Whether a cell lies inside `[0, GRID_SIZE)` on both axes
#[inline]
pub fn is_in_bounds(cell: Cell) -> bool {
    (0..GRID_SIZE).contains(&cell.x) && (0..GRID_SIZE).contains(&cell.y)
}

/// Every cell not in `occupied`, in row-major order
pub fn free_cells(occupied: &HashSet<Cell>) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((GRID_SIZE * GRID_SIZE) as usize);
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let cell = IVec2::new(x, y);
            if !occupied.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Starting creature: a horizontal line centered on the grid, head facing right
pub fn initial_creature() -> VecDeque<Cell> {
    let center = GRID_SIZE / 2;
    (0..START_LENGTH as i32)
        .map(|i| IVec2::new(center + 1 - i, center))
        .collect()
}
