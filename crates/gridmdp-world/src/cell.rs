use std::fmt;

use gridmdp_core::StateKey;
use serde::{Deserialize, Serialize};

/// Grid coordinate, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Move by `(d_row, d_col)`. `None` when the result would have a negative coordinate.
    pub fn offset(self, delta: (i64, i64)) -> Option<Cell> {
        let row = i64::try_from(self.row).ok()?.checked_add(delta.0)?;
        let col = i64::try_from(self.col).ok()?.checked_add(delta.1)?;
        Some(Cell {
            row: usize::try_from(row).ok()?,
            col: usize::try_from(col).ok()?,
        })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Bidirectional mapping between grid cells and dense state keys.
///
/// Keys are assigned row-major over the included cells only, so a wall never
/// owns a key and key order matches reading order.
#[derive(Debug, Clone)]
pub struct CellIndex {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    lookup: Vec<Option<StateKey>>,
}

impl CellIndex {
    /// Index every cell of a `rows x cols` grid for which `include` returns true.
    pub fn new(rows: usize, cols: usize, mut include: impl FnMut(Cell) -> bool) -> Self {
        let mut cells = Vec::new();
        let mut lookup = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell { row, col };
                if include(cell) {
                    lookup.push(Some(StateKey::from(cells.len())));
                    cells.push(cell);
                } else {
                    lookup.push(None);
                }
            }
        }

        CellIndex {
            rows,
            cols,
            cells,
            lookup,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.key_of(cell).is_some()
    }

    /// State key of `cell`, `None` when out of bounds or excluded.
    pub fn key_of(&self, cell: Cell) -> Option<StateKey> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        self.lookup[cell.row * self.cols + cell.col]
    }

    pub fn cell(&self, key: StateKey) -> Option<Cell> {
        self.cells.get(key.index()).copied()
    }

    /// Indexed cells in key order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
