//! Snake-ordered race board.
//!
//! Position 1 is the bottom-left cell; numbering runs left to right along the
//! bottom row, then right to left on the row above, and so on until
//! `BOARD_SIZE` in the top row. The mapping only matters for display and for
//! keeping positions in range; the rules only ever compare plain counters.

use serde::{Deserialize, Serialize};

pub const ROWS: usize = 10;
pub const COLS: usize = 10;
pub const BOARD_SIZE: usize = ROWS * COLS;
pub const START_POSITION: usize = 1;

/// Grid cell with row 0 at the top.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Keeps a position within `[1, BOARD_SIZE]`.
#[inline]
pub fn clamp(position: usize) -> usize {
    position.clamp(START_POSITION, BOARD_SIZE)
}

/// Moves `position` back by `steps`, never below the start cell.
#[inline]
pub fn retreat(position: usize, steps: usize) -> usize {
    clamp(position.saturating_sub(steps))
}

/// Moves `position` forward by `steps`, never past the final cell.
#[inline]
pub fn advance(position: usize, steps: usize) -> usize {
    clamp(position.saturating_add(steps))
}

pub fn cell_of(position: usize) -> Cell {
    let offset = clamp(position) - 1;
    let band = offset / COLS;
    let along = offset % COLS;
    let col = if band % 2 == 0 { along } else { COLS - 1 - along };
    Cell {
        row: ROWS - 1 - band,
        col,
    }
}

/// Inverse of [`cell_of`]. Returns `None` for cells outside the grid.
pub fn position_at(cell: Cell) -> Option<usize> {
    if cell.row >= ROWS || cell.col >= COLS {
        return None;
    }
    let band = ROWS - 1 - cell.row;
    let along = if band % 2 == 0 {
        cell.col
    } else {
        COLS - 1 - cell.col
    };
    Some(band * COLS + along + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_runs_left_to_right() {
        assert_eq!(cell_of(1), Cell { row: 9, col: 0 });
        assert_eq!(cell_of(10), Cell { row: 9, col: 9 });
    }

    #[test]
    fn second_row_runs_right_to_left() {
        assert_eq!(cell_of(11), Cell { row: 8, col: 9 });
        assert_eq!(cell_of(20), Cell { row: 8, col: 0 });
        assert_eq!(cell_of(BOARD_SIZE), Cell { row: 0, col: 0 });
    }

    #[test]
    fn every_cell_maps_back() {
        for position in 1..=BOARD_SIZE {
            assert_eq!(position_at(cell_of(position)), Some(position));
        }
        assert_eq!(position_at(Cell { row: ROWS, col: 0 }), None);
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        assert_eq!(cell_of(0), cell_of(1));
        assert_eq!(cell_of(250), cell_of(BOARD_SIZE));
        assert_eq!(retreat(8, 10), 1);
        assert_eq!(advance(95, 9), BOARD_SIZE);
    }
}
