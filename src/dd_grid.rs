use crate::dd_interface::{Coordinate, Move, GRID_CELLS, MAX_MOVES};

/// Legal moves from one cell, in LEFT, RIGHT, DOWN, UP order
#[derive(Debug, Copy, Clone, Default)]
pub struct MoveList {
    pub used: u8,
    pub moves: [Move; MAX_MOVES],
}

impl MoveList {
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.used as usize]
    }
}

/// Precomputed legal moves for every cell of the grid.
///
/// Built once and only read afterwards, so a single table can be shared by
/// any number of trials.
#[derive(Debug, Clone)]
pub struct MoveTable {
    cells: [MoveList; GRID_CELLS],
}

impl MoveTable {
    pub fn new() -> Self {
        let mut cells = [MoveList::default(); GRID_CELLS];
        for cell in Coordinate::all() {
            cells[cell.index()] = Self::possible_moves(cell);
        }
        Self { cells }
    }

    /// Axis-aligned unit moves that keep `cell` on the grid
    fn possible_moves(cell: Coordinate) -> MoveList {
        let mut list = MoveList::default();
        for m in Move::ALL {
            if cell.step(m).is_some() {
                list.moves[list.used as usize] = m;
                list.used += 1;
            }
        }
        list
    }

    pub fn legal_moves(&self, cell: Coordinate) -> &[Move] {
        self.cells[cell.index()].as_slice()
    }
}

impl Default for MoveTable {
    fn default() -> Self {
        Self::new()
    }
}
