//! The reveal ledger for one player's board: 25 cell states.

use crate::domain::board::GRID_CELLS;
use crate::entities::cell_states::{RevealedBy, Topic};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellState {
    pub index: usize,
    pub revealed: bool,
    pub locked: bool,
    /// Set iff revealed.
    pub letter: Option<char>,
    /// Set iff revealed.
    pub revealed_by: Option<RevealedBy>,
    pub topics_used: Vec<Topic>,
}

impl CellState {
    pub fn hidden(index: usize) -> CellState {
        CellState {
            index,
            revealed: false,
            locked: false,
            letter: None,
            revealed_by: None,
            topics_used: Vec::new(),
        }
    }
}

/// One player's 25-cell ledger, ordered by cell index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<CellState>,
}

impl Board {
    pub fn new_hidden() -> Board {
        Board {
            cells: (0..GRID_CELLS).map(CellState::hidden).collect(),
        }
    }

    /// Build from ledger rows already sorted by cell index.
    /// Row-count or ordering mismatches mean the store is corrupt.
    pub fn from_cells(cells: Vec<CellState>) -> Result<Board, DomainError> {
        if cells.len() != GRID_CELLS {
            return Err(DomainError::corrupt(format!(
                "board has {} ledger rows, expected {GRID_CELLS}",
                cells.len()
            )));
        }
        for (i, cell) in cells.iter().enumerate() {
            if cell.index != i {
                return Err(DomainError::corrupt(format!(
                    "ledger row at position {i} has cell index {}",
                    cell.index
                )));
            }
            if !cell.revealed && (cell.letter.is_some() || cell.revealed_by.is_some()) {
                return Err(DomainError::corrupt(format!(
                    "unrevealed cell {i} carries a letter or reveal cause"
                )));
            }
        }
        Ok(Board { cells })
    }

    pub fn cell(&self, index: usize) -> &CellState {
        &self.cells[index]
    }

    pub fn cell_mut(&mut self, index: usize) -> &mut CellState {
        &mut self.cells[index]
    }

    pub fn reveal(&mut self, index: usize, letter: char, cause: RevealedBy) {
        let cell = &mut self.cells[index];
        cell.revealed = true;
        cell.letter = Some(letter);
        cell.revealed_by = Some(cause);
    }

    pub fn unrevealed_in(&self, line: &[usize; 5]) -> Vec<usize> {
        line.iter()
            .copied()
            .filter(|&i| !self.cells[i].revealed)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.revealed)
    }
}
