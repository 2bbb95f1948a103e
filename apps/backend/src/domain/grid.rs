//! Immutable 5x5 letter grid with its derived across/down words.

use serde::{Deserialize, Serialize};

use crate::domain::board::{line_indices, Direction, GRID_CELLS, GRID_SIDE};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridContent {
    /// 25 uppercase letters, row-major.
    pub cells: String,
    pub words_across: Vec<String>,
    pub words_down: Vec<String>,
}

impl GridContent {
    /// Build a grid from its 25 letters, deriving the word lists.
    pub fn from_cells(cells: &str) -> Result<GridContent, DomainError> {
        check_cells(cells)?;
        let words_across = (0..GRID_SIDE)
            .map(|r| derive_word(cells, Direction::Across, r))
            .collect();
        let words_down = (0..GRID_SIDE)
            .map(|c| derive_word(cells, Direction::Down, c))
            .collect();
        Ok(GridContent {
            cells: cells.to_string(),
            words_across,
            words_down,
        })
    }

    /// Check the grid's internal consistency. Run at ingestion; grids are
    /// immutable afterwards so loads may trust the stored content.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_cells(&self.cells)?;
        if self.words_across.len() != GRID_SIDE || self.words_down.len() != GRID_SIDE {
            return Err(DomainError::validation(
                "grid must carry exactly 5 across and 5 down words",
            ));
        }
        for (r, word) in self.words_across.iter().enumerate() {
            let derived = derive_word(&self.cells, Direction::Across, r);
            if *word != derived {
                return Err(DomainError::validation(format!(
                    "across word {r} is {word:?}, cells derive {derived:?}"
                )));
            }
        }
        for (c, word) in self.words_down.iter().enumerate() {
            let derived = derive_word(&self.cells, Direction::Down, c);
            if *word != derived {
                return Err(DomainError::validation(format!(
                    "down word {c} is {word:?}, cells derive {derived:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn letter_at(&self, index: usize) -> char {
        self.cells.as_bytes()[index] as char
    }

    pub fn word_for(&self, direction: Direction, index: usize) -> &str {
        match direction {
            Direction::Across => &self.words_across[index],
            Direction::Down => &self.words_down[index],
        }
    }

    /// Deterministic identity derived from the letters alone, so the same
    /// grid can never enter the pool twice under different ids.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.cells.as_bytes()).to_hex().to_string()
    }
}

fn check_cells(cells: &str) -> Result<(), DomainError> {
    if cells.len() != GRID_CELLS {
        return Err(DomainError::validation(format!(
            "grid must have exactly {GRID_CELLS} cells, got {}",
            cells.len()
        )));
    }
    if let Some(bad) = cells.chars().find(|c| !c.is_ascii_uppercase()) {
        return Err(DomainError::validation(format!(
            "grid cells must be uppercase A-Z, found {bad:?}"
        )));
    }
    Ok(())
}

fn derive_word(cells: &str, direction: Direction, index: usize) -> String {
    let bytes = cells.as_bytes();
    line_indices(direction, index)
        .expect("line index 0-4")
        .iter()
        .map(|&i| bytes[i] as char)
        .collect()
}
