//! Board geometry: cell indexing and line enumeration for a 5x5 grid.

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub const GRID_SIDE: usize = 5;
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    pub fn parse(s: &str) -> Option<Direction> {
        match s {
            "across" => Some(Direction::Across),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

pub fn row_of(index: usize) -> usize {
    index / GRID_SIDE
}

pub fn col_of(index: usize) -> usize {
    index % GRID_SIDE
}

/// Flat cell index from (row, col), both 0-4.
pub fn cell_index(row: usize, col: usize) -> Result<usize, DomainError> {
    if row >= GRID_SIDE || col >= GRID_SIDE {
        return Err(DomainError::validation(format!(
            "cell reference out of range: row {row}, col {col}"
        )));
    }
    Ok(row * GRID_SIDE + col)
}

pub fn check_cell_index(index: usize) -> Result<(), DomainError> {
    if index >= GRID_CELLS {
        return Err(DomainError::validation(format!(
            "cell index out of range: {index}"
        )));
    }
    Ok(())
}

/// The five cell indices of a row (`across`) or column (`down`).
pub fn line_indices(direction: Direction, index: usize) -> Result<[usize; 5], DomainError> {
    if index >= GRID_SIDE {
        return Err(DomainError::validation(format!(
            "line index out of range: {index}"
        )));
    }
    let mut out = [0usize; 5];
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = match direction {
            Direction::Across => index * GRID_SIDE + k,
            Direction::Down => k * GRID_SIDE + index,
        };
    }
    Ok(out)
}

/// All 10 lines of the board, rows first then columns.
pub fn all_lines() -> impl Iterator<Item = [usize; 5]> {
    (0..GRID_SIDE)
        .map(|r| line_indices(Direction::Across, r).unwrap())
        .chain((0..GRID_SIDE).map(|c| line_indices(Direction::Down, c).unwrap()))
        .collect::<Vec<_>>()
        .into_iter()
}

pub fn check_player_number(player: i16) -> Result<(), DomainError> {
    if player == 1 || player == 2 {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "player number must be 1 or 2, got {player}"
        )))
    }
}

pub fn opponent_of(player: i16) -> i16 {
    if player == 1 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_round_trip() {
        for index in 0..GRID_CELLS {
            assert_eq!(cell_index(row_of(index), col_of(index)).unwrap(), index);
        }
    }

    #[test]
    fn cell_index_rejects_out_of_range() {
        assert!(cell_index(5, 0).is_err());
        assert!(cell_index(0, 5).is_err());
    }

    #[test]
    fn across_line_is_contiguous() {
        assert_eq!(line_indices(Direction::Across, 2).unwrap(), [10, 11, 12, 13, 14]);
    }

    #[test]
    fn down_line_strides_by_five() {
        assert_eq!(line_indices(Direction::Down, 3).unwrap(), [3, 8, 13, 18, 23]);
    }

    #[test]
    fn ten_lines_cover_every_cell_twice() {
        let mut seen = [0usize; GRID_CELLS];
        for line in all_lines() {
            for index in line {
                seen[index] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 2));
    }
}
