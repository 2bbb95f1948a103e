use proptest::prelude::*;

use crate::domain::board::{all_lines, GRID_CELLS};
use crate::domain::cells::Board;
use crate::domain::engine::auto_reveal_cascade;
use crate::domain::grid::GridContent;
use crate::entities::cell_states::RevealedBy;

const CELLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXY";

fn grid() -> GridContent {
    GridContent::from_cells(CELLS).unwrap()
}

fn board_with_hidden(grid: &GridContent, hidden: &[usize]) -> Board {
    let mut board = Board::new_hidden();
    for i in 0..GRID_CELLS {
        if !hidden.contains(&i) {
            board.reveal(i, grid.letter_at(i), RevealedBy::Guess);
        }
    }
    board
}

#[test]
fn single_missing_cell_is_filled() {
    let grid = grid();
    let mut board = board_with_hidden(&grid, &[12]);
    let reveals = auto_reveal_cascade(&mut board, &grid);
    assert_eq!(reveals.len(), 1);
    assert_eq!(reveals[0].cell_index, 12);
    assert_eq!(reveals[0].letter, 'M');
    assert_eq!(board.cell(12).revealed_by, Some(RevealedBy::Auto));
}

#[test]
fn reveals_chain_across_lines() {
    let grid = grid();
    // Column 0 closes cell 0, which closes row 0 at cell 4, which closes
    // column 4 at cell 24.
    let mut board = board_with_hidden(&grid, &[0, 4, 24]);
    let reveals = auto_reveal_cascade(&mut board, &grid);
    let indices: Vec<usize> = reveals.iter().map(|r| r.cell_index).collect();
    assert_eq!(indices, vec![0, 4, 24]);
    assert!(board.is_complete());
}

#[test]
fn no_line_with_one_hidden_cell_means_no_reveals() {
    let grid = grid();
    // Two hidden cells in every affected line.
    let mut board = board_with_hidden(&grid, &[0, 1, 5, 6]);
    let reveals = auto_reveal_cascade(&mut board, &grid);
    assert!(reveals.is_empty());
}

#[test]
fn second_run_at_fixed_point_reveals_nothing() {
    let grid = grid();
    let mut board = board_with_hidden(&grid, &[0, 4, 24]);
    auto_reveal_cascade(&mut board, &grid);
    let again = auto_reveal_cascade(&mut board, &grid);
    assert!(again.is_empty());
}

#[test]
fn reveals_are_reported_ascending() {
    let grid = grid();
    let mut board = board_with_hidden(&grid, &[24, 20, 4, 0]);
    // Row 4 has two hidden cells, rows 0 has two; columns 0 and 4 each
    // have two. Reveal 20 by hand so column 0 closes first.
    board.reveal(20, grid.letter_at(20), RevealedBy::Guess);
    let reveals = auto_reveal_cascade(&mut board, &grid);
    let indices: Vec<usize> = reveals.iter().map(|r| r.cell_index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted);
}

proptest! {
    #[test]
    fn cascade_reaches_a_true_fixed_point(hidden in proptest::collection::btree_set(0usize..GRID_CELLS, 0..GRID_CELLS)) {
        let grid = grid();
        let hidden: Vec<usize> = hidden.into_iter().collect();
        let mut board = board_with_hidden(&grid, &hidden);
        auto_reveal_cascade(&mut board, &grid);

        // Fixed point: no line retains exactly one hidden cell.
        for line in all_lines() {
            prop_assert_ne!(board.unrevealed_in(&line).len(), 1);
        }
        // Idempotence.
        let again = auto_reveal_cascade(&mut board, &grid);
        prop_assert!(again.is_empty());
    }

    #[test]
    fn cascade_is_confluent_under_line_order(hidden in proptest::collection::btree_set(0usize..GRID_CELLS, 0..GRID_CELLS)) {
        let grid = grid();
        let hidden: Vec<usize> = hidden.into_iter().collect();

        let mut forward = board_with_hidden(&grid, &hidden);
        auto_reveal_cascade(&mut forward, &grid);

        // Reference cascade scanning lines in reverse order.
        let mut reverse = board_with_hidden(&grid, &hidden);
        loop {
            let mut changed = false;
            let mut lines: Vec<[usize; 5]> = all_lines().collect();
            lines.reverse();
            for line in lines {
                if let [only] = reverse.unrevealed_in(&line)[..] {
                    reverse.reveal(only, grid.letter_at(only), RevealedBy::Auto);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        for i in 0..GRID_CELLS {
            prop_assert_eq!(forward.cell(i).revealed, reverse.cell(i).revealed);
        }
    }
}
