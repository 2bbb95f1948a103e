use crate::domain::board::Direction;
use crate::domain::grid::GridContent;
use crate::errors::domain::DomainError;

const CELLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXY";

#[test]
fn from_cells_derives_row_and_column_words() {
    let grid = GridContent::from_cells(CELLS).unwrap();
    assert_eq!(grid.words_across[0], "ABCDE");
    assert_eq!(grid.words_across[4], "UVWXY");
    assert_eq!(grid.words_down[0], "AFKPU");
    assert_eq!(grid.words_down[4], "EJOTY");
    grid.validate().unwrap();
}

#[test]
fn word_for_matches_derived_words() {
    let grid = GridContent::from_cells(CELLS).unwrap();
    assert_eq!(grid.word_for(Direction::Across, 2), "KLMNO");
    assert_eq!(grid.word_for(Direction::Down, 1), "BGLQV");
}

#[test]
fn letter_at_is_row_major() {
    let grid = GridContent::from_cells(CELLS).unwrap();
    assert_eq!(grid.letter_at(0), 'A');
    assert_eq!(grid.letter_at(7), 'H');
    assert_eq!(grid.letter_at(24), 'Y');
}

#[test]
fn wrong_length_is_rejected() {
    let err = GridContent::from_cells("ABC").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn lowercase_cells_are_rejected() {
    let err = GridContent::from_cells("aBCDEFGHIJKLMNOPQRSTUVWXY").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn inconsistent_word_list_is_rejected() {
    let mut grid = GridContent::from_cells(CELLS).unwrap();
    grid.words_across[0] = "ZZZZZ".into();
    assert!(matches!(
        grid.validate().unwrap_err(),
        DomainError::Validation(_)
    ));
}

#[test]
fn content_hash_depends_only_on_cells() {
    let a = GridContent::from_cells(CELLS).unwrap();
    let b = GridContent::from_cells(CELLS).unwrap();
    assert_eq!(a.content_hash(), b.content_hash());

    let other = GridContent::from_cells("BBCDEFGHIJKLMNOPQRSTUVWXY").unwrap();
    assert_ne!(a.content_hash(), other.content_hash());
}
