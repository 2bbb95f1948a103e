use crate::domain::board::Direction;
use crate::domain::cells::Board;
use crate::domain::engine::{
    self, SessionCtx, ASK_COST, STARTING_SCORE, WRONG_GUESS_BONUS, WRONG_GUESS_PENALTY,
};
use crate::domain::events::QuestionAskedPayload;
use crate::domain::grid::GridContent;
use crate::domain::locks::{LockEntry, LockQueue};
use crate::entities::cell_states::{RevealedBy, Topic};
use crate::entities::sessions::SessionStatus;
use crate::errors::domain::{ConflictKind, DomainError};

// Row 0 = "ABCDE", column 0 = "AFKPU".
const CELLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXY";

fn grid() -> GridContent {
    GridContent::from_cells(CELLS).unwrap()
}

fn fresh() -> (SessionCtx, Board, LockQueue) {
    (
        SessionCtx::new_in_progress(),
        Board::new_hidden(),
        LockQueue::default(),
    )
}

fn reveal_all_except(board: &mut Board, grid: &GridContent, hidden: &[usize]) {
    for i in 0..25 {
        if !hidden.contains(&i) {
            board.reveal(i, grid.letter_at(i), RevealedBy::Guess);
        }
    }
}

fn pending_question(cell_index: usize) -> QuestionAskedPayload {
    QuestionAskedPayload {
        cell_index,
        row: cell_index / 5,
        col: cell_index % 5,
        topic: Topic::Science,
        question_text: "Which capital hosted the first modern Olympics?".into(),
        answer: "Athens".into(),
        acceptable_variants: vec!["athens greece".into()],
        generator: "stub_v1".into(),
    }
}

#[test]
fn correct_letter_guess_reveals_without_score_change() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();

    let outcome =
        engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, 'a')
            .unwrap();

    assert!(outcome.correct);
    assert_eq!(outcome.revealed_letter, Some('A'));
    assert!(outcome.locks_enqueued.is_empty());
    let cell = board.cell(0);
    assert!(cell.revealed);
    assert_eq!(cell.letter, Some('A'));
    assert_eq!(cell.revealed_by, Some(RevealedBy::Guess));
    assert_eq!(session.player1_score, STARTING_SCORE);
    assert_eq!(session.player2_score, STARTING_SCORE);
    assert_eq!(session.current_turn, 2);
}

#[test]
fn wrong_letter_guess_penalizes_and_locks() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();

    let outcome =
        engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, 'Z')
            .unwrap();

    assert!(!outcome.correct);
    assert_eq!(outcome.score_delta, -WRONG_GUESS_PENALTY);
    assert_eq!(outcome.opponent_score_delta, WRONG_GUESS_BONUS);
    assert_eq!(outcome.locks_enqueued, vec![0]);
    assert_eq!(session.player1_score, 95);
    assert_eq!(session.player2_score, 101);
    assert!(board.cell(0).locked);
    assert!(!board.cell(0).revealed);
    assert!(locks.is_locked(0));
    assert_eq!(session.current_turn, 2);
}

#[test]
fn ask_consumes_topic_and_point_but_keeps_turn() {
    let (mut session, mut board, _locks) = fresh();

    engine::apply_ask(&mut session, &mut board, 1, 5, Topic::Science).unwrap();

    assert_eq!(board.cell(5).topics_used, vec![Topic::Science]);
    assert_eq!(session.player1_score, STARTING_SCORE - ASK_COST);
    assert_eq!(session.current_turn, 1);
    assert!(!board.cell(5).revealed);
}

#[test]
fn correct_answer_reveals_and_clears_oldest_lock() {
    let (mut session, mut board, _) = fresh();
    let grid = grid();
    let mut locks = LockQueue::new(vec![LockEntry {
        id: 11,
        cell_index: 0,
        cleared: false,
    }]);
    board.cell_mut(0).locked = true;

    let outcome = engine::apply_answer(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        &pending_question(5),
        "  athens ",
    )
    .unwrap();

    assert!(outcome.correct);
    assert_eq!(outcome.revealed_letter, Some('F'));
    let cleared = outcome.lock_cleared.unwrap();
    assert_eq!(cleared.entry_id, 11);
    assert_eq!(cleared.cell_index, 0);
    assert!(!cleared.cell_still_locked);
    assert!(!board.cell(0).locked);
    let cell = board.cell(5);
    assert!(cell.revealed);
    assert_eq!(cell.revealed_by, Some(RevealedBy::Question));
    assert_eq!(session.current_turn, 2);
}

#[test]
fn answer_accepts_variants_case_insensitively() {
    assert!(engine::answer_matches(
        "ATHENS GREECE",
        "Athens",
        &["athens greece".to_string()]
    ));
    assert!(!engine::answer_matches(
        "Sparta",
        "Athens",
        &["athens greece".to_string()]
    ));
}

#[test]
fn wrong_answer_advances_turn_without_reveal_or_clear() {
    let (mut session, mut board, _) = fresh();
    let grid = grid();
    let mut locks = LockQueue::new(vec![LockEntry {
        id: 3,
        cell_index: 2,
        cleared: false,
    }]);
    board.cell_mut(2).locked = true;

    let outcome = engine::apply_answer(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        &pending_question(5),
        "Sparta",
    )
    .unwrap();

    assert!(!outcome.correct);
    assert_eq!(outcome.revealed_letter, None);
    assert!(outcome.lock_cleared.is_none());
    assert!(!board.cell(5).revealed);
    assert!(board.cell(2).locked);
    assert_eq!(session.current_turn, 2);
}

#[test]
fn completing_word_guess_chains_into_auto_reveal() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    // Row 0 missing only cell 0; column 0 then missing only cell 20.
    reveal_all_except(&mut board, &grid, &[0, 20, 21, 22, 23, 24]);

    let outcome = engine::apply_guess_word(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        Direction::Across,
        0,
        "abcde",
    )
    .unwrap();

    assert!(outcome.correct);
    assert_eq!(outcome.revealed_cells.len(), 1);
    assert_eq!(outcome.revealed_cells[0].cell_index, 0);
    assert_eq!(outcome.revealed_cells[0].letter, 'A');
    assert_eq!(board.cell(0).revealed_by, Some(RevealedBy::Guess));
    // Column 0 closes, then row 4 closes cell by cell.
    assert!(outcome.auto_reveals.iter().any(|r| r.cell_index == 20));
    assert_eq!(board.cell(20).revealed_by, Some(RevealedBy::Auto));
    assert_eq!(session.current_turn, 2);
}

#[test]
fn wrong_word_guess_locks_only_hidden_cells_ascending() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    for i in [1usize, 3, 4] {
        board.reveal(i, grid.letter_at(i), RevealedBy::Guess);
    }

    let outcome = engine::apply_guess_word(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        Direction::Across,
        0,
        "ZZZZZ",
    )
    .unwrap();

    assert!(!outcome.correct);
    assert_eq!(outcome.locks_enqueued, vec![0, 2]);
    assert!(outcome.revealed_cells.is_empty());
    assert!(outcome.auto_reveals.is_empty());
    assert_eq!(session.player1_score, 95);
    assert_eq!(session.player2_score, 101);
    assert!(board.cell(0).locked && board.cell(2).locked);
    assert!(!board.cell(1).locked);
    assert_eq!(session.current_turn, 2);
}

#[test]
fn skip_only_flips_turn() {
    let (mut session, _board, _locks) = fresh();
    engine::apply_skip(&mut session, 1).unwrap();
    assert_eq!(session.current_turn, 2);
    assert_eq!(session.player1_score, STARTING_SCORE);
}

#[test]
fn out_of_turn_action_is_rejected() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    let err = engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 2, 0, 'A')
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::OutOfTurn, _)
    ));
}

#[test]
fn completed_session_rejects_actions() {
    let (mut session, mut board, mut locks) = fresh();
    session.status = SessionStatus::Complete;
    let grid = grid();
    let err = engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, 'A')
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SessionNotInProgress, _)
    ));
}

#[test]
fn guessing_a_revealed_cell_is_rejected() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    board.reveal(0, 'A', RevealedBy::Guess);
    let err = engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, 'A')
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::CellAlreadyRevealed, _)
    ));
}

#[test]
fn guessing_a_locked_cell_is_rejected() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    board.cell_mut(0).locked = true;
    let err = engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, 'A')
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::CellLocked, _)
    ));
}

#[test]
fn fully_revealed_word_is_rejected() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    for i in 0..5 {
        board.reveal(i, grid.letter_at(i), RevealedBy::Guess);
    }
    let err = engine::apply_guess_word(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        Direction::Across,
        0,
        "ABCDE",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::WordAlreadyRevealed, _)
    ));
}

#[test]
fn word_with_locked_hidden_cell_is_rejected() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    board.reveal(1, 'B', RevealedBy::Guess);
    board.cell_mut(2).locked = true;
    let err = engine::apply_guess_word(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        Direction::Across,
        0,
        "ABCDE",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::WordLocked, _)
    ));
}

#[test]
fn word_guess_allowed_when_locked_cell_already_revealed() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    // A lock on an already-revealed cell does not block the word.
    board.reveal(1, 'B', RevealedBy::Guess);
    board.cell_mut(1).locked = true;
    let outcome = engine::apply_guess_word(
        &mut session,
        &mut board,
        &mut locks,
        &grid,
        1,
        Direction::Across,
        0,
        "ABCDE",
    )
    .unwrap();
    assert!(outcome.correct);
}

#[test]
fn repeat_topic_is_rejected_before_the_limit() {
    let (mut session, mut board, _locks) = fresh();
    engine::apply_ask(&mut session, &mut board, 1, 5, Topic::Science).unwrap();
    let err = engine::validate_ask(&session, &board, 1, 5, Topic::Science).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::TopicAlreadyUsed, _)
    ));
}

#[test]
fn exhausted_cell_rejects_every_further_ask() {
    let (session, mut board, _locks) = fresh();
    board.cell_mut(5).topics_used = Topic::ALL.to_vec();
    // With five canonical topics, a sixth distinct topic cannot exist;
    // every re-ask on a full cell trips the already-used check first.
    for topic in Topic::ALL {
        let err = engine::validate_ask(&session, &board, 1, 5, topic).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::TopicAlreadyUsed, _)
        ));
    }
}

#[test]
fn scores_may_go_negative() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    session.player1_score = 3;
    engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, 'Z').unwrap();
    assert_eq!(session.player1_score, -2);
}

#[test]
fn non_alphabetic_guess_is_a_validation_error() {
    let (mut session, mut board, mut locks) = fresh();
    let grid = grid();
    let err = engine::apply_guess_letter(&mut session, &mut board, &mut locks, &grid, 1, 0, '7')
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
