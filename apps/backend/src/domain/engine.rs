//! The turn engine: validates an action against current session state,
//! mutates the ledger and lock queue, computes score deltas, runs the
//! auto-reveal cascade, and advances the turn.
//!
//! All functions here are synchronous and side-effect free outside their
//! arguments. Callers hold exclusive row locks on everything passed in
//! and persist the mutations afterwards in the same transaction.

use crate::domain::board::{
    all_lines, check_cell_index, col_of, line_indices, opponent_of, row_of, Direction,
};
use crate::domain::cells::Board;
use crate::domain::events::{QuestionAskedPayload, RevealedCell};
use crate::domain::grid::GridContent;
use crate::domain::locks::{ClearedLock, LockQueue};
use crate::entities::cell_states::{RevealedBy, Topic};
use crate::entities::sessions::SessionStatus;
use crate::errors::domain::{ConflictKind, DomainError};

pub const STARTING_SCORE: i32 = 100;
pub const ASK_COST: i32 = 1;
pub const WRONG_GUESS_PENALTY: i32 = 5;
pub const WRONG_GUESS_BONUS: i32 = 1;
pub const MAX_TOPICS_PER_CELL: usize = 5;

/// The turn-relevant slice of a session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCtx {
    pub status: SessionStatus,
    pub current_turn: i16,
    pub player1_score: i32,
    pub player2_score: i32,
}

impl SessionCtx {
    pub fn new_in_progress() -> SessionCtx {
        SessionCtx {
            status: SessionStatus::InProgress,
            current_turn: 1,
            player1_score: STARTING_SCORE,
            player2_score: STARTING_SCORE,
        }
    }

    pub fn score(&self, player: i16) -> i32 {
        if player == 1 {
            self.player1_score
        } else {
            self.player2_score
        }
    }

    fn score_mut(&mut self, player: i16) -> &mut i32 {
        if player == 1 {
            &mut self.player1_score
        } else {
            &mut self.player2_score
        }
    }

    fn advance_turn(&mut self, player: i16) {
        self.current_turn = opponent_of(player);
    }
}

/// Common preconditions for every mutating action, checked in order:
/// session in progress, then acting player holds the turn.
pub fn ensure_actionable(session: &SessionCtx, player: i16) -> Result<(), DomainError> {
    if session.status != SessionStatus::InProgress {
        return Err(DomainError::conflict(
            ConflictKind::SessionNotInProgress,
            format!("session status is {:?}", session.status),
        ));
    }
    if session.current_turn != player {
        return Err(DomainError::conflict(
            ConflictKind::OutOfTurn,
            format!("it is player {}'s turn", session.current_turn),
        ));
    }
    Ok(())
}

/// Topic gating for an ask, checked before any question is generated so a
/// failed generation leaves nothing to roll back.
pub fn validate_ask(
    session: &SessionCtx,
    board: &Board,
    player: i16,
    cell_index: usize,
    topic: Topic,
) -> Result<(), DomainError> {
    ensure_actionable(session, player)?;
    check_cell_index(cell_index)?;
    let cell = board.cell(cell_index);
    if cell.topics_used.contains(&topic) {
        return Err(DomainError::conflict(
            ConflictKind::TopicAlreadyUsed,
            format!("topic {} already asked for cell {cell_index}", topic.as_str()),
        ));
    }
    if cell.topics_used.len() >= MAX_TOPICS_PER_CELL {
        return Err(DomainError::conflict(
            ConflictKind::TopicLimitReached,
            format!("all {MAX_TOPICS_PER_CELL} topics used for cell {cell_index}"),
        ));
    }
    Ok(())
}

/// Record a successfully generated ask: consume the topic and charge the
/// asking player. No reveal, and the turn stays with the asker.
pub fn apply_ask(
    session: &mut SessionCtx,
    board: &mut Board,
    player: i16,
    cell_index: usize,
    topic: Topic,
) -> Result<(), DomainError> {
    validate_ask(session, board, player, cell_index, topic)?;
    board.cell_mut(cell_index).topics_used.push(topic);
    *session.score_mut(player) -= ASK_COST;
    Ok(())
}

/// Case-insensitive, whitespace-trimmed match against the canonical
/// answer or any acceptable variant.
pub fn answer_matches(submitted: &str, answer: &str, variants: &[String]) -> bool {
    let normalized = submitted.trim().to_lowercase();
    if normalized == answer.trim().to_lowercase() {
        return true;
    }
    variants.iter().any(|v| normalized == v.trim().to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// False when the target cell was already revealed (e.g. by a
    /// cascade between the ask and the answer).
    pub revealed_now: bool,
    pub revealed_letter: Option<char>,
    pub lock_cleared: Option<ClearedLock>,
    pub auto_reveals: Vec<RevealedCell>,
}

/// Resolve the pending question. Correct answers reveal the target cell
/// and clear the oldest uncleared lock anywhere on the player's board.
/// The turn advances either way.
pub fn apply_answer(
    session: &mut SessionCtx,
    board: &mut Board,
    locks: &mut LockQueue,
    grid: &GridContent,
    player: i16,
    pending: &QuestionAskedPayload,
    submitted: &str,
) -> Result<AnswerOutcome, DomainError> {
    ensure_actionable(session, player)?;

    let correct = answer_matches(submitted, &pending.answer, &pending.acceptable_variants);
    let mut revealed_now = false;
    let mut revealed_letter = None;
    let mut lock_cleared = None;
    let mut auto_reveals = Vec::new();

    if correct {
        let letter = grid.letter_at(pending.cell_index);
        revealed_letter = Some(letter);
        // The cell may have been revealed by a cascade since the ask.
        if !board.cell(pending.cell_index).revealed {
            board.reveal(pending.cell_index, letter, RevealedBy::Question);
            revealed_now = true;
        }
        lock_cleared = locks.clear_oldest();
        if let Some(cleared) = lock_cleared {
            board.cell_mut(cleared.cell_index).locked = cleared.cell_still_locked;
        }
        auto_reveals = auto_reveal_cascade(board, grid);
    }

    session.advance_turn(player);
    Ok(AnswerOutcome {
        correct,
        revealed_now,
        revealed_letter,
        lock_cleared,
        auto_reveals,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGuessOutcome {
    pub correct: bool,
    pub revealed_letter: Option<char>,
    pub score_delta: i32,
    pub opponent_score_delta: i32,
    pub locks_enqueued: Vec<usize>,
    pub auto_reveals: Vec<RevealedCell>,
}

pub fn apply_guess_letter(
    session: &mut SessionCtx,
    board: &mut Board,
    locks: &mut LockQueue,
    grid: &GridContent,
    player: i16,
    cell_index: usize,
    guessed: char,
) -> Result<LetterGuessOutcome, DomainError> {
    ensure_actionable(session, player)?;
    check_cell_index(cell_index)?;
    if !guessed.is_ascii_alphabetic() {
        return Err(DomainError::validation(format!(
            "guessed letter must be A-Z, got {guessed:?}"
        )));
    }
    let cell = board.cell(cell_index);
    if cell.revealed {
        return Err(DomainError::conflict(
            ConflictKind::CellAlreadyRevealed,
            format!("cell {cell_index} is already revealed"),
        ));
    }
    if cell.locked {
        return Err(DomainError::conflict(
            ConflictKind::CellLocked,
            format!("cell {cell_index} is locked"),
        ));
    }

    let actual = grid.letter_at(cell_index);
    let correct = guessed.to_ascii_uppercase() == actual;

    let outcome = if correct {
        board.reveal(cell_index, actual, RevealedBy::Guess);
        let auto_reveals = auto_reveal_cascade(board, grid);
        LetterGuessOutcome {
            correct: true,
            revealed_letter: Some(actual),
            score_delta: 0,
            opponent_score_delta: 0,
            locks_enqueued: Vec::new(),
            auto_reveals,
        }
    } else {
        *session.score_mut(player) -= WRONG_GUESS_PENALTY;
        *session.score_mut(opponent_of(player)) += WRONG_GUESS_BONUS;
        locks.push(cell_index);
        board.cell_mut(cell_index).locked = true;
        LetterGuessOutcome {
            correct: false,
            revealed_letter: None,
            score_delta: -WRONG_GUESS_PENALTY,
            opponent_score_delta: WRONG_GUESS_BONUS,
            locks_enqueued: vec![cell_index],
            auto_reveals: Vec::new(),
        }
    };

    session.advance_turn(player);
    Ok(outcome)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGuessOutcome {
    pub correct: bool,
    pub revealed_cells: Vec<RevealedCell>,
    pub score_delta: i32,
    pub opponent_score_delta: i32,
    pub locks_enqueued: Vec<usize>,
    pub auto_reveals: Vec<RevealedCell>,
}

pub fn apply_guess_word(
    session: &mut SessionCtx,
    board: &mut Board,
    locks: &mut LockQueue,
    grid: &GridContent,
    player: i16,
    direction: Direction,
    index: usize,
    guessed: &str,
) -> Result<WordGuessOutcome, DomainError> {
    ensure_actionable(session, player)?;
    let line = line_indices(direction, index)?;
    let unrevealed = board.unrevealed_in(&line);
    if unrevealed.is_empty() {
        return Err(DomainError::conflict(
            ConflictKind::WordAlreadyRevealed,
            format!("{} {index} is fully revealed", direction.as_str()),
        ));
    }
    if let Some(&locked) = unrevealed.iter().find(|&&i| board.cell(i).locked) {
        return Err(DomainError::conflict(
            ConflictKind::WordLocked,
            format!("cell {locked} in {} {index} is locked", direction.as_str()),
        ));
    }

    let actual = grid.word_for(direction, index);
    let correct = guessed.trim().eq_ignore_ascii_case(actual);

    let outcome = if correct {
        // unrevealed is already ascending (line order).
        let revealed_cells: Vec<RevealedCell> = unrevealed
            .iter()
            .map(|&i| {
                let letter = grid.letter_at(i);
                board.reveal(i, letter, RevealedBy::Guess);
                RevealedCell {
                    cell_index: i,
                    letter,
                }
            })
            .collect();
        let auto_reveals = auto_reveal_cascade(board, grid);
        WordGuessOutcome {
            correct: true,
            revealed_cells,
            score_delta: 0,
            opponent_score_delta: 0,
            locks_enqueued: Vec::new(),
            auto_reveals,
        }
    } else {
        *session.score_mut(player) -= WRONG_GUESS_PENALTY;
        *session.score_mut(opponent_of(player)) += WRONG_GUESS_BONUS;
        for &i in &unrevealed {
            locks.push(i);
            board.cell_mut(i).locked = true;
        }
        WordGuessOutcome {
            correct: false,
            revealed_cells: Vec::new(),
            score_delta: -WRONG_GUESS_PENALTY,
            opponent_score_delta: WRONG_GUESS_BONUS,
            locks_enqueued: unrevealed,
            auto_reveals: Vec::new(),
        }
    };

    session.advance_turn(player);
    Ok(outcome)
}

/// Skip only flips the turn; it leaves no board effect and no log entry.
pub fn apply_skip(session: &mut SessionCtx, player: i16) -> Result<(), DomainError> {
    ensure_actionable(session, player)?;
    session.advance_turn(player);
    Ok(())
}

/// Deducible-fill propagation: any line with exactly one hidden cell has
/// that cell revealed as `auto`, repeated to a fixed point. The result is
/// confluent; reveals are reported in ascending cell-index order.
pub fn auto_reveal_cascade(board: &mut Board, grid: &GridContent) -> Vec<RevealedCell> {
    let mut revealed = Vec::new();
    loop {
        let mut changed = false;
        for line in all_lines() {
            let hidden = board.unrevealed_in(&line);
            if let [only] = hidden[..] {
                let letter = grid.letter_at(only);
                board.reveal(only, letter, RevealedBy::Auto);
                revealed.push(RevealedCell {
                    cell_index: only,
                    letter,
                });
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    revealed.sort_by_key(|r| r.cell_index);
    revealed
}

/// Convenience for event payloads.
pub fn cell_coords(cell_index: usize) -> (usize, usize) {
    (row_of(cell_index), col_of(cell_index))
}
