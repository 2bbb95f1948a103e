use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::board::Direction;
use crate::domain::engine::{self, cell_coords};
use crate::domain::events::{EventPayload, LetterGuessedPayload, RevealedCell, WordGuessedPayload};
use crate::domain::snapshot::SessionSnapshot;
use crate::entities::cell_states::RevealedBy;
use crate::errors::domain::DomainError;
use crate::repos;
use crate::services::{completion_status, session_snapshot};

/// Guess the letter of a single hidden cell. A correct guess is free and
/// reveals it; a wrong guess costs points, rewards the opponent, and
/// enqueues a lock on the cell.
pub async fn guess_letter<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    cell_index: usize,
    guessed_letter: char,
) -> Result<SessionSnapshot, DomainError> {
    let session = repos::sessions::require_for_update(conn, session_id).await?;
    let mut ctx = repos::sessions::to_ctx(&session);
    let mut board = repos::cells::load_board_for_update(conn, session_id, player_number).await?;
    let mut locks = repos::locks::load_queue_for_update(conn, session_id, player_number).await?;
    let grid_id = if player_number == 1 {
        session.player1_grid_id
    } else {
        session.player2_grid_id
    };
    let grid = repos::grids::load_content(conn, grid_id).await?;

    let outcome = engine::apply_guess_letter(
        &mut ctx,
        &mut board,
        &mut locks,
        &grid,
        player_number,
        cell_index,
        guessed_letter,
    )?;

    if let Some(letter) = outcome.revealed_letter {
        repos::cells::persist_reveals(
            conn,
            session_id,
            player_number,
            &[RevealedCell { cell_index, letter }],
            RevealedBy::Guess,
        )
        .await?;
    }
    if !outcome.auto_reveals.is_empty() {
        repos::cells::persist_reveals(
            conn,
            session_id,
            player_number,
            &outcome.auto_reveals,
            RevealedBy::Auto,
        )
        .await?;
    }
    if !outcome.locks_enqueued.is_empty() {
        repos::locks::enqueue(conn, session_id, player_number, &outcome.locks_enqueued).await?;
        for &i in &outcome.locks_enqueued {
            repos::cells::set_locked(conn, session_id, player_number, i, true).await?;
        }
    }

    let status = completion_status(conn, session_id, player_number, &board).await?;
    if let Some(s) = status {
        ctx.status = s;
    }
    let updated = repos::sessions::persist_action(conn, session_id, &ctx, status).await?;

    let (row, col) = cell_coords(cell_index);
    let payload = EventPayload::LetterGuessed(LetterGuessedPayload {
        cell_index,
        row,
        col,
        guessed_letter: guessed_letter.to_ascii_uppercase(),
        correct: outcome.correct,
        revealed_letter: outcome.revealed_letter,
        score_delta: outcome.score_delta,
        opponent_score_delta: outcome.opponent_score_delta,
        locks_enqueued: outcome.locks_enqueued,
        auto_reveals: outcome.auto_reveals,
    });
    repos::events::append(conn, session_id, player_number, &payload).await?;

    session_snapshot::assemble(conn, &updated).await
}

/// Guess a full across or down word. A correct guess reveals every hidden
/// cell in the line; a wrong guess locks them all.
pub async fn guess_word<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    direction: Direction,
    index: usize,
    guessed_word: &str,
) -> Result<SessionSnapshot, DomainError> {
    let session = repos::sessions::require_for_update(conn, session_id).await?;
    let mut ctx = repos::sessions::to_ctx(&session);
    let mut board = repos::cells::load_board_for_update(conn, session_id, player_number).await?;
    let mut locks = repos::locks::load_queue_for_update(conn, session_id, player_number).await?;
    let grid_id = if player_number == 1 {
        session.player1_grid_id
    } else {
        session.player2_grid_id
    };
    let grid = repos::grids::load_content(conn, grid_id).await?;

    let outcome = engine::apply_guess_word(
        &mut ctx,
        &mut board,
        &mut locks,
        &grid,
        player_number,
        direction,
        index,
        guessed_word,
    )?;

    if !outcome.revealed_cells.is_empty() {
        repos::cells::persist_reveals(
            conn,
            session_id,
            player_number,
            &outcome.revealed_cells,
            RevealedBy::Guess,
        )
        .await?;
    }
    if !outcome.auto_reveals.is_empty() {
        repos::cells::persist_reveals(
            conn,
            session_id,
            player_number,
            &outcome.auto_reveals,
            RevealedBy::Auto,
        )
        .await?;
    }
    if !outcome.locks_enqueued.is_empty() {
        repos::locks::enqueue(conn, session_id, player_number, &outcome.locks_enqueued).await?;
        for &i in &outcome.locks_enqueued {
            repos::cells::set_locked(conn, session_id, player_number, i, true).await?;
        }
    }

    let status = completion_status(conn, session_id, player_number, &board).await?;
    if let Some(s) = status {
        ctx.status = s;
    }
    let updated = repos::sessions::persist_action(conn, session_id, &ctx, status).await?;

    let payload = EventPayload::WordGuessed(WordGuessedPayload {
        direction,
        index,
        guessed_word: guessed_word.to_string(),
        correct: outcome.correct,
        revealed_cells: outcome.revealed_cells,
        score_delta: outcome.score_delta,
        opponent_score_delta: outcome.opponent_score_delta,
        locks_enqueued: outcome.locks_enqueued,
        auto_reveals: outcome.auto_reveals,
    });
    repos::events::append(conn, session_id, player_number, &payload).await?;

    session_snapshot::assemble(conn, &updated).await
}

/// Pass the turn. Leaves no board effect and writes no log entry.
pub async fn skip<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<SessionSnapshot, DomainError> {
    let session = repos::sessions::require_for_update(conn, session_id).await?;
    let mut ctx = repos::sessions::to_ctx(&session);

    engine::apply_skip(&mut ctx, player_number)?;

    let updated = repos::sessions::persist_action(conn, session_id, &ctx, None).await?;
    session_snapshot::assemble(conn, &updated).await
}
