use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::engine;
use crate::domain::events::{EventPayload, QuestionAnsweredPayload, RevealedCell};
use crate::domain::snapshot::SessionSnapshot;
use crate::entities::cell_states::RevealedBy;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos;
use crate::services::{completion_status, session_snapshot};

/// Resolve the acting player's pending question. A correct answer reveals
/// the asked cell, clears their oldest uncleared lock, and may trigger the
/// deducible-fill cascade. The turn advances either way.
pub async fn answer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    submitted_text: &str,
) -> Result<SessionSnapshot, DomainError> {
    let session = repos::sessions::require_for_update(conn, session_id).await?;
    let mut ctx = repos::sessions::to_ctx(&session);
    // Status and turn come before the pending-question scan so an
    // out-of-turn answer reports OutOfTurn, not NoPendingQuestion.
    engine::ensure_actionable(&ctx, player_number)?;
    let mut board = repos::cells::load_board_for_update(conn, session_id, player_number).await?;
    let mut locks = repos::locks::load_queue_for_update(conn, session_id, player_number).await?;

    let pending = repos::events::pending_question(conn, session_id, player_number)
        .await?
        .ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::NoPendingQuestion,
                format!("player {player_number} has no unanswered question"),
            )
        })?;

    let grid_id = if player_number == 1 {
        session.player1_grid_id
    } else {
        session.player2_grid_id
    };
    let grid = repos::grids::load_content(conn, grid_id).await?;

    let outcome = engine::apply_answer(
        &mut ctx,
        &mut board,
        &mut locks,
        &grid,
        player_number,
        &pending,
        submitted_text,
    )?;

    if outcome.revealed_now {
        if let Some(letter) = outcome.revealed_letter {
            let target = RevealedCell {
                cell_index: pending.cell_index,
                letter,
            };
            repos::cells::persist_reveals(
                conn,
                session_id,
                player_number,
                &[target],
                RevealedBy::Question,
            )
            .await?;
        }
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
    if let Some(cleared) = outcome.lock_cleared {
        repos::locks::clear(conn, cleared.entry_id).await?;
        repos::cells::set_locked(
            conn,
            session_id,
            player_number,
            cleared.cell_index,
            cleared.cell_still_locked,
        )
        .await?;
    }

    let status = completion_status(conn, session_id, player_number, &board).await?;
    if let Some(s) = status {
        ctx.status = s;
    }
    let updated = repos::sessions::persist_action(conn, session_id, &ctx, status).await?;

    let payload = EventPayload::QuestionAnswered(QuestionAnsweredPayload {
        cell_index: pending.cell_index,
        row: pending.row,
        col: pending.col,
        topic: pending.topic,
        submitted_text: submitted_text.to_string(),
        correct: outcome.correct,
        revealed_letter: outcome.revealed_letter,
        lock_cleared_cell_index: outcome.lock_cleared.map(|c| c.cell_index),
        auto_reveals: outcome.auto_reveals,
    });
    repos::events::append(conn, session_id, player_number, &payload).await?;

    session_snapshot::assemble(conn, &updated).await
}
