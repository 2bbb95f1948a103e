//! Action services: one transaction per action, row locks acquired
//! before validation, effects persisted and the event appended before
//! the caller commits.

pub mod session_answer;
pub mod session_ask;
pub mod session_create;
pub mod session_guess;
pub mod session_snapshot;

#[cfg(test)]
mod tests_turn_order;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::board::opponent_of;
use crate::domain::cells::Board;
use crate::entities::sessions::SessionStatus;
use crate::errors::domain::DomainError;
use crate::repos;

/// After a reveal-producing action: complete the session once all 50
/// cells are revealed. The acting board is already in memory; the
/// opponent's is only read when the acting board just finished.
async fn completion_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    board: &Board,
) -> Result<Option<SessionStatus>, DomainError> {
    if !board.is_complete() {
        return Ok(None);
    }
    let opponent = repos::cells::load_board(conn, session_id, opponent_of(player_number)).await?;
    Ok(opponent.is_complete().then_some(SessionStatus::Complete))
}
