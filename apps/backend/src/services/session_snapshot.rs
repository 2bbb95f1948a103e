use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::snapshot::SessionSnapshot;
use crate::entities::sessions;
use crate::errors::domain::DomainError;
use crate::repos;

/// Full board state for both players plus the latest event.
pub async fn get_snapshot<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<SessionSnapshot, DomainError> {
    let session = repos::sessions::require(conn, session_id).await?;
    assemble(conn, &session).await
}

/// Assemble a snapshot from an already-loaded session row, reading cell
/// rows and the latest event in the same transaction so the caller never
/// observes a half-applied action.
pub async fn assemble<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session: &sessions::Model,
) -> Result<SessionSnapshot, DomainError> {
    let player1_cells = repos::cells::load_rows(conn, session.id, 1).await?;
    let player2_cells = repos::cells::load_rows(conn, session.id, 2).await?;
    let last_event = repos::events::latest(conn, session.id).await?;
    SessionSnapshot::assemble(
        session,
        &player1_cells,
        &player2_cells,
        last_event.as_ref(),
    )
}
