use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::sessions_sea::{self, SessionCreate, SessionUpdate};
use crate::domain::engine::{SessionCtx, STARTING_SCORE};
use crate::entities::sessions::{self, SessionStatus};
use crate::errors::domain::{DomainError, NotFoundKind};

pub fn to_ctx(model: &sessions::Model) -> SessionCtx {
    SessionCtx {
        status: model.status,
        current_turn: model.current_turn,
        player1_score: model.player1_score,
        player2_score: model.player2_score,
    }
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<sessions::Model, DomainError> {
    sessions_sea::find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("session {session_id}"))
        })
}

/// Load under an exclusive row lock; the lock serializes every mutating
/// action for this session until the transaction ends.
pub async fn require_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<sessions::Model, DomainError> {
    sessions_sea::find_by_id_for_update(conn, session_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("session {session_id}"))
        })
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player1_grid_id: i64,
    player2_grid_id: i64,
    player1_name: Option<String>,
    player2_name: Option<String>,
) -> Result<sessions::Model, DomainError> {
    let model = sessions_sea::insert_session(
        conn,
        SessionCreate {
            id: Uuid::new_v4(),
            player1_grid_id,
            player2_grid_id,
            player1_name,
            player2_name,
            starting_score: STARTING_SCORE,
        },
    )
    .await?;
    Ok(model)
}

/// Persist the session fields an action mutated, optionally transitioning
/// status when the action completed the game.
pub async fn persist_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    ctx: &SessionCtx,
    status: Option<SessionStatus>,
) -> Result<sessions::Model, DomainError> {
    let model = sessions_sea::update_after_action(
        conn,
        SessionUpdate {
            id: session_id,
            current_turn: ctx.current_turn,
            player1_score: ctx.player1_score,
            player2_score: ctx.player2_score,
            status,
        },
    )
    .await?;
    Ok(model)
}
