//! SeaORM adapter for session rows.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::sessions;

pub mod dto;

pub use dto::{SessionCreate, SessionUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find_by_id(session_id).one(conn).await
}

/// Load the session row with `SELECT ... FOR UPDATE`, serializing all
/// mutating actions on one session behind the row lock.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .filter(sessions::Column::Id.eq(session_id))
        .lock(LockType::Update)
        .one(conn)
        .await
}

pub async fn insert_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let session_active = sessions::ActiveModel {
        id: Set(dto.id),
        status: Set(sessions::SessionStatus::InProgress),
        current_turn: Set(1),
        player1_grid_id: Set(dto.player1_grid_id),
        player2_grid_id: Set(dto.player2_grid_id),
        player1_name: Set(dto.player1_name),
        player2_name: Set(dto.player2_name),
        player1_score: Set(dto.starting_score),
        player2_score: Set(dto.starting_score),
        created_at: Set(now),
        updated_at: Set(now),
    };
    session_active.insert(conn).await
}

/// Persist the turn-relevant fields mutated by an action.
pub async fn update_after_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionUpdate,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut session_active = sessions::ActiveModel {
        id: Set(dto.id),
        current_turn: Set(dto.current_turn),
        player1_score: Set(dto.player1_score),
        player2_score: Set(dto.player2_score),
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(status) = dto.status {
        session_active.status = Set(status);
    }
    session_active.update(conn).await
}
