//! SeaORM adapter for the append-only event log.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::event_logs;

pub mod dto;

pub use dto::EventCreate;

pub async fn insert_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EventCreate,
) -> Result<event_logs::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let event_active = event_logs::ActiveModel {
        id: NotSet,
        session_id: Set(dto.session_id),
        player_number: Set(dto.player_number),
        event_type: Set(dto.event_type),
        event_data: Set(dto.event_data),
        created_at: Set(now),
    };
    event_active.insert(conn).await
}

/// The most recent event for the session, by (created_at, id).
pub async fn find_latest<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<Option<event_logs::Model>, sea_orm::DbErr> {
    event_logs::Entity::find()
        .filter(event_logs::Column::SessionId.eq(session_id))
        .order_by_desc(event_logs::Column::CreatedAt)
        .order_by_desc(event_logs::Column::Id)
        .one(conn)
        .await
}

/// The most recent event of one type for (session, player).
pub async fn find_latest_of_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    event_type: event_logs::EventType,
) -> Result<Option<event_logs::Model>, sea_orm::DbErr> {
    event_logs::Entity::find()
        .filter(event_logs::Column::SessionId.eq(session_id))
        .filter(event_logs::Column::PlayerNumber.eq(player_number))
        .filter(event_logs::Column::EventType.eq(event_type))
        .order_by_desc(event_logs::Column::CreatedAt)
        .order_by_desc(event_logs::Column::Id)
        .one(conn)
        .await
}

/// All events of one type for (session, player) in chronological order.
pub async fn find_all_of_type<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    event_type: event_logs::EventType,
) -> Result<Vec<event_logs::Model>, sea_orm::DbErr> {
    event_logs::Entity::find()
        .filter(event_logs::Column::SessionId.eq(session_id))
        .filter(event_logs::Column::PlayerNumber.eq(player_number))
        .filter(event_logs::Column::EventType.eq(event_type))
        .order_by_asc(event_logs::Column::CreatedAt)
        .order_by_asc(event_logs::Column::Id)
        .all(conn)
        .await
}
