//! SeaORM adapter for the wrong-guess lock queue.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::cell_locks;

/// Append one lock entry per cell, in the given order.
pub async fn insert_locks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    cell_indices: &[i16],
) -> Result<Vec<cell_locks::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut inserted = Vec::with_capacity(cell_indices.len());
    for &cell_index in cell_indices {
        let lock_active = cell_locks::ActiveModel {
            id: NotSet,
            session_id: Set(session_id),
            player_number: Set(player_number),
            cell_index: Set(cell_index),
            created_at: Set(now),
            cleared_at: Set(None),
        };
        inserted.push(lock_active.insert(conn).await?);
    }
    Ok(inserted)
}

/// Uncleared entries for one player in FIFO order (created_at, then id),
/// locked for update so clearing races cannot double-spend an entry.
pub async fn find_uncleared_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Vec<cell_locks::Model>, sea_orm::DbErr> {
    cell_locks::Entity::find()
        .filter(cell_locks::Column::SessionId.eq(session_id))
        .filter(cell_locks::Column::PlayerNumber.eq(player_number))
        .filter(cell_locks::Column::ClearedAt.is_null())
        .order_by_asc(cell_locks::Column::CreatedAt)
        .order_by_asc(cell_locks::Column::Id)
        .lock(LockType::Update)
        .all(conn)
        .await
}

pub async fn mark_cleared<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lock_id: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = cell_locks::Entity::update_many()
        .set(cell_locks::ActiveModel {
            cleared_at: Set(Some(now)),
            ..Default::default()
        })
        .filter(cell_locks::Column::Id.eq(lock_id))
        .filter(cell_locks::Column::ClearedAt.is_null())
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Uncleared lock not found: {lock_id}"
        )));
    }
    Ok(())
}
