//! SeaORM adapter for the cell reveal ledger.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::board::GRID_CELLS;
use crate::entities::cell_states;

pub mod dto;

pub use dto::CellUpdate;

/// Insert the 50 initial ledger rows for a new session (25 per player).
pub async fn insert_initial_cells<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let rows = (1i16..=2).flat_map(|player_number| {
        (0..GRID_CELLS as i16).map(move |cell_index| cell_states::ActiveModel {
            session_id: Set(session_id),
            player_number: Set(player_number),
            cell_index: Set(cell_index),
            revealed: Set(false),
            locked: Set(false),
            letter: Set(None),
            revealed_by: Set(None),
            topics_used: Set(cell_states::TopicList::default()),
            created_at: Set(now),
            updated_at: Set(now),
        })
    });
    cell_states::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// One player's rows ordered by cell index.
pub async fn find_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Vec<cell_states::Model>, sea_orm::DbErr> {
    cell_states::Entity::find()
        .filter(cell_states::Column::SessionId.eq(session_id))
        .filter(cell_states::Column::PlayerNumber.eq(player_number))
        .order_by_asc(cell_states::Column::CellIndex)
        .all(conn)
        .await
}

/// Same as [`find_for_player`] but with `SELECT ... FOR UPDATE`.
pub async fn find_for_player_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Vec<cell_states::Model>, sea_orm::DbErr> {
    cell_states::Entity::find()
        .filter(cell_states::Column::SessionId.eq(session_id))
        .filter(cell_states::Column::PlayerNumber.eq(player_number))
        .order_by_asc(cell_states::Column::CellIndex)
        .lock(LockType::Update)
        .all(conn)
        .await
}

/// Apply one cell's changed fields, keyed by the composite primary key.
pub async fn update_cell<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CellUpdate,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut cell_active = cell_states::ActiveModel {
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(revealed) = dto.revealed {
        cell_active.revealed = Set(revealed);
    }
    if let Some(locked) = dto.locked {
        cell_active.locked = Set(locked);
    }
    if let Some(letter) = dto.letter {
        cell_active.letter = Set(letter);
    }
    if let Some(revealed_by) = dto.revealed_by {
        cell_active.revealed_by = Set(revealed_by);
    }
    if let Some(topics_used) = dto.topics_used {
        cell_active.topics_used = Set(topics_used);
    }

    let result = cell_states::Entity::update_many()
        .set(cell_active)
        .filter(cell_states::Column::SessionId.eq(dto.session_id))
        .filter(cell_states::Column::PlayerNumber.eq(dto.player_number))
        .filter(cell_states::Column::CellIndex.eq(dto.cell_index))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Cell state not found: session {}, player {}, cell {}",
            dto.session_id, dto.player_number, dto.cell_index
        )));
    }
    Ok(())
}
