use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::cell_locks_sea;
use crate::domain::locks::{LockEntry, LockQueue};
use crate::errors::domain::DomainError;

/// Load the player's uncleared lock entries as a FIFO queue, rows locked
/// for update.
pub async fn load_queue_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<LockQueue, DomainError> {
    let rows = cell_locks_sea::find_uncleared_for_update(conn, session_id, player_number).await?;
    Ok(LockQueue::new(
        rows.iter()
            .map(|row| LockEntry {
                id: row.id,
                cell_index: row.cell_index as usize,
                cleared: false,
            })
            .collect(),
    ))
}

/// Append one lock entry per cell index, preserving order.
pub async fn enqueue<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    cell_indices: &[usize],
) -> Result<(), DomainError> {
    let indices: Vec<i16> = cell_indices.iter().map(|&i| i as i16).collect();
    cell_locks_sea::insert_locks(conn, session_id, player_number, &indices).await?;
    Ok(())
}

pub async fn clear<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lock_id: i64,
) -> Result<(), DomainError> {
    cell_locks_sea::mark_cleared(conn, lock_id).await?;
    Ok(())
}
