use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::cell_states_sea::{self, CellUpdate};
use crate::domain::cells::{Board, CellState};
use crate::domain::events::RevealedCell;
use crate::entities::cell_states::{self, RevealedBy, TopicList};
use crate::errors::domain::DomainError;

fn to_cell_state(row: &cell_states::Model) -> Result<CellState, DomainError> {
    let letter = match &row.letter {
        Some(s) => Some(s.chars().next().ok_or_else(|| {
            DomainError::corrupt(format!("cell {} has an empty letter", row.cell_index))
        })?),
        None => None,
    };
    Ok(CellState {
        index: row.cell_index as usize,
        revealed: row.revealed,
        locked: row.locked,
        letter,
        revealed_by: row.revealed_by,
        topics_used: row.topics_used.0.clone(),
    })
}

pub async fn create_initial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<(), DomainError> {
    cell_states_sea::insert_initial_cells(conn, session_id).await?;
    Ok(())
}

pub async fn load_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Vec<cell_states::Model>, DomainError> {
    let rows = cell_states_sea::find_for_player(conn, session_id, player_number).await?;
    Ok(rows)
}

/// Load one player's board with every ledger row locked for update.
pub async fn load_board_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Board, DomainError> {
    let rows = cell_states_sea::find_for_player_for_update(conn, session_id, player_number).await?;
    let cells = rows
        .iter()
        .map(to_cell_state)
        .collect::<Result<Vec<_>, _>>()?;
    Board::from_cells(cells)
}

/// Read-only board load for completion checks inside an action.
pub async fn load_board<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Board, DomainError> {
    let rows = cell_states_sea::find_for_player(conn, session_id, player_number).await?;
    let cells = rows
        .iter()
        .map(to_cell_state)
        .collect::<Result<Vec<_>, _>>()?;
    Board::from_cells(cells)
}

/// Persist a batch of reveals with one cause.
pub async fn persist_reveals<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    reveals: &[RevealedCell],
    revealed_by: RevealedBy,
) -> Result<(), DomainError> {
    for reveal in reveals {
        cell_states_sea::update_cell(
            conn,
            CellUpdate::new(session_id, player_number, reveal.cell_index as i16)
                .reveal(reveal.letter.to_string(), revealed_by),
        )
        .await?;
    }
    Ok(())
}

pub async fn set_locked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    cell_index: usize,
    locked: bool,
) -> Result<(), DomainError> {
    cell_states_sea::update_cell(
        conn,
        CellUpdate::new(session_id, player_number, cell_index as i16).with_locked(locked),
    )
    .await?;
    Ok(())
}

pub async fn set_topics<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    cell_index: usize,
    topics: Vec<crate::entities::cell_states::Topic>,
) -> Result<(), DomainError> {
    cell_states_sea::update_cell(
        conn,
        CellUpdate::new(session_id, player_number, cell_index as i16)
            .with_topics(TopicList(topics)),
    )
    .await?;
    Ok(())
}
