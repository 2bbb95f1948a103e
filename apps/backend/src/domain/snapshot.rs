//! Read-model assembly: the full session snapshot returned by every
//! action endpoint and by the snapshot query.

use sea_orm::prelude::Uuid;
use serde::Serialize;

use crate::domain::board::{col_of, row_of, GRID_CELLS};
use crate::domain::events::EventPayload;
use crate::entities::cell_states::{RevealedBy, Topic};
use crate::entities::event_logs::EventType;
use crate::entities::{cell_states, event_logs, sessions};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSnapshot {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub revealed: bool,
    /// Present only once revealed.
    pub letter: Option<String>,
    pub locked: bool,
    pub topics_used: Vec<Topic>,
    pub revealed_by: Option<RevealedBy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub player_number: i16,
    pub name: Option<String>,
    pub score: i32,
    pub grid_id: i64,
    pub completed: bool,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub status: sessions::SessionStatus,
    pub current_turn: i16,
    pub players: Vec<PlayerSnapshot>,
    pub last_event: Option<LastEvent>,
}

impl SessionSnapshot {
    /// Assemble from rows read in one consistent snapshot. Cell rows must
    /// be pre-sorted ascending by cell index, 25 per player.
    pub fn assemble(
        session: &sessions::Model,
        player1_cells: &[cell_states::Model],
        player2_cells: &[cell_states::Model],
        last_event: Option<&event_logs::Model>,
    ) -> Result<SessionSnapshot, DomainError> {
        let players = vec![
            assemble_player(session, 1, player1_cells)?,
            assemble_player(session, 2, player2_cells)?,
        ];
        let last_event = match last_event {
            Some(event) => Some(assemble_last_event(event)?),
            None => None,
        };
        Ok(SessionSnapshot {
            session_id: session.id,
            status: session.status,
            current_turn: session.current_turn,
            players,
            last_event,
        })
    }
}

fn assemble_player(
    session: &sessions::Model,
    player_number: i16,
    cells: &[cell_states::Model],
) -> Result<PlayerSnapshot, DomainError> {
    if cells.len() != GRID_CELLS {
        return Err(DomainError::corrupt(format!(
            "player {player_number} has {} ledger rows, expected {GRID_CELLS}",
            cells.len()
        )));
    }
    let cells: Vec<CellSnapshot> = cells
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.cell_index as usize != i {
                return Err(DomainError::corrupt(format!(
                    "ledger rows out of order: position {i} holds cell {}",
                    row.cell_index
                )));
            }
            Ok(CellSnapshot {
                index: i,
                row: row_of(i),
                col: col_of(i),
                revealed: row.revealed,
                letter: if row.revealed { row.letter.clone() } else { None },
                locked: row.locked,
                topics_used: row.topics_used.0.clone(),
                revealed_by: row.revealed_by,
            })
        })
        .collect::<Result<_, _>>()?;

    let (name, score, grid_id) = if player_number == 1 {
        (
            session.player1_name.clone(),
            session.player1_score,
            session.player1_grid_id,
        )
    } else {
        (
            session.player2_name.clone(),
            session.player2_score,
            session.player2_grid_id,
        )
    };
    let completed = cells.iter().all(|c| c.revealed);
    Ok(PlayerSnapshot {
        player_number,
        name,
        score,
        grid_id,
        completed,
        cells,
    })
}

fn assemble_last_event(event: &event_logs::Model) -> Result<LastEvent, DomainError> {
    let payload = EventPayload::from_json(&event.event_data)?;
    Ok(LastEvent {
        event_type: event.event_type,
        result: payload.result().map(str::to_string),
        message: Some(payload.message(event.player_number)),
    })
}
