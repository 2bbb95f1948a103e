//! DTOs for the sessions_sea adapter.

use uuid::Uuid;

use crate::entities::sessions::SessionStatus;

/// DTO for creating a session with its two grid assignments.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub id: Uuid,
    pub player1_grid_id: i64,
    pub player2_grid_id: i64,
    pub player1_name: Option<String>,
    pub player2_name: Option<String>,
    pub starting_score: i32,
}

/// DTO for persisting the fields an action mutates. Status is updated
/// only when the action completed the session.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub id: Uuid,
    pub current_turn: i16,
    pub player1_score: i32,
    pub player2_score: i32,
    pub status: Option<SessionStatus>,
}
