//! DTOs for the event_logs_sea adapter.

use uuid::Uuid;

use crate::entities::event_logs::EventType;

/// DTO for appending one event record.
#[derive(Debug, Clone)]
pub struct EventCreate {
    pub session_id: Uuid,
    pub player_number: i16,
    pub event_type: EventType,
    pub event_data: serde_json::Value,
}
