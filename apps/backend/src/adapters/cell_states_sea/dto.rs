//! DTOs for the cell_states_sea adapter.

use uuid::Uuid;

use crate::entities::cell_states::{RevealedBy, TopicList};

/// Partial update for one ledger row. `None` means leave unchanged;
/// letter and revealed_by use a nested Option so they can be set to null.
#[derive(Debug, Clone, Default)]
pub struct CellUpdate {
    pub session_id: Uuid,
    pub player_number: i16,
    pub cell_index: i16,
    pub revealed: Option<bool>,
    pub locked: Option<bool>,
    pub letter: Option<Option<String>>,
    pub revealed_by: Option<Option<RevealedBy>>,
    pub topics_used: Option<TopicList>,
}

impl CellUpdate {
    pub fn new(session_id: Uuid, player_number: i16, cell_index: i16) -> Self {
        Self {
            session_id,
            player_number,
            cell_index,
            ..Default::default()
        }
    }

    pub fn reveal(mut self, letter: String, revealed_by: RevealedBy) -> Self {
        self.revealed = Some(true);
        self.letter = Some(Some(letter));
        self.revealed_by = Some(Some(revealed_by));
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn with_topics(mut self, topics: TopicList) -> Self {
        self.topics_used = Some(topics);
        self
    }
}
