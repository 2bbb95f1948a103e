//! Typed event payloads for the append-only session log.
//!
//! One payload kind per event type, carried as a tagged union so both the
//! writer (services) and readers (snapshot assembly, pending-question
//! derivation) handle them type-safely.

use serde::{Deserialize, Serialize};

use crate::domain::board::{Direction, GRID_CELLS};
use crate::entities::cell_states::Topic;
use crate::entities::event_logs::EventType;
use crate::errors::domain::DomainError;

/// A cell made visible together with its resolved letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub cell_index: usize,
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAskedPayload {
    pub cell_index: usize,
    pub row: usize,
    pub col: usize,
    pub topic: Topic,
    pub question_text: String,
    pub answer: String,
    pub acceptable_variants: Vec<String>,
    /// Which generator produced the question, e.g. "stub_v1".
    pub generator: String,
}

impl QuestionAskedPayload {
    /// A stored ask must point at a real cell; anything else means the
    /// log is corrupt and must not reach the engine's grid lookups.
    pub fn check_bounds(&self) -> Result<(), DomainError> {
        if self.cell_index >= GRID_CELLS {
            return Err(DomainError::corrupt(format!(
                "question_asked payload references cell {}",
                self.cell_index
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnsweredPayload {
    pub cell_index: usize,
    pub row: usize,
    pub col: usize,
    pub topic: Topic,
    pub submitted_text: String,
    pub correct: bool,
    pub revealed_letter: Option<char>,
    /// Cell whose oldest lock was cleared by this correct answer.
    pub lock_cleared_cell_index: Option<usize>,
    pub auto_reveals: Vec<RevealedCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterGuessedPayload {
    pub cell_index: usize,
    pub row: usize,
    pub col: usize,
    pub guessed_letter: char,
    pub correct: bool,
    pub revealed_letter: Option<char>,
    pub score_delta: i32,
    pub opponent_score_delta: i32,
    /// Ascending cell indices of locks created by a wrong guess.
    pub locks_enqueued: Vec<usize>,
    pub auto_reveals: Vec<RevealedCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordGuessedPayload {
    pub direction: Direction,
    pub index: usize,
    pub guessed_word: String,
    pub correct: bool,
    /// Cells revealed directly by the guess, ascending by index.
    pub revealed_cells: Vec<RevealedCell>,
    pub score_delta: i32,
    pub opponent_score_delta: i32,
    pub locks_enqueued: Vec<usize>,
    pub auto_reveals: Vec<RevealedCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    QuestionAsked(QuestionAskedPayload),
    QuestionAnswered(QuestionAnsweredPayload),
    LetterGuessed(LetterGuessedPayload),
    WordGuessed(WordGuessedPayload),
}

impl EventPayload {
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::QuestionAsked(_) => EventType::QuestionAsked,
            EventPayload::QuestionAnswered(_) => EventType::QuestionAnswered,
            EventPayload::LetterGuessed(_) => EventType::LetterGuessed,
            EventPayload::WordGuessed(_) => EventType::WordGuessed,
        }
    }

    /// "correct" / "incorrect" for resolved actions, none for asks.
    pub fn result(&self) -> Option<&'static str> {
        let correct = match self {
            EventPayload::QuestionAsked(_) => return None,
            EventPayload::QuestionAnswered(p) => p.correct,
            EventPayload::LetterGuessed(p) => p.correct,
            EventPayload::WordGuessed(p) => p.correct,
        };
        Some(if correct { "correct" } else { "incorrect" })
    }

    /// Short human-readable line for the snapshot's `last_event`.
    pub fn message(&self, player_number: i16) -> String {
        match self {
            EventPayload::QuestionAsked(p) => format!(
                "Player {player_number} asked a {} question at r{}c{}",
                p.topic.as_str(),
                p.row,
                p.col
            ),
            EventPayload::QuestionAnswered(p) => format!(
                "Player {player_number} answered the r{}c{} question {}",
                p.row,
                p.col,
                if p.correct { "correctly" } else { "incorrectly" }
            ),
            EventPayload::LetterGuessed(p) => format!(
                "Player {player_number} guessed letter '{}' at r{}c{} ({})",
                p.guessed_letter,
                p.row,
                p.col,
                if p.correct { "correct" } else { "incorrect" }
            ),
            EventPayload::WordGuessed(p) => format!(
                "Player {player_number} guessed {} {} as \"{}\" ({})",
                p.direction.as_str(),
                p.index,
                p.guessed_word,
                if p.correct { "correct" } else { "incorrect" }
            ),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::corrupt(format!("event payload serialization: {e}")))
    }

    /// Stored payloads were written by this process; a parse failure
    /// means the log is corrupt, not that the client erred.
    pub fn from_json(value: &serde_json::Value) -> Result<EventPayload, DomainError> {
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::corrupt(format!("event payload deserialization: {e}")))
    }
}
