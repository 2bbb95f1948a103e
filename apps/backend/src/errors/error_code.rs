//! Error codes for the FiveBy backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the FiveBy backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// General validation error
    ValidationError,

    // Resource not found
    /// Session not found
    SessionNotFound,
    /// Grid not found
    GridNotFound,

    // Turn-rule violations (409)
    /// Session is not in progress
    SessionNotInProgress,
    /// It is not this player's turn
    OutOfTurn,
    /// Cell is already revealed
    CellAlreadyRevealed,
    /// Cell is locked by a wrong guess
    CellLocked,
    /// All five cells of the word are already revealed
    WordAlreadyRevealed,
    /// A hidden cell of the word is locked
    WordLocked,
    /// Topic has already been used for this cell
    TopicAlreadyUsed,
    /// All five topics used for this cell
    TopicLimitReached,
    /// No pending question to answer
    NoPendingQuestion,

    // Transient service failures
    /// Fewer than two grids exist in the pool
    GridsUnavailable,
    /// Trivia generation is temporarily unavailable
    GenerationUnavailable,
    /// Too many ask requests in the window
    RateLimited,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Persisted state violates an engine invariant
    StateCorrupt,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::GridNotFound => "GRID_NOT_FOUND",
            ErrorCode::SessionNotInProgress => "SESSION_NOT_IN_PROGRESS",
            ErrorCode::OutOfTurn => "OUT_OF_TURN",
            ErrorCode::CellAlreadyRevealed => "CELL_ALREADY_REVEALED",
            ErrorCode::CellLocked => "CELL_LOCKED",
            ErrorCode::WordAlreadyRevealed => "WORD_ALREADY_REVEALED",
            ErrorCode::WordLocked => "WORD_LOCKED",
            ErrorCode::TopicAlreadyUsed => "TOPIC_ALREADY_USED",
            ErrorCode::TopicLimitReached => "TOPIC_LIMIT_REACHED",
            ErrorCode::NoPendingQuestion => "NO_PENDING_QUESTION",
            ErrorCode::GridsUnavailable => "GRIDS_UNAVAILABLE",
            ErrorCode::GenerationUnavailable => "GENERATION_UNAVAILABLE",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::StateCorrupt => "STATE_CORRUPT",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorCode> for &'static str {
    fn from(code: ErrorCode) -> Self {
        code.as_str()
    }
}
