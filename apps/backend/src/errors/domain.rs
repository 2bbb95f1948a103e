//! Domain-level error type used across services, repos, and the turn engine.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures from rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Persisted data violates an invariant the engine assumes
    /// (missing ledger row, wrong row count, malformed grid payload).
    /// Must never be coerced into a client-fixable 4xx.
    DataCorruption,
    DbUnavailable,
    Other(String),
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Grid,
}

/// Turn-rule violations. Each maps to a distinct error code in the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SessionNotInProgress,
    OutOfTurn,
    CellAlreadyRevealed,
    CellLocked,
    WordAlreadyRevealed,
    WordLocked,
    TopicAlreadyUsed,
    TopicLimitReached,
    NoPendingQuestion,
    GridsUnavailable,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation failure (malformed cell ref, bad letter, etc.)
    Validation(String),
    /// Turn-rule violation; the caller should re-fetch state and re-decide.
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms.
    NotFound(NotFoundKind, String),
    /// External dependency outage (trivia generation); safe to retry the
    /// whole action since no side effects were persisted.
    Unavailable(String),
    /// Infrastructure/operational failures.
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Unavailable(d) => write!(f, "unavailable: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    /// Shorthand for the state-corruption kind.
    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::DataCorruption, detail.into())
    }
}

// Adapter functions return DbErr; repos map to DomainError via this impl.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(detail) => {
                DomainError::infra(InfraErrorKind::DataCorruption, detail)
            }
            sea_orm::DbErr::ConnectionAcquire(_) => {
                DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string())
            }
            other => DomainError::infra(InfraErrorKind::Other("db".to_string()), other.to_string()),
        }
    }
}
