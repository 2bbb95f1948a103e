use actix_web::http::StatusCode;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;

fn mapped(err: DomainError) -> AppError {
    AppError::from(err)
}

#[test]
fn validation_maps_to_bad_request() {
    let app = mapped(DomainError::validation("cell_index out of range"));
    match app {
        AppError::BadRequest { code, .. } => assert_eq!(code, ErrorCode::ValidationError),
        other => panic!("unexpected mapping: {other:?}"),
    }
    assert_eq!(
        mapped(DomainError::validation("x")).status(),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn turn_rule_conflicts_map_to_409_with_distinct_codes() {
    let cases = [
        (ConflictKind::SessionNotInProgress, ErrorCode::SessionNotInProgress),
        (ConflictKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ConflictKind::CellAlreadyRevealed, ErrorCode::CellAlreadyRevealed),
        (ConflictKind::CellLocked, ErrorCode::CellLocked),
        (ConflictKind::WordAlreadyRevealed, ErrorCode::WordAlreadyRevealed),
        (ConflictKind::WordLocked, ErrorCode::WordLocked),
        (ConflictKind::TopicAlreadyUsed, ErrorCode::TopicAlreadyUsed),
        (ConflictKind::TopicLimitReached, ErrorCode::TopicLimitReached),
        (ConflictKind::NoPendingQuestion, ErrorCode::NoPendingQuestion),
    ];
    for (kind, expected) in cases {
        let app = mapped(DomainError::conflict(kind, "detail"));
        assert_eq!(app.status(), StatusCode::CONFLICT, "{kind:?}");
        match app {
            AppError::Conflict { code, .. } => assert_eq!(code, expected, "{kind:?}"),
            other => panic!("{kind:?} mapped to {other:?}"),
        }
    }
}

#[test]
fn grid_pool_exhaustion_is_503_not_409() {
    let app = mapped(DomainError::conflict(
        ConflictKind::GridsUnavailable,
        "only 1 grid in pool",
    ));
    assert_eq!(app.status(), StatusCode::SERVICE_UNAVAILABLE);
    match app {
        AppError::ServiceUnavailable { code, .. } => {
            assert_eq!(code, ErrorCode::GridsUnavailable)
        }
        other => panic!("unexpected mapping: {other:?}"),
    }
}

#[test]
fn not_found_kinds_map_to_404_codes() {
    match mapped(DomainError::not_found(NotFoundKind::Session, "s")) {
        AppError::NotFound { code, .. } => assert_eq!(code, ErrorCode::SessionNotFound),
        other => panic!("unexpected mapping: {other:?}"),
    }
    match mapped(DomainError::not_found(NotFoundKind::Grid, "g")) {
        AppError::NotFound { code, .. } => assert_eq!(code, ErrorCode::GridNotFound),
        other => panic!("unexpected mapping: {other:?}"),
    }
    assert_eq!(
        mapped(DomainError::not_found(NotFoundKind::Session, "s")).status(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn generation_outage_maps_to_503() {
    let app = mapped(DomainError::unavailable("generator attempts exhausted"));
    assert_eq!(app.status(), StatusCode::SERVICE_UNAVAILABLE);
    match app {
        AppError::ServiceUnavailable { code, .. } => {
            assert_eq!(code, ErrorCode::GenerationUnavailable)
        }
        other => panic!("unexpected mapping: {other:?}"),
    }
}

#[test]
fn data_corruption_maps_to_state_corrupt_500() {
    let app = mapped(DomainError::corrupt("expected 25 cell rows, found 24"));
    assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
    match app {
        AppError::StateCorrupt { detail } => {
            assert_eq!(detail, "expected 25 cell rows, found 24")
        }
        other => panic!("unexpected mapping: {other:?}"),
    }
}

#[test]
fn db_outage_maps_to_db_error() {
    let app = mapped(DomainError::infra(
        InfraErrorKind::DbUnavailable,
        "pool timed out",
    ));
    assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(app, AppError::Db { .. }));
}

#[test]
fn rate_limited_carries_retry_after() {
    let app = AppError::rate_limited(17);
    assert_eq!(app.status(), StatusCode::TOO_MANY_REQUESTS);
    match app {
        AppError::RateLimited {
            retry_after_seconds,
        } => assert_eq!(retry_after_seconds, 17),
        other => panic!("unexpected variant: {other:?}"),
    }
}
