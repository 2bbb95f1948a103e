use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::domain::grid::GridContent;
use crate::domain::snapshot::SessionSnapshot;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos;
use crate::services::{session_answer, session_create};

async fn seeded_db() -> DatabaseConnection {
    // One pooled connection so every query sees the same in-memory db.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrate");
    for cells in ["ABCDEFGHIJKLMNOPQRSTUVWXY", "YXWVUTSRQPONMLKJIHGFEDCBA"] {
        let content = GridContent::from_cells(cells).expect("valid grid");
        repos::grids::add_grid(&db, &content)
            .await
            .expect("insert grid")
            .expect("grid is new");
    }
    db
}

async fn fresh_session(db: &DatabaseConnection) -> SessionSnapshot {
    session_create::create_session(db, None, None)
        .await
        .expect("create session")
}

#[tokio::test]
async fn out_of_turn_answer_reports_out_of_turn_not_no_pending_question() {
    let db = seeded_db().await;
    let session = fresh_session(&db).await;
    assert_eq!(session.current_turn, 1);

    let err = session_answer::answer(&db, session.session_id, 2, "Athens")
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::OutOfTurn, _)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn in_turn_answer_without_a_question_reports_no_pending_question() {
    let db = seeded_db().await;
    let session = fresh_session(&db).await;

    let err = session_answer::answer(&db, session.session_id, 1, "Athens")
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::NoPendingQuestion, _)),
        "got {err:?}"
    );
}
