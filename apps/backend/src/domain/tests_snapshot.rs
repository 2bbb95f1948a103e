use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::events::{EventPayload, LetterGuessedPayload};
use crate::domain::snapshot::SessionSnapshot;
use crate::entities::cell_states::{RevealedBy, Topic, TopicList};
use crate::entities::event_logs::EventType;
use crate::entities::sessions::SessionStatus;
use crate::entities::{cell_states, event_logs, sessions};
use crate::errors::domain::{DomainError, InfraErrorKind};

fn session_model(id: Uuid) -> sessions::Model {
    sessions::Model {
        id,
        status: SessionStatus::InProgress,
        current_turn: 2,
        player1_grid_id: 10,
        player2_grid_id: 11,
        player1_name: Some("Ada".into()),
        player2_name: None,
        player1_score: 99,
        player2_score: 101,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn hidden_cells(session_id: Uuid, player_number: i16) -> Vec<cell_states::Model> {
    (0..25)
        .map(|i| cell_states::Model {
            session_id,
            player_number,
            cell_index: i,
            revealed: false,
            locked: false,
            letter: None,
            revealed_by: None,
            topics_used: TopicList::default(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        })
        .collect()
}

#[test]
fn assembles_both_players_with_cell_coordinates() {
    let id = Uuid::new_v4();
    let session = session_model(id);
    let mut p1 = hidden_cells(id, 1);
    p1[7].revealed = true;
    p1[7].letter = Some("H".into());
    p1[7].revealed_by = Some(RevealedBy::Guess);
    p1[7].topics_used = TopicList(vec![Topic::History]);
    let p2 = hidden_cells(id, 2);

    let snapshot = SessionSnapshot::assemble(&session, &p1, &p2, None).unwrap();

    assert_eq!(snapshot.session_id, id);
    assert_eq!(snapshot.current_turn, 2);
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.players[0].score, 99);
    assert_eq!(snapshot.players[0].name.as_deref(), Some("Ada"));
    assert_eq!(snapshot.players[1].name, None);
    assert!(!snapshot.players[0].completed);

    let cell = &snapshot.players[0].cells[7];
    assert_eq!((cell.row, cell.col), (1, 2));
    assert_eq!(cell.letter.as_deref(), Some("H"));
    assert_eq!(cell.topics_used, vec![Topic::History]);
    assert!(snapshot.last_event.is_none());
}

#[test]
fn hidden_cells_never_expose_letters() {
    let id = Uuid::new_v4();
    let session = session_model(id);
    let mut p1 = hidden_cells(id, 1);
    // A letter on an unrevealed row must not leak into the snapshot.
    p1[3].letter = Some("D".into());
    let p2 = hidden_cells(id, 2);

    let snapshot = SessionSnapshot::assemble(&session, &p1, &p2, None).unwrap();
    assert_eq!(snapshot.players[0].cells[3].letter, None);
}

#[test]
fn completed_flag_tracks_full_reveal() {
    let id = Uuid::new_v4();
    let session = session_model(id);
    let mut p1 = hidden_cells(id, 1);
    for cell in &mut p1 {
        cell.revealed = true;
        cell.letter = Some("A".into());
        cell.revealed_by = Some(RevealedBy::Auto);
    }
    let p2 = hidden_cells(id, 2);

    let snapshot = SessionSnapshot::assemble(&session, &p1, &p2, None).unwrap();
    assert!(snapshot.players[0].completed);
    assert!(!snapshot.players[1].completed);
}

#[test]
fn last_event_carries_result_and_message() {
    let id = Uuid::new_v4();
    let session = session_model(id);
    let payload = EventPayload::LetterGuessed(LetterGuessedPayload {
        cell_index: 0,
        row: 0,
        col: 0,
        guessed_letter: 'Z',
        correct: false,
        revealed_letter: None,
        score_delta: -5,
        opponent_score_delta: 1,
        locks_enqueued: vec![0],
        auto_reveals: vec![],
    });
    let event = event_logs::Model {
        id: 1,
        session_id: id,
        player_number: 1,
        event_type: EventType::LetterGuessed,
        event_data: payload.to_json().unwrap(),
        created_at: OffsetDateTime::UNIX_EPOCH,
    };

    let snapshot = SessionSnapshot::assemble(
        &session,
        &hidden_cells(id, 1),
        &hidden_cells(id, 2),
        Some(&event),
    )
    .unwrap();

    let last = snapshot.last_event.unwrap();
    assert_eq!(last.event_type, EventType::LetterGuessed);
    assert_eq!(last.result.as_deref(), Some("incorrect"));
    assert!(last.message.unwrap().contains("Player 1"));
}

#[test]
fn wrong_row_count_is_a_corruption_error() {
    let id = Uuid::new_v4();
    let session = session_model(id);
    let mut p1 = hidden_cells(id, 1);
    p1.pop();
    let p2 = hidden_cells(id, 2);

    let err = SessionSnapshot::assemble(&session, &p1, &p2, None).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::DataCorruption, _)
    ));
}

#[test]
fn snapshot_serialization_is_deterministic() {
    let id = Uuid::new_v4();
    let session = session_model(id);
    let p1 = hidden_cells(id, 1);
    let p2 = hidden_cells(id, 2);

    let a = SessionSnapshot::assemble(&session, &p1, &p2, None).unwrap();
    let b = SessionSnapshot::assemble(&session, &p1, &p2, None).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
