use serde_json::json;

use crate::domain::board::Direction;
use crate::domain::events::{
    EventPayload, LetterGuessedPayload, QuestionAskedPayload, RevealedCell, WordGuessedPayload,
};
use crate::entities::cell_states::Topic;
use crate::entities::event_logs::EventType;
use crate::errors::domain::{DomainError, InfraErrorKind};

fn asked() -> EventPayload {
    EventPayload::QuestionAsked(QuestionAskedPayload {
        cell_index: 7,
        row: 1,
        col: 2,
        topic: Topic::CurrentAffairs,
        question_text: "Which city starts with H?".into(),
        answer: "Helsinki".into(),
        acceptable_variants: vec![],
        generator: "stub_v1".into(),
    })
}

#[test]
fn payloads_are_tagged_by_kind() {
    let value = asked().to_json().unwrap();
    assert_eq!(value["type"], "question_asked");
    assert_eq!(value["topic"], "Current Affairs");
    assert_eq!(value["cell_index"], 7);
}

#[test]
fn stored_payload_round_trips() {
    let original = EventPayload::WordGuessed(WordGuessedPayload {
        direction: Direction::Down,
        index: 3,
        guessed_word: "DINTX".into(),
        correct: false,
        revealed_cells: vec![],
        score_delta: -5,
        opponent_score_delta: 1,
        locks_enqueued: vec![3, 13],
        auto_reveals: vec![],
    });
    let value = original.to_json().unwrap();
    assert_eq!(value["type"], "word_guessed");
    assert_eq!(value["direction"], "down");
    let parsed = EventPayload::from_json(&value).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn event_type_matches_variant() {
    assert_eq!(asked().event_type(), EventType::QuestionAsked);
}

#[test]
fn result_is_none_for_asks_and_correctness_otherwise() {
    assert_eq!(asked().result(), None);
    let guess = EventPayload::LetterGuessed(LetterGuessedPayload {
        cell_index: 0,
        row: 0,
        col: 0,
        guessed_letter: 'Q',
        correct: false,
        revealed_letter: None,
        score_delta: -5,
        opponent_score_delta: 1,
        locks_enqueued: vec![0],
        auto_reveals: vec![],
    });
    assert_eq!(guess.result(), Some("incorrect"));
}

#[test]
fn message_names_the_acting_player() {
    let msg = asked().message(2);
    assert!(msg.contains("Player 2"));
    assert!(msg.contains("Current Affairs"));
    assert!(msg.contains("r1c2"));
}

#[test]
fn auto_reveals_serialize_with_letters() {
    let guess = EventPayload::LetterGuessed(LetterGuessedPayload {
        cell_index: 0,
        row: 0,
        col: 0,
        guessed_letter: 'A',
        correct: true,
        revealed_letter: Some('A'),
        score_delta: 0,
        opponent_score_delta: 0,
        locks_enqueued: vec![],
        auto_reveals: vec![RevealedCell {
            cell_index: 4,
            letter: 'E',
        }],
    });
    let value = guess.to_json().unwrap();
    assert_eq!(value["auto_reveals"][0]["cell_index"], 4);
    assert_eq!(value["auto_reveals"][0]["letter"], "E");
}

#[test]
fn malformed_stored_payload_is_a_corruption_error() {
    let err = EventPayload::from_json(&json!({"type": "mystery"})).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::DataCorruption, _)
    ));
}

#[test]
fn stored_ask_with_out_of_range_cell_is_a_corruption_error() {
    let EventPayload::QuestionAsked(mut payload) = asked() else {
        unreachable!()
    };
    payload.check_bounds().unwrap();
    payload.cell_index = 25;
    let err = payload.check_bounds().unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::DataCorruption, _)
    ));
}
