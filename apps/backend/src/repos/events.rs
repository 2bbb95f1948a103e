use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::event_logs_sea::{self, EventCreate};
use crate::domain::events::{EventPayload, QuestionAskedPayload};
use crate::entities::event_logs::{self, EventType};
use crate::errors::domain::DomainError;

pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    payload: &EventPayload,
) -> Result<event_logs::Model, DomainError> {
    let model = event_logs_sea::insert_event(
        conn,
        EventCreate {
            session_id,
            player_number,
            event_type: payload.event_type(),
            event_data: payload.to_json()?,
        },
    )
    .await?;
    Ok(model)
}

pub async fn latest<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
) -> Result<Option<event_logs::Model>, DomainError> {
    let model = event_logs_sea::find_latest(conn, session_id).await?;
    Ok(model)
}

/// Derive the player's pending question from the log: the most recent
/// question_asked strictly newer than their most recent question_answered.
pub async fn pending_question<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
) -> Result<Option<QuestionAskedPayload>, DomainError> {
    let asked = event_logs_sea::find_latest_of_type(
        conn,
        session_id,
        player_number,
        EventType::QuestionAsked,
    )
    .await?;
    let Some(asked) = asked else {
        return Ok(None);
    };

    let answered = event_logs_sea::find_latest_of_type(
        conn,
        session_id,
        player_number,
        EventType::QuestionAnswered,
    )
    .await?;
    if let Some(answered) = answered {
        if (answered.created_at, answered.id) >= (asked.created_at, asked.id) {
            return Ok(None);
        }
    }

    match EventPayload::from_json(&asked.event_data)? {
        EventPayload::QuestionAsked(payload) => {
            payload.check_bounds()?;
            Ok(Some(payload))
        }
        _ => Err(DomainError::corrupt(format!(
            "event {} typed question_asked carries a different payload",
            asked.id
        ))),
    }
}

/// Most recent question texts previously generated for one cell, oldest
/// first, capped so generator prompts stay bounded.
pub async fn prior_questions_for_cell<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: Uuid,
    player_number: i16,
    cell_index: usize,
) -> Result<Vec<String>, DomainError> {
    const MAX_PRIOR_QUESTIONS: usize = 10;

    let rows = event_logs_sea::find_all_of_type(
        conn,
        session_id,
        player_number,
        EventType::QuestionAsked,
    )
    .await?;
    let mut questions = Vec::new();
    for row in rows {
        if let EventPayload::QuestionAsked(payload) = EventPayload::from_json(&row.event_data)? {
            if payload.cell_index == cell_index {
                questions.push(payload.question_text);
            }
        }
    }
    if questions.len() > MAX_PRIOR_QUESTIONS {
        questions.drain(..questions.len() - MAX_PRIOR_QUESTIONS);
    }
    Ok(questions)
}
