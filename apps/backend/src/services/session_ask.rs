use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::engine::{self, cell_coords};
use crate::domain::events::{EventPayload, QuestionAskedPayload};
use crate::domain::snapshot::SessionSnapshot;
use crate::entities::cell_states::Topic;
use crate::errors::domain::DomainError;
use crate::repos;
use crate::services::session_snapshot;
use crate::trivia::TriviaGenerator;

/// Ask a trivia question at a cell. Costs one point, keeps the turn, and
/// reveals nothing.
///
/// Question generation runs after validation but before any mutation, so
/// a generator failure surfaces with no side effects to roll back.
pub async fn ask<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trivia: &dyn TriviaGenerator,
    session_id: Uuid,
    player_number: i16,
    cell_index: usize,
    topic: Topic,
) -> Result<SessionSnapshot, DomainError> {
    let session = repos::sessions::require_for_update(conn, session_id).await?;
    let mut ctx = repos::sessions::to_ctx(&session);
    let mut board = repos::cells::load_board_for_update(conn, session_id, player_number).await?;

    engine::validate_ask(&ctx, &board, player_number, cell_index, topic)?;

    let grid_id = if player_number == 1 {
        session.player1_grid_id
    } else {
        session.player2_grid_id
    };
    let grid = repos::grids::load_content(conn, grid_id).await?;
    let required_letter = grid.letter_at(cell_index);

    let prior_questions =
        repos::events::prior_questions_for_cell(conn, session_id, player_number, cell_index)
            .await?;
    let question = trivia
        .generate(topic, required_letter, cell_index, &prior_questions)
        .await?;

    engine::apply_ask(&mut ctx, &mut board, player_number, cell_index, topic)?;

    repos::cells::set_topics(
        conn,
        session_id,
        player_number,
        cell_index,
        board.cell(cell_index).topics_used.clone(),
    )
    .await?;
    let updated = repos::sessions::persist_action(conn, session_id, &ctx, None).await?;

    let (row, col) = cell_coords(cell_index);
    let payload = EventPayload::QuestionAsked(QuestionAskedPayload {
        cell_index,
        row,
        col,
        topic,
        question_text: question.question_text,
        answer: question.answer,
        acceptable_variants: question.acceptable_variants,
        generator: trivia.name().to_string(),
    });
    repos::events::append(conn, session_id, player_number, &payload).await?;

    session_snapshot::assemble(conn, &updated).await
}
