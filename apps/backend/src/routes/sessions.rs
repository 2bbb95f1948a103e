//! Session HTTP routes: creation, snapshot reads, and the five turn
//! actions. Every mutating handler runs inside a single transaction via
//! `with_txn`; the ask path is additionally rate limited per
//! (session, client address) before the transaction begins.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::domain::board::{self, check_player_number, Direction};
use crate::entities::cell_states::Topic;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateSessionRequest {
    player_1_name: Option<String>,
    player_2_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    player_number: i16,
    cell_index: Option<usize>,
    row: Option<usize>,
    col: Option<usize>,
    topic: String,
}

#[derive(Debug, Deserialize)]
struct AnswerRequest {
    player_number: i16,
    answer: String,
}

#[derive(Debug, Deserialize)]
struct GuessLetterRequest {
    player_number: i16,
    cell_index: Option<usize>,
    row: Option<usize>,
    col: Option<usize>,
    letter: String,
}

#[derive(Debug, Deserialize)]
struct GuessWordRequest {
    player_number: i16,
    direction: String,
    index: usize,
    word: String,
}

#[derive(Debug, Deserialize)]
struct SkipRequest {
    player_number: i16,
}

/// Exactly one of `cell_index` or `row`+`col` must be supplied.
fn resolve_cell(
    cell_index: Option<usize>,
    row: Option<usize>,
    col: Option<usize>,
) -> Result<usize, AppError> {
    match (cell_index, row, col) {
        (Some(index), None, None) => {
            board::check_cell_index(index)?;
            Ok(index)
        }
        (None, Some(row), Some(col)) => Ok(board::cell_index(row, col)?),
        _ => Err(AppError::validation(
            ErrorCode::ValidationError,
            "provide exactly one of cell_index or row and col",
        )),
    }
}

fn parse_letter(raw: &str) -> Result<char, AppError> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(AppError::validation(
            ErrorCode::ValidationError,
            "letter must be a single character",
        )),
    }
}

fn parse_topic(raw: &str) -> Result<Topic, AppError> {
    Topic::parse(raw).ok_or_else(|| {
        AppError::validation(ErrorCode::ValidationError, format!("unknown topic '{raw}'"))
    })
}

fn parse_direction(raw: &str) -> Result<Direction, AppError> {
    Direction::parse(raw).ok_or_else(|| {
        AppError::validation(
            ErrorCode::ValidationError,
            format!("direction must be 'across' or 'down', got '{raw}'"),
        )
    })
}

/// POST /api/sessions
async fn create_session(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
    body: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_create::create_session(
                txn,
                body.player_1_name,
                body.player_2_name,
            )
            .await?)
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(snapshot))
}

/// GET /api/sessions/{id}
async fn get_session(
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_snapshot::get_snapshot(txn, session_id).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/sessions/{id}/ask
async fn ask(
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
    body: web::Json<AskRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let body = body.into_inner();
    check_player_number(body.player_number)?;
    let cell_index = resolve_cell(body.cell_index, body.row, body.col)?;
    let topic = parse_topic(&body.topic)?;

    // Rejected requests never reach the transaction.
    let client_ip = http_req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    app_state
        .ask_limiter
        .check(session_id, client_ip.as_deref())
        .map_err(AppError::rate_limited)?;

    let trivia = app_state.trivia.clone();
    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_ask::ask(
                txn,
                trivia.as_ref(),
                session_id,
                body.player_number,
                cell_index,
                topic,
            )
            .await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/sessions/{id}/answer
async fn answer(
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
    body: web::Json<AnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let body = body.into_inner();
    check_player_number(body.player_number)?;

    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_answer::answer(
                txn,
                session_id,
                body.player_number,
                &body.answer,
            )
            .await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/sessions/{id}/guess-letter
async fn guess_letter(
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
    body: web::Json<GuessLetterRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let body = body.into_inner();
    check_player_number(body.player_number)?;
    let cell_index = resolve_cell(body.cell_index, body.row, body.col)?;
    let letter = parse_letter(&body.letter)?;

    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_guess::guess_letter(
                txn,
                session_id,
                body.player_number,
                cell_index,
                letter,
            )
            .await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/sessions/{id}/guess-word
async fn guess_word(
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
    body: web::Json<GuessWordRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let body = body.into_inner();
    check_player_number(body.player_number)?;
    let direction = parse_direction(&body.direction)?;

    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_guess::guess_word(
                txn,
                session_id,
                body.player_number,
                direction,
                body.index,
                &body.word,
            )
            .await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/sessions/{id}/skip
async fn skip(
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
    body: web::Json<SkipRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let body = body.into_inner();
    check_player_number(body.player_number)?;

    let snapshot = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(services::session_guess::skip(txn, session_id, body.player_number).await?)
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/sessions")
            .route(web::post().to(create_session)),
    );
    cfg.service(
        web::resource("/api/sessions/{id}").route(web::get().to(get_session)),
    );
    cfg.service(web::resource("/api/sessions/{id}/ask").route(web::post().to(ask)));
    cfg.service(web::resource("/api/sessions/{id}/answer").route(web::post().to(answer)));
    cfg.service(
        web::resource("/api/sessions/{id}/guess-letter").route(web::post().to(guess_letter)),
    );
    cfg.service(
        web::resource("/api/sessions/{id}/guess-word").route(web::post().to(guess_word)),
    );
    cfg.service(web::resource("/api/sessions/{id}/skip").route(web::post().to(skip)));
}
