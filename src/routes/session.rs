use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::dto::session_dto::{
    HistoryQuery, HistoryResponse, SessionResponse, StatsResponse, SubmitQuizPayload,
    SubmitQuizResponse,
};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::AppState;

/// Completes a quiz: reloads the category's questions, scores the
/// submitted selections against them, and records the session.
#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;

    let questions = state
        .question_service
        .questions_by_category(&payload.category)
        .await;
    if questions.is_empty() {
        return Err(Error::NotFound(format!(
            "No questions found for category '{}'",
            payload.category
        )));
    }

    let (session, score) = state
        .session_service
        .complete_quiz(
            user_id,
            &payload.category,
            &questions,
            &payload.selections,
            payload.time_spent_seconds,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitQuizResponse::new(session, score)),
    ))
}

#[axum::debug_handler]
pub async fn history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let sessions = state
        .session_service
        .user_sessions(user_id, query.category.as_deref())
        .await;
    Ok(Json(HistoryResponse {
        items: sessions.into_iter().map(SessionResponse::from).collect(),
    }))
}

/// Dashboard stats for the caller; `null` until their first session.
#[axum::debug_handler]
pub async fn stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let stats = state.session_service.user_stats(user_id).await;
    Ok(Json(stats.map(StatsResponse::from)))
}
