use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::dto::quiz_dto::{
    CreateQuizPayload, QuizListResponse, QuizSummaryResponse, SeedResponse,
};
use crate::error::Result;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/quizzes",
    responses(
        (status = 200, description = "Every quiz with its question count", body = Json<QuizListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let quizzes = state.question_service.list_quizzes().await?;
    Ok(Json(QuizListResponse {
        items: quizzes.into_iter().map(QuizSummaryResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/quizzes",
    request_body = CreateQuizPayload,
    responses(
        (status = 201, description = "Quiz created or replaced", body = Json<QuizSummaryResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn save_quiz(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let summary = state.question_service.save_quiz(payload).await?;
    Ok((StatusCode::CREATED, Json(QuizSummaryResponse::from(summary))))
}

#[utoipa::path(
    delete,
    path = "/api/admin/quizzes/{id}",
    params(
        ("id" = String, Path, description = "Normalized quiz category id")
    ),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.question_service.delete_quiz(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/admin/seed",
    responses(
        (status = 200, description = "Built-in quizzes inserted, or nothing when questions already exist", body = Json<SeedResponse>)
    )
)]
#[axum::debug_handler]
pub async fn seed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let inserted = state.question_service.seed_sample_questions().await?;
    Ok(Json(SeedResponse { inserted }))
}
