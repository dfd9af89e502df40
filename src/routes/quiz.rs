use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::dto::quiz_dto::{CategoryListResponse, QuestionListResponse, QuestionResponse};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.question_service.list_categories().await;
    Ok(Json(CategoryListResponse { categories }))
}

#[axum::debug_handler]
pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse> {
    let questions = state.question_service.questions_by_category(&category).await;
    Ok(Json(QuestionListResponse {
        category,
        items: questions.into_iter().map(QuestionResponse::from).collect(),
    }))
}
