use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginPayload, SignUpPayload, UserResponse};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::utils::token::issue_token;
use crate::AppState;

#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.sign_up(payload).await?;
    let token = issue_token(user.id, &user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;
    let token = issue_token(user.id, &user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// The caller's current record, with totals as stored right now.
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let user = state.user_service.get_by_id(user_id).await?;
    Ok(Json(UserResponse::from(user)))
}
