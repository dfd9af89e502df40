use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::dto::ranking_dto::{RankingListResponse, RankingQuery, RankingRowResponse};
use crate::error::Result;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(
        ("order" = Option<String>, Query, description = "Ranking order: points (default) or questions")
    ),
    responses(
        (status = 200, description = "Aggregated ranking rows", body = Json<RankingListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<impl IntoResponse> {
    let order = query.order.unwrap_or_default();
    let rows = state.ranking_service.rankings(order).await;
    Ok(Json(RankingListResponse {
        order,
        items: rows.into_iter().map(RankingRowResponse::from).collect(),
    }))
}
