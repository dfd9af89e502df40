pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::routing::{delete, get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::services::{
    question_service::QuestionService, ranking_service::RankingService,
    session_service::SessionService, user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub question_service: QuestionService,
    pub session_service: SessionService,
    pub ranking_service: RankingService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let question_service = QuestionService::new(pool.clone());
        let session_service = SessionService::new(pool.clone());
        let ranking_service = RankingService::new(pool.clone());

        Self {
            pool,
            user_service,
            question_service,
            session_service,
            ranking_service,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/signup", post(routes::auth::sign_up))
        .route("/api/auth/login", post(routes::auth::login));

    let user_api = Router::new()
        .route("/api/me", get(routes::auth::me))
        .route("/api/categories", get(routes::quiz::list_categories))
        .route(
            "/api/categories/:category/questions",
            get(routes::quiz::questions_by_category),
        )
        .route("/api/quiz/submit", post(routes::session::submit_quiz))
        .route("/api/history", get(routes::session::history))
        .route("/api/stats", get(routes::session::stats))
        .route("/api/rankings", get(routes::ranking::rankings))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/quizzes",
            get(routes::admin::list_quizzes).post(routes::admin::save_quiz),
        )
        .route("/api/admin/quizzes/:id", delete(routes::admin::delete_quiz))
        .route("/api/admin/seed", post(routes::admin::seed))
        .layer(axum::middleware::from_fn(middleware::auth::require_admin));

    Router::new()
        .merge(public_api)
        .merge(user_api)
        .merge(admin_api)
        .with_state(state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
}
