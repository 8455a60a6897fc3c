use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::attendance::attendance_routes;
use super::health::{health_check, readiness_check};
use super::match_requests::match_request_routes;
use super::members::member_routes;
use super::trainers::trainer_routes;
use crate::config::GymConfig;

pub fn create_routes(db: PgPool, gym: GymConfig) -> Router {
    let api_v1 = Router::new()
        .merge(member_routes(db.clone()))
        .merge(trainer_routes(db.clone()))
        .merge(match_request_routes(db.clone()))
        .merge(attendance_routes(db.clone(), gym));

    let health = Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(db);

    Router::new()
        .merge(health)
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
