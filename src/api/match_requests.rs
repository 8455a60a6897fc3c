use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{MatchRequest, MatchRequestQuery, MatchRequestResponse, RespondToMatchRequest};
use crate::services::MatchRequestService;

#[derive(Clone)]
pub struct MatchRequestsAppState {
    pub match_request_service: MatchRequestService,
}

pub fn match_request_routes(db: PgPool) -> Router {
    let shared_state = MatchRequestsAppState {
        match_request_service: MatchRequestService::new(db),
    };

    Router::new()
        .route(
            "/members/:member_id/match-requests",
            post(create_match_request).get(list_member_requests),
        )
        .route("/match-requests/:request_id", get(get_match_request))
        .route("/match-requests/:request_id/respond", post(respond_to_request))
        .route("/trainers/:trainer_id/match-requests", get(list_trainer_requests))
        .with_state(shared_state)
}

/// Ask for a personal trainer
pub async fn create_match_request(
    State(state): State<MatchRequestsAppState>,
    Path(member_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MatchRequestResponse>), AppError> {
    let match_request = state.match_request_service.request_trainer(member_id).await?;
    let trainer_name = state
        .match_request_service
        .trainer_name(match_request.trainer_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MatchRequestResponse {
            match_request,
            trainer_name,
            success: true,
        }),
    ))
}

pub async fn list_member_requests(
    State(state): State<MatchRequestsAppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<MatchRequest>>, AppError> {
    let requests = state.match_request_service.list_for_member(member_id).await?;
    Ok(Json(requests))
}

pub async fn get_match_request(
    State(state): State<MatchRequestsAppState>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<MatchRequestResponse>, AppError> {
    let match_request = state
        .match_request_service
        .get_request(request_id)
        .await?
        .ok_or(AppError::NotFound("Match request"))?;
    let trainer_name = state
        .match_request_service
        .trainer_name(match_request.trainer_id)
        .await?;

    Ok(Json(MatchRequestResponse {
        match_request,
        trainer_name,
        success: true,
    }))
}

/// Trainer accepts or declines a pending request
pub async fn respond_to_request(
    State(state): State<MatchRequestsAppState>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<RespondToMatchRequest>,
) -> Result<Json<MatchRequest>, AppError> {
    let updated = state
        .match_request_service
        .respond(request_id, request.accept)
        .await?;
    Ok(Json(updated))
}

pub async fn list_trainer_requests(
    State(state): State<MatchRequestsAppState>,
    Path(trainer_id): Path<Uuid>,
    Query(query): Query<MatchRequestQuery>,
) -> Result<Json<Vec<MatchRequest>>, AppError> {
    let requests = state
        .match_request_service
        .list_for_trainer(trainer_id, query.status)
        .await?;
    Ok(Json(requests))
}
