use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    CreateMember, FitnessProfileResponse, Member, UpdateFitnessProfile, UpdateSubscription,
};
use crate::services::{MatchRequestService, MemberService};

#[derive(Clone)]
pub struct MembersAppState {
    pub member_service: MemberService,
    pub match_request_service: MatchRequestService,
}

pub fn member_routes(db: PgPool) -> Router {
    let shared_state = MembersAppState {
        member_service: MemberService::new(db.clone()),
        match_request_service: MatchRequestService::new(db),
    };

    Router::new()
        .route("/members", post(create_member))
        .route("/members/:member_id", get(get_member))
        .route("/members/:member_id/fitness-profile", put(update_fitness_profile))
        .route("/members/:member_id/subscription", put(update_subscription))
        .with_state(shared_state)
}

/// Register a new member
pub async fn create_member(
    State(state): State<MembersAppState>,
    Json(request): Json<CreateMember>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    let member = state.member_service.create_member(request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn get_member(
    State(state): State<MembersAppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Member>, AppError> {
    let member = state.member_service.require_member(member_id).await?;
    Ok(Json(member))
}

/// Save the member's goals and open a trainer request when they qualify
pub async fn update_fitness_profile(
    State(state): State<MembersAppState>,
    Path(member_id): Path<Uuid>,
    Json(request): Json<UpdateFitnessProfile>,
) -> Result<Json<FitnessProfileResponse>, AppError> {
    let member = state
        .member_service
        .update_goals(member_id, &request.goals)
        .await?;

    let match_request = state.match_request_service.auto_request(&member).await?;

    Ok(Json(FitnessProfileResponse {
        member,
        match_request,
        success: true,
    }))
}

/// Administrative tier change
pub async fn update_subscription(
    State(state): State<MembersAppState>,
    Path(member_id): Path<Uuid>,
    Json(request): Json<UpdateSubscription>,
) -> Result<Json<Member>, AppError> {
    let member = state
        .member_service
        .update_subscription(member_id, request.subscription_tier)
        .await?;
    Ok(Json(member))
}
