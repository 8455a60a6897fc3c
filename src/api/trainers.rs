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
use crate::models::{CreateTrainer, Trainer, TrainerQuery, UpdateTrainer};
use crate::services::TrainerService;

#[derive(Clone)]
pub struct TrainersAppState {
    pub trainer_service: TrainerService,
}

pub fn trainer_routes(db: PgPool) -> Router {
    let shared_state = TrainersAppState {
        trainer_service: TrainerService::new(db),
    };

    Router::new()
        .route("/trainers", post(create_trainer).get(list_trainers))
        .route("/trainers/:trainer_id", get(get_trainer).put(update_trainer))
        .with_state(shared_state)
}

/// Onboard a trainer
pub async fn create_trainer(
    State(state): State<TrainersAppState>,
    Json(request): Json<CreateTrainer>,
) -> Result<(StatusCode, Json<Trainer>), AppError> {
    let trainer = state.trainer_service.create_trainer(request).await?;
    Ok((StatusCode::CREATED, Json(trainer)))
}

pub async fn list_trainers(
    State(state): State<TrainersAppState>,
    Query(query): Query<TrainerQuery>,
) -> Result<Json<Vec<Trainer>>, AppError> {
    let trainers = state
        .trainer_service
        .list_trainers(query.available.unwrap_or(false))
        .await?;
    Ok(Json(trainers))
}

pub async fn get_trainer(
    State(state): State<TrainersAppState>,
    Path(trainer_id): Path<Uuid>,
) -> Result<Json<Trainer>, AppError> {
    let trainer = state
        .trainer_service
        .get_trainer(trainer_id)
        .await?
        .ok_or(AppError::NotFound("Trainer"))?;
    Ok(Json(trainer))
}

/// Update specializations or availability
pub async fn update_trainer(
    State(state): State<TrainersAppState>,
    Path(trainer_id): Path<Uuid>,
    Json(request): Json<UpdateTrainer>,
) -> Result<Json<Trainer>, AppError> {
    let trainer = state
        .trainer_service
        .update_trainer(trainer_id, request)
        .await?;
    Ok(Json(trainer))
}
