use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::GymConfig;
use crate::error::AppError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, CheckInResponse, CorrectAttendance, ImportAttendance,
    ImportSummary, StreakResponse,
};
use crate::services::AttendanceService;

#[derive(Clone)]
pub struct AttendanceAppState {
    pub attendance_service: AttendanceService,
}

pub fn attendance_routes(db: PgPool, gym: GymConfig) -> Router {
    let shared_state = AttendanceAppState {
        attendance_service: AttendanceService::new(db, gym),
    };

    Router::new()
        .route(
            "/members/:member_id/attendance",
            post(record_visit).get(list_attendance),
        )
        .route("/members/:member_id/attendance/streak", get(get_streak))
        .route("/members/:member_id/attendance/import", post(import_attendance))
        .route("/attendance/:record_id", put(correct_attendance))
        .with_state(shared_state)
}

/// Check in, or check out if already checked in today
pub async fn record_visit(
    State(state): State<AttendanceAppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<CheckInResponse>, AppError> {
    let now = Local::now().naive_local();
    let response = state.attendance_service.record_visit(member_id, now).await?;
    Ok(Json(response))
}

pub async fn list_attendance(
    State(state): State<AttendanceAppState>,
    Path(member_id): Path<Uuid>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let today = Local::now().date_naive();
    let records = state
        .attendance_service
        .list_recent(member_id, today, query.days)
        .await?;
    Ok(Json(records))
}

/// Dashboard streak and recent totals
pub async fn get_streak(
    State(state): State<AttendanceAppState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<StreakResponse>, AppError> {
    let today = Local::now().date_naive();
    let summary = state.attendance_service.streak_summary(member_id, today).await?;
    Ok(Json(summary))
}

pub async fn import_attendance(
    State(state): State<AttendanceAppState>,
    Path(member_id): Path<Uuid>,
    Json(request): Json<ImportAttendance>,
) -> Result<Json<ImportSummary>, AppError> {
    let summary = state
        .attendance_service
        .import_history(member_id, request.rows)
        .await?;
    Ok(Json(summary))
}

/// Administrative correction of a single record
pub async fn correct_attendance(
    State(state): State<AttendanceAppState>,
    Path(record_id): Path<Uuid>,
    Json(request): Json<CorrectAttendance>,
) -> Result<Json<AttendanceRecord>, AppError> {
    let record = state
        .attendance_service
        .correct_record(record_id, request)
        .await?;
    Ok(Json(record))
}
