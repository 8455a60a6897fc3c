use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::trainer_matcher::MatchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Fitness profile incomplete")]
    IncompleteProfile,
    #[error("Not eligible: {0}")]
    NotEligible(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("No trainer available")]
    NoTrainerAvailable,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::IncompleteProfile => (StatusCode::UNPROCESSABLE_ENTITY, "PROFILE_INCOMPLETE"),
            AppError::NotEligible(_) => (StatusCode::FORBIDDEN, "NOT_ELIGIBLE"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::NoTrainerAvailable => (StatusCode::NOT_FOUND, "NO_TRAINER_AVAILABLE"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Unique-constraint violations become conflicts; everything else stays a database error.
    pub fn from_insert(err: sqlx::Error, conflict_message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(conflict_message.to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NoGoals => AppError::IncompleteProfile,
            MatchError::NoTrainerAvailable => AppError::NoTrainerAvailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        // Don't leak driver details to clients
        let message = match &self {
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                "Database error".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error_code": error_code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
