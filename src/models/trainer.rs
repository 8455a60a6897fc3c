use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::GoalTag;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trainer {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub specializations: Vec<GoalTag>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTrainer {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub specializations: Vec<GoalTag>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTrainer {
    pub full_name: Option<String>,
    pub specializations: Option<Vec<GoalTag>>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct TrainerQuery {
    pub available: Option<bool>,
}
