use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::{GoalTag, SubscriptionTier};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRequest {
    pub id: Uuid,
    pub member_id: Uuid,
    pub goals: Vec<GoalTag>,
    pub subscription_tier: SubscriptionTier,
    pub trainer_id: Uuid,
    pub matched_specializations: Vec<GoalTag>,
    pub match_score: i32,
    pub status: MatchStatus,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMatchRequest {
    pub member_id: Uuid,
    pub goals: Vec<GoalTag>,
    pub subscription_tier: SubscriptionTier,
    pub trainer_id: Uuid,
    pub matched_specializations: Vec<GoalTag>,
    pub match_score: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RespondToMatchRequest {
    pub accept: bool,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequestQuery {
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Serialize)]
pub struct MatchRequestResponse {
    pub match_request: MatchRequest,
    pub trainer_name: Option<String>,
    pub success: bool,
}
