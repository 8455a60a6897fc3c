use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::{GoalTag, MatchRequest};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub subscription_tier: SubscriptionTier,
    pub goals: Vec<GoalTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn has_fitness_profile(&self) -> bool {
        !self.goals.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "subscription_tier", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Basic,
    Premium,
    Elite,
}

impl SubscriptionTier {
    /// Personal trainer matching is part of the premium and elite plans.
    pub fn includes_trainer(&self) -> bool {
        matches!(self, SubscriptionTier::Premium | SubscriptionTier::Elite)
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Basic
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMember {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub goals: Vec<GoalTag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateFitnessProfile {
    pub goals: Vec<GoalTag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSubscription {
    pub subscription_tier: SubscriptionTier,
}

#[derive(Debug, Serialize)]
pub struct FitnessProfileResponse {
    pub member: Member,
    pub match_request: Option<MatchRequest>,
    pub success: bool,
}
