use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    dedup_tags, validate_email, validate_full_name, validate_goals, CreateMember, GoalTag, Member,
    SubscriptionTier,
};

const MEMBER_COLUMNS: &str =
    "id, email, full_name, subscription_tier, goals, created_at, updated_at";

#[derive(Clone)]
pub struct MemberService {
    db: PgPool,
}

impl MemberService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_member(&self, member_data: CreateMember) -> Result<Member, AppError> {
        let email = member_data.email.trim().to_lowercase();
        validate_email(&email).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_full_name(&member_data.full_name)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let goals = dedup_tags(&member_data.goals);

        let member = sqlx::query_as::<_, Member>(&format!(
            "INSERT INTO members (email, full_name, subscription_tier, goals, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&email)
        .bind(member_data.full_name.trim())
        .bind(member_data.subscription_tier)
        .bind(&goals)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_insert(e, "A member with this email already exists"))?;

        tracing::info!("Created member {}", member.id);
        Ok(member)
    }

    pub async fn get_member(&self, member_id: Uuid) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(member_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(member)
    }

    pub async fn require_member(&self, member_id: Uuid) -> Result<Member, AppError> {
        self.get_member(member_id)
            .await?
            .ok_or(AppError::NotFound("Member"))
    }

    /// Replace the member's goal list. The order given is kept.
    pub async fn update_goals(&self, member_id: Uuid, goals: &[GoalTag]) -> Result<Member, AppError> {
        let goals = dedup_tags(goals);
        validate_goals(&goals).map_err(|e| AppError::Validation(e.to_string()))?;

        let member = sqlx::query_as::<_, Member>(&format!(
            "UPDATE members SET goals = $2, updated_at = $3 WHERE id = $1
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(member_id)
        .bind(&goals)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Member"))?;

        Ok(member)
    }

    pub async fn update_subscription(
        &self,
        member_id: Uuid,
        tier: SubscriptionTier,
    ) -> Result<Member, AppError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "UPDATE members SET subscription_tier = $2, updated_at = $3 WHERE id = $1
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(member_id)
        .bind(tier)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Member"))?;

        tracing::info!("Member {} moved to {:?} tier", member.id, tier);
        Ok(member)
    }

    pub async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1"
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.db)
        .await?;

        Ok(member)
    }
}
