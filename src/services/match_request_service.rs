use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreateMatchRequest, MatchRequest, MatchStatus, Member};
use crate::services::trainer_matcher::match_trainer;
use crate::services::{MemberService, TrainerService};

const MATCH_REQUEST_COLUMNS: &str = "id, member_id, goals, subscription_tier, trainer_id, \
     matched_specializations, match_score, status, responded_at, created_at, updated_at";

const ACTIVE_REQUEST_CONFLICT: &str = "Member already has a pending or accepted trainer request";

#[derive(Clone)]
pub struct MatchRequestService {
    db: PgPool,
    member_service: MemberService,
    trainer_service: TrainerService,
}

impl MatchRequestService {
    pub fn new(db: PgPool) -> Self {
        Self {
            member_service: MemberService::new(db.clone()),
            trainer_service: TrainerService::new(db.clone()),
            db,
        }
    }

    /// Checks a member must pass before a trainer is matched, in the order
    /// they are reported.
    pub fn check_eligibility(member: &Member, has_active_request: bool) -> Result<(), AppError> {
        if !member.has_fitness_profile() {
            return Err(AppError::IncompleteProfile);
        }

        if !member.subscription_tier.includes_trainer() {
            return Err(AppError::NotEligible(
                "trainer matching requires a premium or elite subscription".to_string(),
            ));
        }

        if has_active_request {
            return Err(AppError::Conflict(ACTIVE_REQUEST_CONFLICT.to_string()));
        }

        Ok(())
    }

    /// Open a trainer request for the member and assign a trainer.
    pub async fn request_trainer(&self, member_id: Uuid) -> Result<MatchRequest, AppError> {
        let member = self.member_service.require_member(member_id).await?;
        self.create_for_member(&member).await
    }

    /// Open a request right after a profile update when the member qualifies.
    ///
    /// Missing trainers or an existing request are not errors here; the
    /// profile update itself already succeeded.
    pub async fn auto_request(&self, member: &Member) -> Result<Option<MatchRequest>, AppError> {
        if !member.has_fitness_profile() || !member.subscription_tier.includes_trainer() {
            return Ok(None);
        }

        automatic_outcome(member.id, self.create_for_member(member).await)
    }

    async fn create_for_member(&self, member: &Member) -> Result<MatchRequest, AppError> {
        let has_active_request = self.get_active_request(member.id).await?.is_some();
        Self::check_eligibility(member, has_active_request)?;

        let trainers = self.trainer_service.list_trainers(true).await?;
        let selected = match_trainer(&member.goals, &trainers)?;

        tracing::info!(
            "Matched member {} with trainer {} (score {})",
            member.id,
            selected.trainer.id,
            selected.score
        );

        self.insert(CreateMatchRequest {
            member_id: member.id,
            goals: member.goals.clone(),
            subscription_tier: member.subscription_tier,
            trainer_id: selected.trainer.id,
            matched_specializations: selected.matched,
            match_score: selected.score as i32,
        })
        .await
    }

    async fn insert(&self, request_data: CreateMatchRequest) -> Result<MatchRequest, AppError> {
        let request = sqlx::query_as::<_, MatchRequest>(&format!(
            "INSERT INTO match_requests (
                member_id, goals, subscription_tier, trainer_id,
                matched_specializations, match_score, status, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $7)
             RETURNING {MATCH_REQUEST_COLUMNS}"
        ))
        .bind(request_data.member_id)
        .bind(&request_data.goals)
        .bind(request_data.subscription_tier)
        .bind(request_data.trainer_id)
        .bind(&request_data.matched_specializations)
        .bind(request_data.match_score)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        // The partial unique index catches concurrent requests for the same member
        .map_err(|e| AppError::from_insert(e, ACTIVE_REQUEST_CONFLICT))?;

        Ok(request)
    }

    pub async fn get_active_request(&self, member_id: Uuid) -> Result<Option<MatchRequest>, AppError> {
        let request = sqlx::query_as::<_, MatchRequest>(&format!(
            "SELECT {MATCH_REQUEST_COLUMNS} FROM match_requests
             WHERE member_id = $1 AND status IN ('pending', 'accepted')
             LIMIT 1"
        ))
        .bind(member_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(request)
    }

    pub async fn get_request(&self, request_id: Uuid) -> Result<Option<MatchRequest>, AppError> {
        let request = sqlx::query_as::<_, MatchRequest>(&format!(
            "SELECT {MATCH_REQUEST_COLUMNS} FROM match_requests WHERE id = $1"
        ))
        .bind(request_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(request)
    }

    pub async fn list_for_member(&self, member_id: Uuid) -> Result<Vec<MatchRequest>, AppError> {
        self.member_service.require_member(member_id).await?;

        let requests = sqlx::query_as::<_, MatchRequest>(&format!(
            "SELECT {MATCH_REQUEST_COLUMNS} FROM match_requests
             WHERE member_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(member_id)
        .fetch_all(&self.db)
        .await?;

        Ok(requests)
    }

    pub async fn list_for_trainer(
        &self,
        trainer_id: Uuid,
        status: Option<MatchStatus>,
    ) -> Result<Vec<MatchRequest>, AppError> {
        if self.trainer_service.get_trainer(trainer_id).await?.is_none() {
            return Err(AppError::NotFound("Trainer"));
        }

        let requests = sqlx::query_as::<_, MatchRequest>(&format!(
            "SELECT {MATCH_REQUEST_COLUMNS} FROM match_requests
             WHERE trainer_id = $1 AND ($2::match_status IS NULL OR status = $2)
             ORDER BY created_at ASC"
        ))
        .bind(trainer_id)
        .bind(status)
        .fetch_all(&self.db)
        .await?;

        Ok(requests)
    }

    /// Trainer's answer to a pending request. Decided requests stay as they are.
    pub async fn respond(&self, request_id: Uuid, accept: bool) -> Result<MatchRequest, AppError> {
        let new_status = if accept {
            MatchStatus::Accepted
        } else {
            MatchStatus::Rejected
        };
        let now = Utc::now();

        let updated = sqlx::query_as::<_, MatchRequest>(&format!(
            "UPDATE match_requests
             SET status = $2, responded_at = $3, updated_at = $3
             WHERE id = $1 AND status = 'pending'
             RETURNING {MATCH_REQUEST_COLUMNS}"
        ))
        .bind(request_id)
        .bind(new_status)
        .bind(now)
        .fetch_optional(&self.db)
        .await?;

        match updated {
            Some(request) => {
                tracing::info!("Match request {} is now {}", request.id, request.status.as_str());
                Ok(request)
            }
            None => match self.get_request(request_id).await? {
                Some(existing) => Err(AppError::Conflict(format!(
                    "Match request was already {}",
                    existing.status.as_str()
                ))),
                None => Err(AppError::NotFound("Match request")),
            },
        }
    }

    pub async fn trainer_name(&self, trainer_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self
            .trainer_service
            .get_trainer(trainer_id)
            .await?
            .map(|trainer| trainer.full_name))
    }
}

/// An automatic request that cannot be opened right now is simply skipped.
fn automatic_outcome(
    member_id: Uuid,
    result: Result<MatchRequest, AppError>,
) -> Result<Option<MatchRequest>, AppError> {
    match result {
        Ok(request) => Ok(Some(request)),
        Err(AppError::Conflict(_)) => Ok(None),
        Err(AppError::NoTrainerAvailable) => {
            tracing::warn!(
                "No trainer available for automatic request of member {}",
                member_id
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
