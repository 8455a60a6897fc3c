use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    dedup_tags, validate_email, validate_full_name, CreateTrainer, Trainer, UpdateTrainer,
};

const TRAINER_COLUMNS: &str =
    "id, email, full_name, specializations, is_available, created_at, updated_at";

#[derive(Clone)]
pub struct TrainerService {
    db: PgPool,
}

impl TrainerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_trainer(&self, trainer_data: CreateTrainer) -> Result<Trainer, AppError> {
        let email = trainer_data.email.trim().to_lowercase();
        validate_email(&email).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_full_name(&trainer_data.full_name)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let trainer = sqlx::query_as::<_, Trainer>(&format!(
            "INSERT INTO trainers (email, full_name, specializations, is_available, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {TRAINER_COLUMNS}"
        ))
        .bind(&email)
        .bind(trainer_data.full_name.trim())
        .bind(dedup_tags(&trainer_data.specializations))
        .bind(trainer_data.is_available.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_insert(e, "A trainer with this email already exists"))?;

        tracing::info!("Onboarded trainer {}", trainer.id);
        Ok(trainer)
    }

    pub async fn get_trainer(&self, trainer_id: Uuid) -> Result<Option<Trainer>, AppError> {
        let trainer = sqlx::query_as::<_, Trainer>(&format!(
            "SELECT {TRAINER_COLUMNS} FROM trainers WHERE id = $1"
        ))
        .bind(trainer_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(trainer)
    }

    /// Trainers in onboarding order, which is also the matcher's scan order.
    pub async fn list_trainers(&self, available_only: bool) -> Result<Vec<Trainer>, AppError> {
        let mut query = format!("SELECT {TRAINER_COLUMNS} FROM trainers");
        if available_only {
            query.push_str(" WHERE is_available = TRUE");
        }
        query.push_str(" ORDER BY created_at ASC, id ASC");

        let trainers = sqlx::query_as::<_, Trainer>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(trainers)
    }

    pub async fn update_trainer(
        &self,
        trainer_id: Uuid,
        trainer_data: UpdateTrainer,
    ) -> Result<Trainer, AppError> {
        if let Some(name) = &trainer_data.full_name {
            validate_full_name(name).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        let specializations = trainer_data
            .specializations
            .as_deref()
            .map(dedup_tags);

        let trainer = sqlx::query_as::<_, Trainer>(&format!(
            "UPDATE trainers
             SET full_name = COALESCE($2, full_name),
                 specializations = COALESCE($3, specializations),
                 is_available = COALESCE($4, is_available),
                 updated_at = $5
             WHERE id = $1
             RETURNING {TRAINER_COLUMNS}"
        ))
        .bind(trainer_id)
        .bind(trainer_data.full_name.as_deref().map(str::trim))
        .bind(specializations)
        .bind(trainer_data.is_available)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Trainer"))?;

        Ok(trainer)
    }
}
