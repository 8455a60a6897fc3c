use anyhow::Result;
use chrono::{Duration, Local, NaiveTime};
use sqlx::PgPool;

use crate::config::GymConfig;
use crate::models::*;
use crate::services::*;

pub struct DatabaseSeeder {
    pool: PgPool,
    gym: GymConfig,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool, gym: GymConfig) -> Self {
        Self { pool, gym }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        self.seed_trainers().await?;
        self.seed_members().await?;
        self.seed_attendance().await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_trainers(&self) -> Result<()> {
        let trainer_service = TrainerService::new(self.pool.clone());

        if !trainer_service.list_trainers(false).await?.is_empty() {
            return Ok(());
        }

        let demo_trainers = vec![
            CreateTrainer {
                email: "maya.strength@example.com".to_string(),
                full_name: "Maya Okafor".to_string(),
                specializations: vec![GoalTag::MuscleBuilding, GoalTag::Toning],
                is_available: Some(true),
            },
            CreateTrainer {
                email: "leo.cardio@example.com".to_string(),
                full_name: "Leo Brandt".to_string(),
                specializations: vec![GoalTag::WeightLoss, GoalTag::Conditioning],
                is_available: Some(true),
            },
            CreateTrainer {
                email: "iris.mobility@example.com".to_string(),
                full_name: "Iris Tanaka".to_string(),
                specializations: vec![GoalTag::Mobility, GoalTag::Maintenance],
                is_available: Some(true),
            },
        ];

        for trainer_data in demo_trainers {
            trainer_service.create_trainer(trainer_data).await?;
        }
        tracing::info!("Created demo trainers");

        Ok(())
    }

    async fn seed_members(&self) -> Result<()> {
        let member_service = MemberService::new(self.pool.clone());
        let match_service = MatchRequestService::new(self.pool.clone());

        let demo_members = vec![
            CreateMember {
                email: "john.doe@example.com".to_string(),
                full_name: "John Doe".to_string(),
                subscription_tier: SubscriptionTier::Premium,
                goals: vec![GoalTag::WeightLoss, GoalTag::Toning],
            },
            CreateMember {
                email: "jane.smith@example.com".to_string(),
                full_name: "Jane Smith".to_string(),
                subscription_tier: SubscriptionTier::Basic,
                goals: vec![GoalTag::Mobility],
            },
        ];

        for member_data in demo_members {
            if member_service.get_member_by_email(&member_data.email).await?.is_some() {
                continue;
            }

            let member = member_service.create_member(member_data).await?;
            if let Some(request) = match_service.auto_request(&member).await? {
                tracing::info!("Created demo match request {}", request.id);
            }
        }

        Ok(())
    }

    async fn seed_attendance(&self) -> Result<()> {
        let member_service = MemberService::new(self.pool.clone());
        let attendance_service = AttendanceService::new(self.pool.clone(), self.gym.clone());

        let Some(member) = member_service.get_member_by_email("john.doe@example.com").await? else {
            return Ok(());
        };

        let today = Local::now().date_naive();
        let rows = (1..=14)
            .map(|days_ago| ImportAttendanceRow {
                date: (today - Duration::days(days_ago)).format("%Y-%m-%d").to_string(),
                status: Some(AttendanceStatus::CheckedOut),
                check_in: NaiveTime::from_hms_opt(6, 30, 0),
                check_out: NaiveTime::from_hms_opt(7, 45, 0),
            })
            .collect();

        let summary = attendance_service.import_history(member.id, rows).await?;
        tracing::info!("Seeded {} demo attendance records", summary.imported);

        Ok(())
    }
}
