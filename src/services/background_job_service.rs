use anyhow::{anyhow, Result};
use chrono::Local;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::services::AttendanceService;

/// Scheduled maintenance jobs.
pub struct BackgroundJobService {
    scheduler: JobScheduler,
    attendance_service: AttendanceService,
}

impl BackgroundJobService {
    pub async fn new(attendance_service: AttendanceService) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create job scheduler: {:?}", e))?;

        Ok(Self {
            scheduler,
            attendance_service,
        })
    }

    /// Register jobs and start the scheduler
    pub async fn start(&self, auto_close_cron: &str) -> Result<()> {
        self.add_auto_close_job(auto_close_cron).await?;

        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start job scheduler: {:?}", e))?;

        info!("Background job scheduler started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to stop job scheduler: {:?}", e))?;

        info!("Background job scheduler stopped");
        Ok(())
    }

    async fn add_auto_close_job(&self, cron: &str) -> Result<()> {
        let attendance_service = self.attendance_service.clone();

        let job = Job::new_async(cron, move |_uuid, _lock| {
            let attendance_service = attendance_service.clone();
            Box::pin(async move {
                let today = Local::now().date_naive();
                match attendance_service.auto_close_stale(today).await {
                    Ok(closed) => info!("Auto-close job finished, {} check-ins closed", closed),
                    Err(e) => error!("Auto-close job failed: {}", e),
                }
            })
        })
        .map_err(|e| anyhow!("Invalid auto-close schedule {:?}: {:?}", cron, e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to schedule auto-close job: {:?}", e))?;

        Ok(())
    }
}
