use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::gym::weekday_name;
use crate::config::GymConfig;
use crate::error::AppError;
use crate::models::{
    auto_close_time, derived_duration, session_minutes, validate_window_days, AttendanceAction,
    AttendanceRecord, AttendanceStatus, CheckInResponse, CorrectAttendance, ImportAttendanceRow,
    ImportSummary, StreakResponse,
};
use crate::services::attendance_streak::current_streak;
use crate::services::MemberService;

const ATTENDANCE_COLUMNS: &str = "id, member_id, date, check_in_time, check_out_time, \
     duration_minutes, status, created_at, updated_at";

#[derive(Clone)]
pub struct AttendanceService {
    db: PgPool,
    member_service: MemberService,
    gym: GymConfig,
}

impl AttendanceService {
    pub fn new(db: PgPool, gym: GymConfig) -> Self {
        Self {
            member_service: MemberService::new(db.clone()),
            db,
            gym,
        }
    }

    /// Front-desk scan: the first scan of the day checks in, the second checks out.
    pub async fn record_visit(
        &self,
        member_id: Uuid,
        now: NaiveDateTime,
    ) -> Result<CheckInResponse, AppError> {
        self.member_service.require_member(member_id).await?;

        let today = now.date();
        let time = now.time();

        match self.get_record_for_date(member_id, today).await? {
            None => {
                let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
                    "INSERT INTO attendance_records (member_id, date, check_in_time, status, created_at, updated_at)
                     VALUES ($1, $2, $3, 'checked_in', $4, $4)
                     RETURNING {ATTENDANCE_COLUMNS}"
                ))
                .bind(member_id)
                .bind(today)
                .bind(time)
                .bind(Utc::now())
                .fetch_one(&self.db)
                .await
                .map_err(|e| AppError::from_insert(e, "Member already checked in today"))?;

                tracing::info!("Member {} checked in at {}", member_id, time);
                Ok(CheckInResponse {
                    action: AttendanceAction::CheckedIn,
                    record,
                    success: true,
                })
            }
            Some(existing) if existing.status == AttendanceStatus::CheckedIn => {
                let duration = existing
                    .check_in_time
                    .map(|check_in| session_minutes(check_in, time));

                let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
                    "UPDATE attendance_records
                     SET check_out_time = $2, duration_minutes = $3, status = 'checked_out', updated_at = $4
                     WHERE id = $1 AND status = 'checked_in'
                     RETURNING {ATTENDANCE_COLUMNS}"
                ))
                .bind(existing.id)
                .bind(time)
                .bind(duration)
                .bind(Utc::now())
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::Conflict("Member already checked out today".to_string()))?;

                tracing::info!(
                    "Member {} checked out after {} minutes",
                    member_id,
                    duration.unwrap_or(0)
                );
                Ok(CheckInResponse {
                    action: AttendanceAction::CheckedOut,
                    record,
                    success: true,
                })
            }
            Some(_) => Err(AppError::Conflict(
                "Attendance already closed for today".to_string(),
            )),
        }
    }

    async fn get_record_for_date(
        &self,
        member_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records WHERE member_id = $1 AND date = $2"
        ))
        .bind(member_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// Records from the last `days` days including today, newest first.
    pub async fn list_recent(
        &self,
        member_id: Uuid,
        today: NaiveDate,
        days: Option<i64>,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let days = days.unwrap_or(self.gym.attendance_window_days);
        validate_window_days(days).map_err(|e| AppError::Validation(e.to_string()))?;

        self.member_service.require_member(member_id).await?;
        self.fetch_window(member_id, today, days).await
    }

    async fn fetch_window(
        &self,
        member_id: Uuid,
        today: NaiveDate,
        days: i64,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let since = today - Duration::days(days - 1);

        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records
             WHERE member_id = $1 AND date >= $2 AND date <= $3
             ORDER BY date DESC"
        ))
        .bind(member_id)
        .bind(since)
        .bind(today)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    pub async fn streak_summary(
        &self,
        member_id: Uuid,
        today: NaiveDate,
    ) -> Result<StreakResponse, AppError> {
        self.member_service.require_member(member_id).await?;

        let window_days = self.gym.attendance_window_days;
        let records = self.fetch_window(member_id, today, window_days).await?;

        Ok(summarize(member_id, &records, today, &self.gym))
    }

    /// Administrative correction. Duration is re-derived from the resulting times.
    pub async fn correct_record(
        &self,
        record_id: Uuid,
        correction: CorrectAttendance,
    ) -> Result<AttendanceRecord, AppError> {
        let existing = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records WHERE id = $1"
        ))
        .bind(record_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Attendance record"))?;

        let status = correction.status.unwrap_or(existing.status);
        let check_in = correction.check_in_time.or(existing.check_in_time);
        let check_out = correction.check_out_time.or(existing.check_out_time);
        let duration = derived_duration(status, check_in, check_out);

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "UPDATE attendance_records
             SET status = $2, check_in_time = $3, check_out_time = $4, duration_minutes = $5, updated_at = $6
             WHERE id = $1
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(record_id)
        .bind(status)
        .bind(check_in)
        .bind(check_out)
        .bind(duration)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            "Corrected attendance {} for member {} on {}",
            record.id,
            record.member_id,
            record.date
        );
        Ok(record)
    }

    /// Load historical rows. Bad dates and already-recorded days are skipped.
    pub async fn import_history(
        &self,
        member_id: Uuid,
        rows: Vec<ImportAttendanceRow>,
    ) -> Result<ImportSummary, AppError> {
        self.member_service.require_member(member_id).await?;

        let mut summary = ImportSummary::default();
        let mut tx = self.db.begin().await?;
        let now = Utc::now();

        for row in rows {
            let Some(date) = row.parsed_date() else {
                tracing::warn!("Skipping attendance row with unparseable date {:?}", row.date);
                summary.skipped_invalid_date += 1;
                continue;
            };

            let status = row.status.unwrap_or(AttendanceStatus::CheckedOut);
            let duration = derived_duration(status, row.check_in, row.check_out);

            let result = sqlx::query(
                "INSERT INTO attendance_records
                    (member_id, date, check_in_time, check_out_time, duration_minutes, status, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                 ON CONFLICT (member_id, date) DO NOTHING",
            )
            .bind(member_id)
            .bind(date)
            .bind(row.check_in)
            .bind(row.check_out)
            .bind(duration)
            .bind(status)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                summary.skipped_existing += 1;
            } else {
                summary.imported += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Imported {} attendance rows for member {} ({} bad dates, {} existing)",
            summary.imported,
            member_id,
            summary.skipped_invalid_date,
            summary.skipped_existing
        );
        Ok(summary)
    }

    /// Close every check-in left open on a previous day.
    pub async fn auto_close_stale(&self, today: NaiveDate) -> Result<u64, AppError> {
        let stale = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records
             WHERE status = 'checked_in' AND date < $1"
        ))
        .bind(today)
        .fetch_all(&self.db)
        .await?;

        let mut closed = 0;
        for record in stale {
            let check_out = record
                .check_in_time
                .map(|check_in| auto_close_time(check_in, self.gym.max_session_minutes));
            let duration = record
                .check_in_time
                .zip(check_out)
                .map(|(check_in, check_out)| session_minutes(check_in, check_out));

            let result = sqlx::query(
                "UPDATE attendance_records
                 SET status = 'auto_closed', check_out_time = $2, duration_minutes = $3, updated_at = $4
                 WHERE id = $1 AND status = 'checked_in'",
            )
            .bind(record.id)
            .bind(check_out)
            .bind(duration)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

            closed += result.rows_affected();
        }

        if closed > 0 {
            tracing::info!("Auto-closed {} open check-ins before {}", closed, today);
        }
        Ok(closed)
    }
}

/// Dashboard numbers for the loaded attendance window.
pub fn summarize(
    member_id: Uuid,
    records: &[AttendanceRecord],
    today: NaiveDate,
    gym: &GymConfig,
) -> StreakResponse {
    let present: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.status.is_present())
        .collect();

    StreakResponse {
        member_id,
        current_streak: current_streak(records, today, gym.rest_day),
        rest_day: weekday_name(gym.rest_day).to_string(),
        window_days: gym.attendance_window_days,
        visits_in_window: present.len(),
        total_minutes_in_window: present
            .iter()
            .filter_map(|record| record.duration_minutes)
            .map(i64::from)
            .sum(),
        last_visit: present.iter().map(|record| record.date).max(),
        success: true,
    }
}
