use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub member_id: Uuid,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    CheckedIn,
    CheckedOut,
    AutoClosed,
    Absent,
}

impl AttendanceStatus {
    pub fn is_present(&self) -> bool {
        !matches!(self, AttendanceStatus::Absent)
    }
}

/// Whole minutes between check-in and check-out, never negative.
pub fn session_minutes(check_in: NaiveTime, check_out: NaiveTime) -> i32 {
    let minutes = (check_out - check_in).num_minutes();
    minutes.clamp(0, i32::MAX as i64) as i32
}

/// Stored duration for a record: absent days and open sessions have none.
pub fn derived_duration(
    status: AttendanceStatus,
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
) -> Option<i32> {
    match (status, check_in, check_out) {
        (AttendanceStatus::Absent, _, _) => None,
        (_, Some(check_in), Some(check_out)) => Some(session_minutes(check_in, check_out)),
        _ => None,
    }
}

/// Check-out stamped on a session nobody closed: check-in plus the maximum
/// session length, capped at the last second of the day.
pub fn auto_close_time(check_in: NaiveTime, max_session_minutes: i64) -> NaiveTime {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
    let (closed_at, wrapped_secs) =
        check_in.overflowing_add_signed(Duration::minutes(max_session_minutes.max(0)));

    if wrapped_secs != 0 {
        end_of_day
    } else {
        closed_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceAction {
    CheckedIn,
    CheckedOut,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub action: AttendanceAction,
    pub record: AttendanceRecord,
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectAttendance {
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
}

/// Historical row from a legacy front-desk export. Dates arrive as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportAttendanceRow {
    pub date: String,
    pub status: Option<AttendanceStatus>,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

impl ImportAttendanceRow {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportAttendance {
    pub rows: Vec<ImportAttendanceRow>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_invalid_date: usize,
    pub skipped_existing: usize,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub member_id: Uuid,
    pub current_streak: u32,
    pub rest_day: String,
    pub window_days: i64,
    pub visits_in_window: usize,
    pub total_minutes_in_window: i64,
    pub last_visit: Option<NaiveDate>,
    pub success: bool,
}
