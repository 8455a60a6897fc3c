use anyhow::{anyhow, Result};
use chrono::Weekday;
use std::env;

use super::{env_or, env_parse};

/// Gym operating rules used by attendance tracking.
#[derive(Debug, Clone)]
pub struct GymConfig {
    /// Weekly closing day; never breaks a streak.
    pub rest_day: Weekday,
    /// How far back attendance is loaded for streaks and summaries.
    pub attendance_window_days: i64,
    /// Session length stamped on check-ins that were never closed.
    pub max_session_minutes: i64,
    pub auto_close_cron: String,
}

impl Default for GymConfig {
    fn default() -> Self {
        Self {
            rest_day: Weekday::Sat,
            attendance_window_days: 60,
            max_session_minutes: 240,
            auto_close_cron: "0 5 0 * * *".to_string(),
        }
    }
}

impl GymConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let rest_day = match env::var("GYM_REST_DAY") {
            Ok(value) => parse_rest_day(&value)?,
            Err(_) => defaults.rest_day,
        };

        let mut attendance_window_days =
            env_parse("ATTENDANCE_WINDOW_DAYS", defaults.attendance_window_days);
        if !(1..=365).contains(&attendance_window_days) {
            attendance_window_days = defaults.attendance_window_days;
        }

        let mut max_session_minutes =
            env_parse("MAX_SESSION_MINUTES", defaults.max_session_minutes);
        if max_session_minutes <= 0 {
            max_session_minutes = defaults.max_session_minutes;
        }

        Ok(Self {
            rest_day,
            attendance_window_days,
            max_session_minutes,
            auto_close_cron: env_or("AUTO_CLOSE_CRON", &defaults.auto_close_cron),
        })
    }
}

/// Accepts full or abbreviated English day names in any case.
pub fn parse_rest_day(value: &str) -> Result<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| anyhow!("Invalid GYM_REST_DAY: {}", value))
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
