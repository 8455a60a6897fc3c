//! Consecutive-visit streak shown on the member dashboard.
//!
//! Counting walks backward from today one calendar day at a time. The gym's
//! weekly rest day is stepped over without needing a record, so a closed day
//! never resets anyone's streak. Any other day without a present record ends
//! the count.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::AttendanceRecord;

/// A single day of attendance as the streak counter sees it.
pub trait StreakDay {
    /// Calendar date of the visit, `None` when the source date is unusable.
    ///
    /// Stored records always carry a date; text dates from imports are
    /// parsed (and bad ones dropped) before they reach the database.
    fn streak_date(&self) -> Option<NaiveDate>;

    /// Whether the member actually showed up.
    fn is_present(&self) -> bool;
}

impl StreakDay for AttendanceRecord {
    fn streak_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn is_present(&self) -> bool {
        self.status.is_present()
    }
}

/// Current streak as of `today`.
///
/// Records may arrive in any order; ones without a usable date are ignored.
/// Records dated after the cursor (future dates, rest-day visits, duplicates
/// of an already counted day) are passed over without affecting the count.
pub fn current_streak<R: StreakDay>(records: &[R], today: NaiveDate, rest_day: Weekday) -> u32 {
    let mut days: Vec<(NaiveDate, bool)> = records
        .iter()
        .filter_map(|record| record.streak_date().map(|date| (date, record.is_present())))
        .collect();

    // Most recent first
    days.sort_by(|a, b| b.0.cmp(&a.0));

    let mut cursor = today;
    let mut streak = 0;
    let mut remaining = days.into_iter().peekable();

    loop {
        while cursor.weekday() == rest_day {
            match cursor.pred_opt() {
                Some(previous) => cursor = previous,
                None => return streak,
            }
        }

        let Some(&(date, present)) = remaining.peek() else {
            break;
        };

        if date > cursor {
            remaining.next();
            continue;
        }

        if date < cursor || !present {
            break;
        }

        streak += 1;
        remaining.next();
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }

    streak
}
