use chrono::{Datelike, Duration, NaiveDate, Weekday};
use gym_coach::models::{AttendanceRecord, AttendanceStatus};
use gym_coach::services::attendance_streak::current_streak;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::MockDataGenerator;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn present(d: NaiveDate) -> AttendanceRecord {
    MockDataGenerator::attendance(d, AttendanceStatus::CheckedOut)
}

/// Records for the `n` most recent non-rest days ending at `today`.
fn consecutive_visits(today: NaiveDate, n: u32, rest_day: Weekday) -> Vec<AttendanceRecord> {
    let mut records = Vec::new();
    let mut cursor = today;
    while records.len() < n as usize {
        if cursor.weekday() != rest_day {
            records.push(present(cursor));
        }
        cursor = cursor - Duration::days(1);
    }
    records
}

#[test]
fn test_monday_through_wednesday() {
    let records = vec![
        present(date(2024, 3, 11)),
        present(date(2024, 3, 12)),
        present(date(2024, 3, 13)),
    ];
    assert_eq!(date(2024, 3, 13).weekday(), Weekday::Wed);

    assert_eq!(current_streak(&records, date(2024, 3, 13), Weekday::Sat), 3);
}

#[test]
fn test_friday_and_monday_with_sunday_missing() {
    // Saturday is the rest day, Sunday has no record
    let friday = date(2024, 3, 15);
    let monday = date(2024, 3, 18);
    assert_eq!(friday.weekday(), Weekday::Fri);
    assert_eq!(monday.weekday(), Weekday::Mon);

    let records = vec![present(friday), present(monday)];

    assert_eq!(current_streak(&records, monday, Weekday::Sat), 1);
}

#[test]
fn test_absent_yesterday_and_present_today() {
    let today = date(2024, 3, 14);
    let records = vec![
        MockDataGenerator::attendance(date(2024, 3, 13), AttendanceStatus::Absent),
        present(today),
    ];

    assert_eq!(current_streak(&records, today, Weekday::Sat), 1);
}

#[test]
fn test_empty_history() {
    let records: Vec<AttendanceRecord> = Vec::new();
    assert_eq!(current_streak(&records, date(2024, 3, 14), Weekday::Sat), 0);
}

#[test]
fn test_open_and_auto_closed_sessions_count() {
    let today = date(2024, 3, 14);
    let records = vec![
        MockDataGenerator::attendance(today, AttendanceStatus::CheckedIn),
        MockDataGenerator::attendance(date(2024, 3, 13), AttendanceStatus::AutoClosed),
    ];

    assert_eq!(current_streak(&records, today, Weekday::Sat), 2);
}

#[test]
fn test_streak_is_repeatable() {
    let today = date(2024, 3, 20);
    let records = consecutive_visits(today, 9, Weekday::Sat);

    let first = current_streak(&records, today, Weekday::Sat);
    let second = current_streak(&records, today, Weekday::Sat);

    assert_eq!(first, 9);
    assert_eq!(first, second);
}

fn weekday() -> impl Strategy<Value = Weekday> {
    prop::sample::select(vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ])
}

proptest! {
    #[test]
    fn consecutive_non_rest_days_give_their_count(
        offset in 0i64..3650,
        n in 0u32..40,
        rest_day in weekday(),
    ) {
        let today = date(2015, 1, 1) + Duration::days(offset);
        let records = consecutive_visits(today, n, rest_day);

        prop_assert_eq!(current_streak(&records, today, rest_day), n);
    }

    #[test]
    fn input_order_does_not_matter(
        offset in 0i64..3650,
        n in 0u32..20,
        seed in any::<u64>(),
    ) {
        let today = date(2015, 1, 1) + Duration::days(offset);
        let mut records = consecutive_visits(today, n, Weekday::Sat);
        let len = records.len();
        if len > 1 {
            records.rotate_left((seed as usize) % len);
            records.swap(0, len - 1);
        }

        prop_assert_eq!(current_streak(&records, today, Weekday::Sat), n);
    }
}
