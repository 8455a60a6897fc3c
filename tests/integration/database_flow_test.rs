use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashSet;

use gym_coach::error::AppError;
use gym_coach::models::*;
use gym_coach::services::*;

use crate::common::{test_database, test_gym_config, MockDataGenerator};

#[tokio::test]
async fn test_match_request_lifecycle() {
    let Some(db) = test_database().await else {
        return;
    };

    let member_service = MemberService::new(db.clone());
    let trainer_service = TrainerService::new(db.clone());
    let match_service = MatchRequestService::new(db.clone());

    trainer_service
        .create_trainer(MockDataGenerator::create_trainer(vec![
            GoalTag::Mobility,
            GoalTag::Maintenance,
        ]))
        .await
        .unwrap();

    // Basic members are turned away
    let basic = member_service
        .create_member(MockDataGenerator::create_member(
            SubscriptionTier::Basic,
            vec![GoalTag::Mobility],
        ))
        .await
        .unwrap();
    assert_matches!(
        match_service.request_trainer(basic.id).await,
        Err(AppError::NotEligible(_))
    );

    // Premium member without goals has an incomplete profile
    let premium = member_service
        .create_member(MockDataGenerator::create_member(SubscriptionTier::Premium, vec![]))
        .await
        .unwrap();
    assert_matches!(
        match_service.request_trainer(premium.id).await,
        Err(AppError::IncompleteProfile)
    );

    // Saving goals opens the request automatically
    let premium = member_service
        .update_goals(premium.id, &[GoalTag::Mobility, GoalTag::Toning])
        .await
        .unwrap();
    let request = match_service
        .auto_request(&premium)
        .await
        .unwrap()
        .expect("eligible member should get a request");

    assert_eq!(request.status, MatchStatus::Pending);
    assert_eq!(request.goals, vec![GoalTag::Mobility, GoalTag::Toning]);

    let trainer = trainer_service
        .get_trainer(request.trainer_id)
        .await
        .unwrap()
        .unwrap();
    let offered: HashSet<GoalTag> = trainer.specializations.iter().copied().collect();
    let expected_score = request.goals.iter().filter(|g| offered.contains(g)).count();
    assert_eq!(request.match_score as usize, expected_score);
    assert_eq!(request.matched_specializations.len(), expected_score);

    // One active request per member
    assert_matches!(
        match_service.request_trainer(premium.id).await,
        Err(AppError::Conflict(_))
    );
    assert!(match_service.auto_request(&premium).await.unwrap().is_none());

    let accepted = match_service.respond(request.id, true).await.unwrap();
    assert_eq!(accepted.status, MatchStatus::Accepted);
    assert!(accepted.responded_at.is_some());

    assert_matches!(
        match_service.respond(request.id, false).await,
        Err(AppError::Conflict(_))
    );

    let history = match_service.list_for_member(premium.id).await.unwrap();
    assert_eq!(history.len(), 1);

    let queue = match_service
        .list_for_trainer(request.trainer_id, Some(MatchStatus::Accepted))
        .await
        .unwrap();
    assert!(queue.iter().any(|r| r.id == request.id));
}

#[tokio::test]
async fn test_rejected_request_frees_member_for_another() {
    let Some(db) = test_database().await else {
        return;
    };

    let member_service = MemberService::new(db.clone());
    let trainer_service = TrainerService::new(db.clone());
    let match_service = MatchRequestService::new(db.clone());

    trainer_service
        .create_trainer(MockDataGenerator::create_trainer(vec![GoalTag::Conditioning]))
        .await
        .unwrap();

    let member = member_service
        .create_member(MockDataGenerator::create_member(
            SubscriptionTier::Elite,
            vec![GoalTag::Conditioning],
        ))
        .await
        .unwrap();

    let first = match_service.request_trainer(member.id).await.unwrap();
    match_service.respond(first.id, false).await.unwrap();

    let second = match_service.request_trainer(member.id).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(second.status, MatchStatus::Pending);
}

#[tokio::test]
async fn test_attendance_check_in_check_out_and_streak() {
    let Some(db) = test_database().await else {
        return;
    };

    let member_service = MemberService::new(db.clone());
    let attendance_service = AttendanceService::new(db.clone(), test_gym_config());

    let member = member_service
        .create_member(MockDataGenerator::create_member(
            SubscriptionTier::Basic,
            vec![GoalTag::Toning],
        ))
        .await
        .unwrap();

    // Wednesday
    let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
    let morning = today.and_time(NaiveTime::from_hms_opt(7, 0, 0).unwrap());

    let checked_in = attendance_service.record_visit(member.id, morning).await.unwrap();
    assert_eq!(checked_in.action, AttendanceAction::CheckedIn);
    assert_eq!(checked_in.record.status, AttendanceStatus::CheckedIn);

    let checked_out = attendance_service
        .record_visit(member.id, morning + Duration::minutes(75))
        .await
        .unwrap();
    assert_eq!(checked_out.action, AttendanceAction::CheckedOut);
    assert_eq!(checked_out.record.duration_minutes, Some(75));

    assert_matches!(
        attendance_service
            .record_visit(member.id, morning + Duration::hours(3))
            .await,
        Err(AppError::Conflict(_))
    );

    let rows = vec![
        ImportAttendanceRow {
            date: "2024-03-12".to_string(),
            status: None,
            check_in: NaiveTime::from_hms_opt(7, 0, 0),
            check_out: NaiveTime::from_hms_opt(8, 0, 0),
        },
        ImportAttendanceRow {
            date: "2024-03-11".to_string(),
            status: Some(AttendanceStatus::CheckedOut),
            check_in: None,
            check_out: None,
        },
        ImportAttendanceRow {
            date: "last tuesday".to_string(),
            status: None,
            check_in: None,
            check_out: None,
        },
        ImportAttendanceRow {
            date: "2024-03-13".to_string(),
            status: None,
            check_in: None,
            check_out: None,
        },
    ];

    let summary = attendance_service.import_history(member.id, rows).await.unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            imported: 2,
            skipped_invalid_date: 1,
            skipped_existing: 1,
        }
    );

    let streak = attendance_service.streak_summary(member.id, today).await.unwrap();
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.visits_in_window, 3);
    assert_eq!(streak.total_minutes_in_window, 135);
    assert_eq!(streak.last_visit, Some(today));

    // Marking Tuesday absent cuts the streak back to today
    let history = attendance_service
        .list_recent(member.id, today, Some(7))
        .await
        .unwrap();
    let tuesday = history
        .iter()
        .find(|r| r.date == NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
        .unwrap();
    let corrected = attendance_service
        .correct_record(
            tuesday.id,
            CorrectAttendance {
                status: Some(AttendanceStatus::Absent),
                check_in_time: None,
                check_out_time: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(corrected.duration_minutes, None);

    let streak = attendance_service.streak_summary(member.id, today).await.unwrap();
    assert_eq!(streak.current_streak, 1);
}

#[tokio::test]
async fn test_auto_close_stale_check_ins() {
    let Some(db) = test_database().await else {
        return;
    };

    let member_service = MemberService::new(db.clone());
    let attendance_service = AttendanceService::new(db.clone(), test_gym_config());

    let member = member_service
        .create_member(MockDataGenerator::create_member(SubscriptionTier::Basic, vec![]))
        .await
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    attendance_service
        .record_visit(member.id, day.and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap()))
        .await
        .unwrap();

    let closed = attendance_service
        .auto_close_stale(day + Duration::days(1))
        .await
        .unwrap();
    assert!(closed >= 1);

    let records = attendance_service
        .list_recent(member.id, day, Some(1))
        .await
        .unwrap();
    assert_eq!(records[0].status, AttendanceStatus::AutoClosed);
    assert_eq!(records[0].check_out_time, NaiveTime::from_hms_opt(22, 0, 0));
    assert_eq!(records[0].duration_minutes, Some(240));
}
