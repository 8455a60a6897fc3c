use std::collections::HashSet;

use gym_coach::models::{GoalTag, Trainer};
use gym_coach::services::trainer_matcher::{match_trainer, MatchError};
use proptest::prelude::*;

use crate::common::MockDataGenerator;

fn goal_tag() -> impl Strategy<Value = GoalTag> {
    prop::sample::select(GoalTag::ALL.to_vec())
}

fn trainers_from(specializations: Vec<Vec<GoalTag>>) -> Vec<Trainer> {
    specializations
        .iter()
        .enumerate()
        .map(|(index, tags)| MockDataGenerator::trainer(&format!("trainer{}", index), tags))
        .collect()
}

fn overlap(goals: &[GoalTag], trainer: &Trainer) -> usize {
    let wanted: HashSet<GoalTag> = goals.iter().copied().collect();
    let offered: HashSet<GoalTag> = trainer.specializations.iter().copied().collect();
    wanted.intersection(&offered).count()
}

proptest! {
    #[test]
    fn matcher_is_deterministic(
        goals in prop::collection::vec(goal_tag(), 1..6),
        specializations in prop::collection::vec(prop::collection::vec(goal_tag(), 0..4), 1..8),
    ) {
        let trainers = trainers_from(specializations);

        let first = match_trainer(&goals, &trainers).unwrap();
        let second = match_trainer(&goals, &trainers).unwrap();

        prop_assert_eq!(first.trainer.id, second.trainer.id);
        prop_assert_eq!(first.score, second.score);
        prop_assert_eq!(first.matched, second.matched);
    }

    #[test]
    fn matcher_picks_a_maximal_overlap(
        goals in prop::collection::vec(goal_tag(), 1..6),
        specializations in prop::collection::vec(prop::collection::vec(goal_tag(), 0..4), 1..8),
    ) {
        let trainers = trainers_from(specializations);
        let result = match_trainer(&goals, &trainers).unwrap();

        prop_assert_eq!(result.score as usize, overlap(&goals, result.trainer));
        prop_assert_eq!(result.matched.len(), result.score as usize);

        let best = trainers.iter().map(|t| overlap(&goals, t)).max().unwrap_or(0);
        prop_assert_eq!(result.score as usize, best);

        // Nobody earlier in the list reaches the same score
        let position = trainers.iter().position(|t| t.id == result.trainer.id).unwrap();
        for earlier in &trainers[..position] {
            prop_assert!(overlap(&goals, earlier) < result.score as usize);
        }
    }

    #[test]
    fn matcher_falls_back_to_first_trainer_without_overlap(
        count in 1usize..6,
    ) {
        let trainers: Vec<Trainer> = (0..count)
            .map(|i| MockDataGenerator::trainer(&format!("mobility{}", i), &[GoalTag::Mobility]))
            .collect();

        let result = match_trainer(&[GoalTag::WeightLoss, GoalTag::Toning], &trainers).unwrap();

        prop_assert_eq!(result.trainer.id, trainers[0].id);
        prop_assert_eq!(result.score, 0);
        prop_assert!(result.matched.is_empty());
    }
}

#[test]
fn test_no_trainers_is_reported_not_panicked() {
    let result = match_trainer(&[GoalTag::Conditioning], &[]);
    assert!(matches!(result, Err(MatchError::NoTrainerAvailable)));
}

#[test]
fn test_matched_tags_follow_member_goal_order() {
    let trainers = vec![MockDataGenerator::trainer(
        "ana",
        &[GoalTag::Mobility, GoalTag::Conditioning, GoalTag::Toning],
    )];
    let goals = [GoalTag::Toning, GoalTag::Maintenance, GoalTag::Mobility];

    let result = match_trainer(&goals, &trainers).unwrap();

    assert_eq!(result.matched, vec![GoalTag::Toning, GoalTag::Mobility]);
}
