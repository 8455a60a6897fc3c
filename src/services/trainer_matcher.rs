//! Trainer selection for new match requests.
//!
//! The matcher scores every trainer by how many of the member's goals their
//! specializations cover and keeps the first trainer with the highest score.
//! When nobody covers any goal the first trainer in the list is assigned, so a
//! member who asked for a trainer always gets one while any are available.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{dedup_tags, GoalTag, Trainer};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error("member has no fitness goals")]
    NoGoals,
    #[error("no trainer available")]
    NoTrainerAvailable,
}

/// Outcome of a match: the chosen trainer, the goals they cover and the
/// number of covered goals.
#[derive(Debug, Clone)]
pub struct TrainerMatch<'a> {
    pub trainer: &'a Trainer,
    /// Covered goals, in the member's goal order.
    pub matched: Vec<GoalTag>,
    pub score: u32,
}

/// Pick a trainer for `goals` from `trainers`, scanning in list order.
///
/// Repeated goals count once. Ties go to the earlier trainer.
pub fn match_trainer<'a>(
    goals: &[GoalTag],
    trainers: &'a [Trainer],
) -> Result<TrainerMatch<'a>, MatchError> {
    let wanted = dedup_tags(goals);
    if wanted.is_empty() {
        return Err(MatchError::NoGoals);
    }

    let mut best: Option<TrainerMatch<'a>> = None;

    for trainer in trainers {
        let offered: HashSet<GoalTag> = trainer.specializations.iter().copied().collect();
        let matched: Vec<GoalTag> = wanted
            .iter()
            .copied()
            .filter(|goal| offered.contains(goal))
            .collect();
        let score = matched.len() as u32;

        if best.as_ref().map_or(true, |current| score > current.score) {
            best = Some(TrainerMatch {
                trainer,
                matched,
                score,
            });
        }
    }

    let selected = best.ok_or(MatchError::NoTrainerAvailable)?;

    if selected.score == 0 {
        tracing::debug!(
            "No specialization overlap across {} trainers, falling back to {}",
            trainers.len(),
            selected.trainer.id
        );
    }

    Ok(selected)
}
