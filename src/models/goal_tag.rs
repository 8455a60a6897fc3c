use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;

/// Fitness objective shared by member goals and trainer specializations.
///
/// Stored as the `goal_tag` Postgres enum; lists are `goal_tag[]` columns.
/// Request bodies accept loose spellings such as `"Muscle Building"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type)]
#[sqlx(type_name = "goal_tag", rename_all = "snake_case")]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum GoalTag {
    WeightLoss,
    MuscleBuilding,
    Toning,
    Conditioning,
    Mobility,
    Maintenance,
}

impl GoalTag {
    pub const ALL: [GoalTag; 6] = [
        GoalTag::WeightLoss,
        GoalTag::MuscleBuilding,
        GoalTag::Toning,
        GoalTag::Conditioning,
        GoalTag::Mobility,
        GoalTag::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalTag::WeightLoss => "weight_loss",
            GoalTag::MuscleBuilding => "muscle_building",
            GoalTag::Toning => "toning",
            GoalTag::Conditioning => "conditioning",
            GoalTag::Mobility => "mobility",
            GoalTag::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for GoalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        GoalTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| format!("Unknown goal tag: {}", s))
    }
}

impl TryFrom<String> for GoalTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl PgHasArrayType for GoalTag {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_goal_tag")
    }
}
