use anyhow::{anyhow, Result};
use std::collections::HashSet;

use super::GoalTag;

/// Contact email for a member or trainer; also their unique key.
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(anyhow!("Email cannot be empty"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(anyhow!("Invalid email format"));
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') {
        return Err(anyhow!("Invalid email format"));
    }

    if email.len() > 255 {
        return Err(anyhow!("Email cannot be longer than 255 characters"));
    }

    Ok(())
}

/// Full name validation
pub fn validate_full_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("Full name cannot be empty"));
    }

    if name.len() > 255 {
        return Err(anyhow!("Full name cannot be longer than 255 characters"));
    }

    Ok(())
}

/// A saved fitness profile needs at least one goal
pub fn validate_goals(goals: &[GoalTag]) -> Result<()> {
    if goals.is_empty() {
        return Err(anyhow!("At least one fitness goal is required"));
    }
    Ok(())
}

/// Drop repeated tags, keeping the first occurrence
pub fn dedup_tags(tags: &[GoalTag]) -> Vec<GoalTag> {
    let mut seen = HashSet::new();
    tags.iter().copied().filter(|tag| seen.insert(*tag)).collect()
}

/// Validate attendance history window
pub fn validate_window_days(days: i64) -> Result<()> {
    if !(1..=365).contains(&days) {
        return Err(anyhow!("days must be between 1 and 365"));
    }
    Ok(())
}
