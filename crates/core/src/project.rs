//! Research project rules: timeline shape, validation bounds and activity
//! entries.
//!
//! A project's timeline is an ordered list of phases, each claiming a share
//! of the funding goal. The summed phase amounts may never exceed the goal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a project title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum funding window in days.
pub const MAX_DAYS_LEFT: i32 = 365;

/// Maximum number of phases in a timeline.
pub const MAX_TIMELINE_PHASES: usize = 24;

/// Recent activity entries kept on a project row; older ones are dropped.
pub const MAX_RECENT_ACTIVITY: usize = 20;

/// Activity kind recorded when a contribution lands.
pub const ACTIVITY_FUNDED: &str = "funded";

/// Activity kind recorded when the project is registered on the ledger.
pub const ACTIVITY_PROPOSAL_CREATED: &str = "proposal_created";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One phase of a project's research timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhase {
    pub phase: String,
    #[serde(default)]
    pub description: String,
    pub duration_weeks: i32,
    pub amount: i64,
}

/// An entry in a project's recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    pub at: Timestamp,
}

impl ActivityEntry {
    /// Activity entry for a recorded contribution.
    pub fn funded(contributor_name: &str, amount: i64, at: Timestamp) -> Self {
        Self {
            kind: ACTIVITY_FUNDED.to_string(),
            message: format!("{contributor_name} backed this project"),
            amount: Some(amount),
            at,
        }
    }

    /// Activity entry for an on-chain proposal.
    pub fn proposal_created(object_id: &str, at: Timestamp) -> Self {
        Self {
            kind: ACTIVITY_PROPOSAL_CREATED.to_string(),
            message: format!("Proposal registered on-chain as {object_id}"),
            amount: None,
            at,
        }
    }
}

/// JSONPath selecting the entries kept after prepending a new one.
pub fn activity_window_path() -> String {
    format!("$[0 to {}]", MAX_RECENT_ACTIVITY - 1)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject empty or whitespace-only values for a required text field.
pub fn validate_required(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a project title: required and at most [`MAX_TITLE_LENGTH`] chars.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required(title, "title")?;
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// The funding goal must be strictly positive.
pub fn validate_funding_goal(goal: i64) -> Result<(), CoreError> {
    if goal <= 0 {
        return Err(CoreError::Validation(format!(
            "fundingGoal must be greater than 0, got {goal}"
        )));
    }
    Ok(())
}

pub fn validate_days_left(days: i32) -> Result<(), CoreError> {
    if !(0..=MAX_DAYS_LEFT).contains(&days) {
        return Err(CoreError::Validation(format!(
            "daysLeft must be between 0 and {MAX_DAYS_LEFT}, got {days}"
        )));
    }
    Ok(())
}

/// Sum of all phase amounts. Saturates rather than overflowing.
pub fn timeline_total(timeline: &[TimelinePhase]) -> i64 {
    timeline
        .iter()
        .fold(0i64, |acc, phase| acc.saturating_add(phase.amount))
}

/// Validate each timeline phase and the summed amount against `goal`.
pub fn validate_timeline(timeline: &[TimelinePhase], goal: i64) -> Result<(), CoreError> {
    if timeline.len() > MAX_TIMELINE_PHASES {
        return Err(CoreError::Validation(format!(
            "timeline may have at most {MAX_TIMELINE_PHASES} phases"
        )));
    }

    for (i, phase) in timeline.iter().enumerate() {
        if phase.phase.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "timeline[{i}].phase is required"
            )));
        }
        if phase.duration_weeks <= 0 {
            return Err(CoreError::Validation(format!(
                "timeline[{i}].durationWeeks must be greater than 0"
            )));
        }
        if phase.amount < 0 {
            return Err(CoreError::Validation(format!(
                "timeline[{i}].amount must not be negative"
            )));
        }
    }

    let total = timeline_total(timeline);
    if total > goal {
        return Err(CoreError::Validation(format!(
            "timeline amounts total {total}, which exceeds the funding goal of {goal}"
        )));
    }
    Ok(())
}

/// Fields a project must carry, borrowed from either a create payload or a
/// merged patch.
#[derive(Debug, Clone, Copy)]
pub struct ProjectFields<'a> {
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub category: &'a str,
    pub author_name: &'a str,
    pub technical_approach: &'a str,
    pub funding_goal: i64,
    pub days_left: i32,
    pub timeline: &'a [TimelinePhase],
}

/// Validate a full project record.
pub fn validate_project(fields: &ProjectFields<'_>) -> Result<(), CoreError> {
    validate_title(fields.title)?;
    validate_required(fields.abstract_text, "abstract")?;
    validate_required(fields.category, "category")?;
    validate_required(fields.author_name, "authorName")?;
    validate_required(fields.technical_approach, "technicalApproach")?;
    validate_funding_goal(fields.funding_goal)?;
    validate_days_left(fields.days_left)?;
    validate_timeline(fields.timeline, fields.funding_goal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
