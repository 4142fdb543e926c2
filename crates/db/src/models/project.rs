//! Project entity model and DTOs.

use paperfans_core::project::{ActivityEntry, ProjectFields, TimelinePhase};
use paperfans_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Funding window applied when a create request omits `daysLeft`.
pub const DEFAULT_DAYS_LEFT: i32 = 30;

fn default_days_left() -> i32 {
    DEFAULT_DAYS_LEFT
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub owner_id: UserId,
    pub title: String,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub category: String,
    pub author_name: String,
    pub author_institution: Option<String>,
    pub author_avatar_url: Option<String>,
    pub funding_goal: i64,
    pub current_funding: i64,
    pub backer_count: i32,
    pub days_left: i32,
    pub technical_approach: String,
    pub timeline: Json<Vec<TimelinePhase>>,
    pub recent_activity: Json<Vec<ActivityEntry>>,
    pub proposal_object_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owner comes from the bearer token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub category: String,
    pub author_name: String,
    pub author_institution: Option<String>,
    pub author_avatar_url: Option<String>,
    pub funding_goal: i64,
    #[serde(default = "default_days_left")]
    pub days_left: i32,
    pub technical_approach: String,
    #[serde(default)]
    pub timeline: Vec<TimelinePhase>,
}

impl CreateProject {
    pub fn fields(&self) -> ProjectFields<'_> {
        ProjectFields {
            title: &self.title,
            abstract_text: &self.abstract_text,
            category: &self.category,
            author_name: &self.author_name,
            technical_approach: &self.technical_approach,
            funding_goal: self.funding_goal,
            days_left: self.days_left,
            timeline: &self.timeline,
        }
    }
}

/// DTO for patching a project. All fields are optional; funding totals are
/// not patchable and only move through recorded contributions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub category: Option<String>,
    pub author_name: Option<String>,
    pub author_institution: Option<String>,
    pub author_avatar_url: Option<String>,
    pub funding_goal: Option<i64>,
    pub days_left: Option<i32>,
    pub technical_approach: Option<String>,
    pub timeline: Option<Vec<TimelinePhase>>,
}

impl UpdateProject {
    /// The record as it would look after applying this patch to `current`.
    pub fn merged_fields<'a>(&'a self, current: &'a Project) -> ProjectFields<'a> {
        ProjectFields {
            title: self.title.as_deref().unwrap_or(&current.title),
            abstract_text: self
                .abstract_text
                .as_deref()
                .unwrap_or(&current.abstract_text),
            category: self.category.as_deref().unwrap_or(&current.category),
            author_name: self.author_name.as_deref().unwrap_or(&current.author_name),
            technical_approach: self
                .technical_approach
                .as_deref()
                .unwrap_or(&current.technical_approach),
            funding_goal: self.funding_goal.unwrap_or(current.funding_goal),
            days_left: self.days_left.unwrap_or(current.days_left),
            timeline: self.timeline.as_deref().unwrap_or(&current.timeline.0),
        }
    }
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
