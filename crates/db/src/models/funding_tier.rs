//! Funding tier model and DTOs.

use paperfans_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `funding_tiers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingTier {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub amount: i64,
    pub benefits: Vec<String>,
    pub max_backers: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tier under a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFundingTier {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: i64,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub max_backers: Option<i32>,
}
