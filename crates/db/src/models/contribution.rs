//! Funding contribution model and DTOs.

use paperfans_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::project::Project;

/// A row from the `funding_contributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingContribution {
    pub id: DbId,
    pub project_id: DbId,
    pub tier_id: Option<DbId>,
    pub contributor_id: Option<UserId>,
    pub contributor_name: String,
    pub amount: i64,
    pub wallet_address: Option<String>,
    pub transaction_id: String,
    pub created_at: Timestamp,
}

/// DTO for funding a project.
///
/// `transactionId` is the on-chain digest when the client paid through its
/// wallet; when absent the server assigns an off-chain id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContribution {
    pub contributor_name: String,
    pub amount: i64,
    pub wallet_address: Option<String>,
    pub transaction_id: Option<String>,
    pub tier_id: Option<DbId>,
}

/// A recorded contribution together with the project's updated totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingReceipt {
    pub contribution: FundingContribution,
    pub project: Project,
}

/// Query parameters for `GET /projects/{id}/contributions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributionListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
