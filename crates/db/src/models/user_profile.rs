//! User profile model and DTOs.

use paperfans_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub wallet_address: Option<String>,
    pub orcid_id: Option<String>,
    /// Cached paper token balance; the ledger stays authoritative.
    pub token_balance: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing the caller's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserProfile {
    pub name: String,
    pub avatar_url: Option<String>,
    pub wallet_address: Option<String>,
    pub orcid_id: Option<String>,
}
