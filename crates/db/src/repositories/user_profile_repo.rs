//! Repository for the `user_profiles` table.

use paperfans_core::types::UserId;
use sqlx::PgPool;

use crate::models::user_profile::{UpsertUserProfile, UserProfile};

const COLUMNS: &str =
    "id, name, avatar_url, wallet_address, orcid_id, token_balance, created_at, updated_at";

/// Provides profile lookups and upserts keyed by identity-provider user id.
pub struct UserProfileRepo;

impl UserProfileRepo {
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create the profile or replace its editable fields. The cached token
    /// balance is never touched here.
    pub async fn upsert(
        pool: &PgPool,
        id: UserId,
        input: &UpsertUserProfile,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (id, name, avatar_url, wallet_address, orcid_id)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                avatar_url = EXCLUDED.avatar_url,
                wallet_address = EXCLUDED.wallet_address,
                orcid_id = EXCLUDED.orcid_id,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.avatar_url)
            .bind(&input.wallet_address)
            .bind(&input.orcid_id)
            .fetch_one(pool)
            .await
    }

    /// Add `delta` to the cached token balance.
    ///
    /// Returns `None` if the user has no profile yet.
    pub async fn add_token_balance(
        pool: &PgPool,
        id: UserId,
        delta: i64,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET token_balance = token_balance + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }
}
