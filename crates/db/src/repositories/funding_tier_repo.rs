//! Repository for the `funding_tiers` table.

use paperfans_core::types::DbId;
use sqlx::PgPool;

use crate::models::funding_tier::{CreateFundingTier, FundingTier};

const COLUMNS: &str =
    "id, project_id, name, description, amount, benefits, max_backers, created_at, updated_at";

/// Provides CRUD operations for funding tiers.
pub struct FundingTierRepo;

impl FundingTierRepo {
    /// Insert a tier under `project_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateFundingTier,
    ) -> Result<FundingTier, sqlx::Error> {
        let query = format!(
            "INSERT INTO funding_tiers (project_id, name, description, amount, benefits, max_backers)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FundingTier>(&query)
            .bind(project_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.amount)
            .bind(&input.benefits)
            .bind(input.max_backers)
            .fetch_one(pool)
            .await
    }

    /// List a project's tiers, cheapest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<FundingTier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM funding_tiers WHERE project_id = $1 ORDER BY amount ASC, id ASC"
        );
        sqlx::query_as::<_, FundingTier>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
