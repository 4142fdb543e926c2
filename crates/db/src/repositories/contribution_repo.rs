//! Repository for the `funding_contributions` table.
//!
//! Recording a contribution and moving the project's running totals happen
//! in one transaction. The totals move with an in-place increment, and the
//! project row lock taken by that `UPDATE` serialises concurrent funders of
//! the same project, which also makes the tier capacity check race-free.

use paperfans_core::funding::resolve_transaction_id;
use paperfans_core::project::{activity_window_path, ActivityEntry};
use paperfans_core::types::{DbId, UserId};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::contribution::{CreateContribution, FundingContribution, FundingReceipt};
use crate::models::project::Project;
use crate::repositories::project_repo::COLUMNS as PROJECT_COLUMNS;

const COLUMNS: &str = "id, project_id, tier_id, contributor_id, contributor_name, amount, \
    wallet_address, transaction_id, created_at";

/// Result of [`ContributionRepo::record`]. Each non-`Recorded` outcome rolls
/// the transaction back.
#[derive(Debug)]
pub enum RecordOutcome {
    Recorded(FundingReceipt),
    ProjectNotFound,
    TierNotFound,
    TierFull { max_backers: i32 },
}

/// Provides funding contribution operations.
pub struct ContributionRepo;

impl ContributionRepo {
    /// Record a contribution and bump the project's totals atomically.
    pub async fn record(
        pool: &PgPool,
        project_id: DbId,
        contributor_id: Option<UserId>,
        input: &CreateContribution,
    ) -> Result<RecordOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let entry = ActivityEntry::funded(&input.contributor_name, input.amount, chrono::Utc::now());
        let project_query = format!(
            "UPDATE projects SET
                current_funding = current_funding + $2,
                backer_count = backer_count + 1,
                recent_activity = jsonb_path_query_array(
                    jsonb_build_array($3::JSONB) || recent_activity, $4::JSONPATH),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        let Some(project) = sqlx::query_as::<_, Project>(&project_query)
            .bind(project_id)
            .bind(input.amount)
            .bind(Json(&entry))
            .bind(activity_window_path())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(RecordOutcome::ProjectNotFound);
        };

        if let Some(tier_id) = input.tier_id {
            let cap: Option<Option<i32>> = sqlx::query_scalar(
                "SELECT max_backers FROM funding_tiers WHERE id = $1 AND project_id = $2",
            )
            .bind(tier_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(max_backers) = cap else {
                return Ok(RecordOutcome::TierNotFound);
            };

            if let Some(max_backers) = max_backers {
                let backers: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM funding_contributions WHERE tier_id = $1",
                )
                .bind(tier_id)
                .fetch_one(&mut *tx)
                .await?;
                if backers >= i64::from(max_backers) {
                    tracing::debug!(project_id, tier_id, max_backers, "Tier at capacity");
                    return Ok(RecordOutcome::TierFull { max_backers });
                }
            }
        }

        let insert_query = format!(
            "INSERT INTO funding_contributions
                (project_id, tier_id, contributor_id, contributor_name, amount,
                 wallet_address, transaction_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let contribution = sqlx::query_as::<_, FundingContribution>(&insert_query)
            .bind(project_id)
            .bind(input.tier_id)
            .bind(contributor_id)
            .bind(input.contributor_name.trim())
            .bind(input.amount)
            .bind(&input.wallet_address)
            .bind(resolve_transaction_id(input.transaction_id.as_deref()))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(RecordOutcome::Recorded(FundingReceipt {
            contribution,
            project,
        }))
    }

    /// List a project's contributions, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FundingContribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM funding_contributions
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, FundingContribution>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Sum and count of a project's contributions, for reconciling the
    /// cached totals on the project row.
    pub async fn totals_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT, COUNT(*)
             FROM funding_contributions WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}
