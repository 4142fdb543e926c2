//! Handlers for funding tiers and contributions, nested under
//! `/projects/{id}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use paperfans_core::error::CoreError;
use paperfans_core::funding::{validate_contribution, validate_tier};
use paperfans_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use paperfans_core::types::DbId;
use paperfans_db::models::contribution::{ContributionListParams, CreateContribution};
use paperfans_db::models::funding_tier::CreateFundingTier;
use paperfans_db::repositories::{ContributionRepo, FundingTierRepo, RecordOutcome};

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_owner, find_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/tiers
pub async fn list_tiers(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_project(&state.pool, project_id).await?;
    let tiers = FundingTierRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tiers }))
}

/// POST /api/v1/projects/{id}/tiers
pub async fn create_tier(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateFundingTier>,
) -> AppResult<impl IntoResponse> {
    let project = find_project(&state.pool, project_id).await?;
    ensure_owner(&project, auth.user_id, "add funding tiers")?;

    validate_tier(&input.name, input.amount, &input.benefits, input.max_backers)?;

    let tier = FundingTierRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(project_id, tier_id = tier.id, amount = tier.amount, "Funding tier created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tier })))
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/contributions
pub async fn list_contributions(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<ContributionListParams>,
) -> AppResult<impl IntoResponse> {
    find_project(&state.pool, project_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let contributions =
        ContributionRepo::list_by_project(&state.pool, project_id, limit, offset).await?;

    Ok(Json(DataResponse {
        data: contributions,
    }))
}

/// POST /api/v1/projects/{id}/fund
///
/// Records the contribution and moves the project's totals in one
/// transaction. Responds with the contribution and the updated project.
pub async fn fund(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateContribution>,
) -> AppResult<impl IntoResponse> {
    validate_contribution(
        &input.contributor_name,
        input.amount,
        input.wallet_address.as_deref(),
        input.transaction_id.as_deref(),
    )?;

    let outcome =
        ContributionRepo::record(&state.pool, project_id, Some(auth.user_id), &input).await?;

    match outcome {
        RecordOutcome::Recorded(receipt) => {
            tracing::info!(
                project_id,
                contribution_id = receipt.contribution.id,
                amount = receipt.contribution.amount,
                current_funding = receipt.project.current_funding,
                backer_count = receipt.project.backer_count,
                "Contribution recorded",
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
        }
        RecordOutcome::ProjectNotFound => {
            Err(AppError::Core(CoreError::not_found("Project", project_id)))
        }
        RecordOutcome::TierNotFound => Err(AppError::Core(CoreError::not_found(
            "FundingTier",
            input.tier_id.unwrap_or_default(),
        ))),
        RecordOutcome::TierFull { max_backers } => Err(AppError::Core(CoreError::Conflict(
            format!("This tier is full ({max_backers} backers)"),
        ))),
    }
}
