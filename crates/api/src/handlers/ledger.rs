//! Handlers for the on-chain actions under `/ledger`.
//!
//! Each handler validates its payload, runs one CLI call through the shared
//! [`LedgerBridge`](paperfans_core::ledger::LedgerBridge) and returns the
//! scraped receipt. CLI failures surface as 500 with the CLI's own output.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use paperfans_core::error::CoreError;
use paperfans_core::ledger::operations::{
    CreateProposalRequest, DeployPaperRequest, MintRequest, PurchaseTokensRequest,
};
use paperfans_core::ledger::LedgerReceipt;
use paperfans_db::repositories::{ProjectRepo, UserProfileRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_owner, find_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Receipt of a ledger action plus the ids the caller usually wants next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerActionResponse {
    #[serde(flatten)]
    pub receipt: LedgerReceipt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    /// Caller's cached balance after a purchase, when they have a profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_balance: Option<i64>,
}

impl From<LedgerReceipt> for LedgerActionResponse {
    fn from(receipt: LedgerReceipt) -> Self {
        Self {
            receipt,
            proposal_id: None,
            paper_id: None,
            token_balance: None,
        }
    }
}

/// Log a bookkeeping write that failed after the chain call committed.
///
/// The receipt is still returned: an error here would invite a retry that
/// repeats the on-chain action.
fn log_unrecorded(receipt: &LedgerReceipt, step: &'static str, err: &sqlx::Error) {
    tracing::error!(
        step,
        digest = %receipt.transaction_digest,
        error = %err,
        "Ledger action succeeded but could not be recorded",
    );
}

/// POST /api/v1/ledger/mint
pub async fn mint(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MintRequest>,
) -> AppResult<impl IntoResponse> {
    let receipt = state.ledger.mint(&input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        recipient = %input.recipient,
        amount = input.amount,
        digest = %receipt.transaction_digest,
        "Stablecoin minted",
    );

    Ok(Json(DataResponse {
        data: LedgerActionResponse::from(receipt),
    }))
}

/// POST /api/v1/ledger/proposals
///
/// When `projectId` is given the caller must own that project, and the
/// first created object is stored on it as its proposal id.
pub async fn create_proposal(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProposalRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(project_id) = input.project_id {
        let project = find_project(&state.pool, project_id).await?;
        ensure_owner(&project, auth.user_id, "register it on-chain")?;
    }

    let receipt = state.ledger.create_proposal(&input).await?;
    let proposal_id = receipt.created(0).map(str::to_string);

    if let (Some(project_id), Some(object_id)) = (input.project_id, proposal_id.as_deref()) {
        let linked = ProjectRepo::set_proposal_object_id(&state.pool, project_id, object_id).await;
        match linked {
            Ok(Some(_)) => {}
            Ok(None) => tracing::warn!(
                project_id,
                proposal_id = object_id,
                digest = %receipt.transaction_digest,
                "Project vanished before its proposal could be linked",
            ),
            Err(err) => log_unrecorded(&receipt, "set_proposal_object_id", &err),
        }
    }

    tracing::info!(
        user_id = %auth.user_id,
        project_id = ?input.project_id,
        proposal_id = ?proposal_id,
        digest = %receipt.transaction_digest,
        "Research proposal created on-chain",
    );

    Ok(Json(DataResponse {
        data: LedgerActionResponse {
            proposal_id,
            ..receipt.into()
        },
    }))
}

/// POST /api/v1/ledger/papers
pub async fn deploy_paper(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeployPaperRequest>,
) -> AppResult<impl IntoResponse> {
    let receipt = state.ledger.deploy_paper(&input).await?;
    let paper_id = receipt.created(0).map(str::to_string);

    tracing::info!(
        user_id = %auth.user_id,
        symbol = %input.symbol,
        paper_id = ?paper_id,
        digest = %receipt.transaction_digest,
        "Paper token deployed",
    );

    Ok(Json(DataResponse {
        data: LedgerActionResponse {
            paper_id,
            ..receipt.into()
        },
    }))
}

/// POST /api/v1/ledger/purchases
///
/// On success the caller's cached token balance grows by `amount`.
pub async fn purchase_tokens(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PurchaseTokensRequest>,
) -> AppResult<impl IntoResponse> {
    let delta = i64::try_from(input.amount).map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "amount {} is too large",
            input.amount
        )))
    })?;

    let receipt = state.ledger.purchase_tokens(&input).await?;

    let token_balance =
        match UserProfileRepo::add_token_balance(&state.pool, auth.user_id, delta).await {
            Ok(profile) => profile.map(|p| p.token_balance),
            Err(err) => {
                log_unrecorded(&receipt, "add_token_balance", &err);
                None
            }
        };

    tracing::info!(
        user_id = %auth.user_id,
        paper_id = %input.paper_id,
        amount = input.amount,
        digest = %receipt.transaction_digest,
        "Paper tokens purchased",
    );

    Ok(Json(DataResponse {
        data: LedgerActionResponse {
            token_balance,
            paper_id: Some(input.paper_id.clone()),
            ..receipt.into()
        },
    }))
}
