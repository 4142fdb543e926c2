//! Route definitions for on-chain actions.
//!
//! Mounted at `/ledger` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::ledger;
use crate::state::AppState;

/// Ledger routes. All require authentication.
///
/// ```text
/// POST   /mint                  -> mint
/// POST   /proposals             -> create_proposal
/// POST   /papers                -> deploy_paper
/// POST   /purchases             -> purchase_tokens
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mint", post(ledger::mint))
        .route("/proposals", post(ledger::create_proposal))
        .route("/papers", post(ledger::deploy_paper))
        .route("/purchases", post(ledger::purchase_tokens))
}
