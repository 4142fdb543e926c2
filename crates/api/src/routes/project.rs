//! Route definitions for projects and their funding.
//!
//! Mounted at `/projects` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{funding, project};
use crate::state::AppState;

/// Project routes.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PATCH  /{id}                  -> update
/// GET    /{id}/tiers            -> list_tiers
/// POST   /{id}/tiers            -> create_tier
/// GET    /{id}/contributions    -> list_contributions
/// POST   /{id}/fund             -> fund
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id).patch(project::update))
        .route(
            "/{id}/tiers",
            get(funding::list_tiers).post(funding::create_tier),
        )
        .route("/{id}/contributions", get(funding::list_contributions))
        .route("/{id}/fund", post(funding::fund))
}
