//! Route definitions for user profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes, merged at the `/api/v1` root.
///
/// ```text
/// GET    /profile               -> get_me
/// PUT    /profile               -> upsert_me
/// GET    /users/{id}/profile    -> get_public
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::get_me).put(profile::upsert_me))
        .route("/users/{id}/profile", get(profile::get_public))
}
