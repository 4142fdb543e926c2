pub mod health;
pub mod ledger;
pub mod profile;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{id}                                   get, update (owner)
/// /projects/{id}/tiers                             list, create (owner)
/// /projects/{id}/contributions                     list
/// /projects/{id}/fund                              fund (auth required)
///
/// /profile                                         get, upsert own profile
/// /users/{id}/profile                              public profile
///
/// /ledger/mint                                     mint stablecoin
/// /ledger/proposals                                create on-chain proposal
/// /ledger/papers                                   deploy paper token
/// /ledger/purchases                                purchase paper tokens
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .merge(profile::router())
        .nest("/ledger", ledger::router())
}
