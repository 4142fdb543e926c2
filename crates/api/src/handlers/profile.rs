//! Handlers for user profiles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use paperfans_core::error::CoreError;
use paperfans_core::profile::validate_profile;
use paperfans_core::types::UserId;
use paperfans_db::models::user_profile::UpsertUserProfile;
use paperfans_db::repositories::UserProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = UserProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("UserProfile", auth.user_id)))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
pub async fn upsert_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertUserProfile>,
) -> AppResult<impl IntoResponse> {
    validate_profile(
        &input.name,
        input.avatar_url.as_deref(),
        input.wallet_address.as_deref(),
        input.orcid_id.as_deref(),
    )?;

    let profile = UserProfileRepo::upsert(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = %auth.user_id, "Profile saved");

    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/users/{id}/profile
pub async fn get_public(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<impl IntoResponse> {
    let profile = UserProfileRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("UserProfile", user_id)))?;
    Ok(Json(DataResponse { data: profile }))
}
