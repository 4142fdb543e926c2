//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use paperfans_core::error::CoreError;
use paperfans_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use paperfans_core::project::validate_project;
use paperfans_core::types::{DbId, UserId};
use paperfans_db::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};
use paperfans_db::repositories::{ProjectRepo, UpdateOutcome};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a project or fail with 404.
pub(crate) async fn find_project(pool: &PgPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))
}

/// Fail with 403 unless `user_id` owns `project`.
pub(crate) fn ensure_owner(
    project: &Project,
    user_id: UserId,
    action: &str,
) -> Result<(), CoreError> {
    if project.owner_id != user_id {
        return Err(CoreError::Forbidden(format!(
            "Only the project owner can {action}"
        )));
    }
    Ok(())
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let projects = ProjectRepo::list(&state.pool, category, limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_project(&input.fields())?;

    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        project_id = project.id,
        owner_id = %auth.user_id,
        funding_goal = project.funding_goal,
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = find_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/v1/projects/{id}
///
/// The patch is merged onto the locked row and the result re-validated, so
/// a goal cut below the timeline total is rejected even when another patch
/// lands concurrently.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let outcome = ProjectRepo::update(&state.pool, id, &input, |current| {
        ensure_owner(current, auth.user_id, "edit it")?;
        validate_project(&input.merged_fields(current))
    })
    .await?;

    match outcome {
        UpdateOutcome::Updated(project) => {
            tracing::info!(project_id = id, "Project updated");
            Ok(Json(DataResponse { data: project }))
        }
        UpdateOutcome::NotFound => Err(AppError::Core(CoreError::not_found("Project", id))),
        UpdateOutcome::Rejected(err) => Err(AppError::Core(err)),
    }
}
