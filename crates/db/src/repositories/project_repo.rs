//! Repository for the `projects` table.

use paperfans_core::error::CoreError;
use paperfans_core::project::{activity_window_path, ActivityEntry};
use paperfans_core::types::{DbId, UserId};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, owner_id, title, abstract, category, author_name, \
    author_institution, author_avatar_url, funding_goal, current_funding, backer_count, \
    days_left, technical_approach, timeline, recent_activity, proposal_object_id, \
    created_at, updated_at";

/// Result of [`ProjectRepo::update`]. Anything but `Updated` rolls back.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Project),
    NotFound,
    /// The caller's check refused the patch against the locked row.
    Rejected(CoreError),
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: UserId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, title, abstract, category, author_name,
                author_institution, author_avatar_url, funding_goal, days_left,
                technical_approach, timeline)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(input.title.trim())
            .bind(&input.abstract_text)
            .bind(input.category.trim())
            .bind(&input.author_name)
            .bind(&input.author_institution)
            .bind(&input.author_avatar_url)
            .bind(input.funding_goal)
            .bind(input.days_left)
            .bind(&input.technical_approach)
            .bind(Json(&input.timeline))
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects, newest first, optionally filtered by category.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR category = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Patch a project under a row lock.
    ///
    /// The current row is read with `FOR UPDATE` and handed to `check`
    /// before anything is written, so the check sees the same record the
    /// patch is applied to. Only non-`None` fields in `input` are applied.
    pub async fn update<F>(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        check: F,
    ) -> Result<UpdateOutcome, sqlx::Error>
    where
        F: FnOnce(&Project) -> Result<(), CoreError>,
    {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Project>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(UpdateOutcome::NotFound);
        };

        if let Err(err) = check(&current) {
            return Ok(UpdateOutcome::Rejected(err));
        }

        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                abstract = COALESCE($3, abstract),
                category = COALESCE($4, category),
                author_name = COALESCE($5, author_name),
                author_institution = COALESCE($6, author_institution),
                author_avatar_url = COALESCE($7, author_avatar_url),
                funding_goal = COALESCE($8, funding_goal),
                days_left = COALESCE($9, days_left),
                technical_approach = COALESCE($10, technical_approach),
                timeline = COALESCE($11, timeline),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.abstract_text)
            .bind(input.category.as_deref().map(str::trim))
            .bind(&input.author_name)
            .bind(&input.author_institution)
            .bind(&input.author_avatar_url)
            .bind(input.funding_goal)
            .bind(input.days_left)
            .bind(&input.technical_approach)
            .bind(input.timeline.as_ref().map(Json))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(UpdateOutcome::Updated(project))
    }

    /// Record the on-chain proposal object created for a project and log it
    /// in the activity feed.
    pub async fn set_proposal_object_id(
        pool: &PgPool,
        id: DbId,
        object_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let entry = ActivityEntry::proposal_created(object_id, chrono::Utc::now());
        let query = format!(
            "UPDATE projects SET
                proposal_object_id = $2,
                recent_activity = jsonb_path_query_array(
                    jsonb_build_array($3::JSONB) || recent_activity, $4::JSONPATH),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(object_id)
            .bind(Json(&entry))
            .bind(activity_window_path())
            .fetch_optional(pool)
            .await
    }
}
