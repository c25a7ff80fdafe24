//! Repository for the `projects` table and its category assignment.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::category::Category;
use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};
use crate::slug::next_free_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, featured_image, short_description, details, \
                        technologies, github_url, live_demo_url, sort_order, status, \
                        year_completed, is_active, created_at, updated_at";

/// Select list for [`ProjectSummary`]: resolves the card image (featured
/// image, else first gallery image) and active category names inline.
const SUMMARY_SELECT: &str = "SELECT p.id, p.title, p.slug, p.short_description, p.technologies, \
        p.github_url, p.live_demo_url, p.status, p.year_completed, \
        COALESCE(p.featured_image, \
                 (SELECT pi.file_path FROM project_images pi \
                  WHERE pi.project_id = p.id ORDER BY pi.sort_order, pi.id LIMIT 1)) AS card_image, \
        ARRAY(SELECT c.name FROM portfolio_categories c \
              JOIN project_categories pc ON pc.category_id = c.id \
              WHERE pc.project_id = p.id AND c.is_active \
              ORDER BY c.name) AS categories \
 FROM projects p";

/// Provides CRUD operations for portfolio projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// The slug is derived from the supplied slug (or the title) with
    /// numeric-suffix collision resolution. `sort_order` defaults to one
    /// past the current maximum so new projects land at the end. Category
    /// assignment happens in the same transaction as the insert.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let slug_source = input.slug.as_deref().unwrap_or(&input.title);
        let slug = next_free_slug(pool, "projects", slug_source, None).await?;

        let sort_order = match input.sort_order {
            Some(order) => order,
            None => Self::max_sort_order(pool).await? + 1,
        };

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                (title, slug, short_description, details, technologies,
                 github_url, live_demo_url, sort_order, status, year_completed, is_active)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''),
                     $6, $7, $8, COALESCE($9, 'COMPLETED'), $10, COALESCE($11, TRUE))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.short_description)
            .bind(&input.details)
            .bind(&input.technologies)
            .bind(&input.github_url)
            .bind(&input.live_demo_url)
            .bind(sort_order)
            .bind(&input.status)
            .bind(input.year_completed)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(ids) = &input.category_ids {
            Self::replace_categories(&mut tx, project.id, ids).await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active project by slug (public detail page).
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE slug = $1 AND is_active");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every project for the staff view, display order first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects ORDER BY sort_order, created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Publicly visible projects as card summaries, display order first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query =
            format!("{SUMMARY_SELECT} WHERE p.is_active ORDER BY p.sort_order, p.created_at DESC");
        sqlx::query_as::<_, ProjectSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Publicly visible projects assigned to one category.
    pub async fn list_public_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE p.is_active
               AND EXISTS (SELECT 1 FROM project_categories pc
                           WHERE pc.project_id = p.id AND pc.category_id = $1)
             ORDER BY p.sort_order, p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields are applied; a supplied
    /// slug is re-deconflicted, and `category_ids: Some` replaces the
    /// category assignment in the same transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let slug = match &input.slug {
            Some(raw) => Some(next_free_slug(pool, "projects", raw, Some(id)).await?),
            None => None,
        };

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                short_description = COALESCE($4, short_description),
                details = COALESCE($5, details),
                technologies = COALESCE($6, technologies),
                github_url = COALESCE($7, github_url),
                live_demo_url = COALESCE($8, live_demo_url),
                sort_order = COALESCE($9, sort_order),
                status = COALESCE($10, status),
                year_completed = COALESCE($11, year_completed),
                is_active = COALESCE($12, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.short_description)
            .bind(&input.details)
            .bind(&input.technologies)
            .bind(&input.github_url)
            .bind(&input.live_demo_url)
            .bind(input.sort_order)
            .bind(&input.status)
            .bind(input.year_completed)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(ids) = &input.category_ids {
            Self::replace_categories(&mut tx, project.id, ids).await?;
        }

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Permanently delete a project. Gallery rows and category assignments
    /// cascade; stored files are the caller's concern.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Point the project's featured image at a media path (or clear it).
    pub async fn set_featured_image(
        pool: &PgPool,
        id: DbId,
        path: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET featured_image = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active categories assigned to a project, ordered by name.
    pub async fn categories_for(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name, c.slug, c.description, c.is_active, c.created_at, c.updated_at
             FROM portfolio_categories c
             JOIN project_categories pc ON pc.category_id = c.id
             WHERE pc.project_id = $1
             ORDER BY c.name",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Current maximum `sort_order`, 0 for an empty table.
    pub async fn max_sort_order(pool: &PgPool) -> Result<i32, sqlx::Error> {
        let (max,): (i32,) =
            sqlx::query_as("SELECT COALESCE(MAX(sort_order), 0) FROM projects")
                .fetch_one(pool)
                .await?;
        Ok(max)
    }

    /// Number of publicly visible projects (dashboard widget).
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE is_active")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Replace the category assignment inside an open transaction.
    ///
    /// Unknown category ids are ignored rather than erroring, matching a
    /// stale multi-select submit.
    async fn replace_categories(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM project_categories WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "INSERT INTO project_categories (project_id, category_id)
             SELECT $1, id FROM portfolio_categories WHERE id = ANY($2)",
        )
        .bind(project_id)
        .bind(category_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
