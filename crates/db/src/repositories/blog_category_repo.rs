//! Repository for the `blog_categories` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use crate::slug::next_free_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, is_active, created_at, updated_at";

const TABLE: &str = "blog_categories";

/// Provides CRUD operations for blog categories.
pub struct BlogCategoryRepo;

impl BlogCategoryRepo {
    /// Insert a new category, deriving a unique slug from the supplied slug
    /// or, when absent, the name.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let slug_source = input.slug.as_deref().unwrap_or(&input.name);
        let slug = next_free_slug(pool, TABLE, slug_source, None).await?;
        let query = format!(
            "INSERT INTO {TABLE} (name, slug, description, is_active)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active category by slug (public lookups).
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE slug = $1 AND is_active");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by name (staff view).
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Active categories containing at least one live post, with the post
    /// count. Powers the blog sidebar.
    pub async fn list_active_with_counts(
        pool: &PgPool,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.slug, c.description, COUNT(b.id) AS item_count
             FROM blog_categories c
             JOIN blog_posts b ON b.category_id = c.id
                AND b.status = 'PUBLISHED'
                AND b.published_at <= NOW()
                AND b.is_active
             WHERE c.is_active
             GROUP BY c.id
             ORDER BY c.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a category. Only non-`None` fields are applied; a supplied
    /// slug is re-deconflicted, an absent one is left alone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let slug = match &input.slug {
            Some(raw) => Some(next_free_slug(pool, TABLE, raw, Some(id)).await?),
            None => None,
        };
        let query = format!(
            "UPDATE {TABLE} SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&slug)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a category. Posts keep running with
    /// `category_id = NULL` via the FK's `ON DELETE SET NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
