//! Repository for the `blog_posts` table.
//!
//! "Live" throughout means publicly visible: `status = 'PUBLISHED'`,
//! `published_at <= NOW()`, and `is_active`. The publish timestamp is set
//! automatically the first time a post transitions to `PUBLISHED` and is
//! preserved when it goes back to draft.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::blog_post::{BlogPost, CreateBlogPost, PostSummary, UpdateBlogPost};
use crate::slug::next_free_slug;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, excerpt, featured_image, status, \
                        category_id, author_id, published_at, is_active, created_at, updated_at";

/// Visibility predicate shared by the public queries (alias `b`).
const LIVE: &str = "b.status = 'PUBLISHED' AND b.published_at <= NOW() AND b.is_active";

/// Select list for [`PostSummary`]: resolves category and author names.
const SUMMARY_SELECT: &str = "SELECT b.id, b.title, b.slug, b.excerpt, b.featured_image, \
        c.name AS category_name, c.slug AS category_slug, \
        CASE WHEN u.id IS NULL THEN NULL \
             WHEN u.first_name <> '' OR u.last_name <> '' \
             THEN TRIM(u.first_name || ' ' || u.last_name) \
             ELSE u.username END AS author_name, \
        b.published_at \
 FROM blog_posts b \
 LEFT JOIN blog_categories c ON c.id = b.category_id \
 LEFT JOIN users u ON u.id = b.author_id";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post, returning the created row.
    ///
    /// The slug derives from the supplied slug or the title. A post created
    /// directly as `PUBLISHED` without an explicit `published_at` gets the
    /// current time.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
        author_id: Option<DbId>,
    ) -> Result<BlogPost, sqlx::Error> {
        let slug_source = input.slug.as_deref().unwrap_or(&input.title);
        let slug = next_free_slug(pool, "blog_posts", slug_source, None).await?;

        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, content, excerpt, featured_image, status,
                 category_id, author_id, published_at, is_active)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), $5, COALESCE($6, 'DRAFT'),
                     $7, $8,
                     CASE WHEN COALESCE($6, 'DRAFT') = 'PUBLISHED' AND $9::TIMESTAMPTZ IS NULL
                          THEN NOW() ELSE $9 END,
                     COALESCE($10, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.featured_image)
            .bind(&input.status)
            .bind(input.category_id)
            .bind(author_id)
            .bind(input.published_at)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a post by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live post by slug (public detail page).
    pub async fn find_live_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts b WHERE b.slug = $1 AND {LIVE}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Every post for the staff view, newest publish date first, drafts on
    /// top.
    pub async fn list(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts ORDER BY published_at DESC, created_at DESC"
        );
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// Live posts as summaries, newest first.
    pub async fn list_live(pool: &PgPool) -> Result<Vec<PostSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE {LIVE} ORDER BY b.published_at DESC");
        sqlx::query_as::<_, PostSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Live posts in one category, newest first.
    pub async fn list_live_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<PostSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} WHERE {LIVE} AND b.category_id = $1 ORDER BY b.published_at DESC"
        );
        sqlx::query_as::<_, PostSummary>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent live posts (home page teaser).
    pub async fn latest_live(pool: &PgPool, limit: i64) -> Result<Vec<PostSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE {LIVE} ORDER BY b.published_at DESC LIMIT $1");
        sqlx::query_as::<_, PostSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Up to `limit` live posts related to another post: same category when
    /// `category_id` is given, otherwise just the newest others.
    pub async fn related(
        pool: &PgPool,
        exclude_id: DbId,
        category_id: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<PostSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE {LIVE} AND b.id <> $1
               AND ($2::BIGINT IS NULL OR b.category_id = $2)
             ORDER BY b.published_at DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, PostSummary>(&query)
            .bind(exclude_id)
            .bind(category_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields are applied; a supplied slug
    /// is re-deconflicted. A transition to `PUBLISHED` with no stored or
    /// supplied publish time stamps `NOW()`; going back to draft leaves
    /// `published_at` untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let slug = match &input.slug {
            Some(raw) => Some(next_free_slug(pool, "blog_posts", raw, Some(id)).await?),
            None => None,
        };
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                excerpt = COALESCE($5, excerpt),
                featured_image = COALESCE($6, featured_image),
                status = COALESCE($7, status),
                category_id = COALESCE($8, category_id),
                is_active = COALESCE($9, is_active),
                published_at = CASE
                    WHEN $10::TIMESTAMPTZ IS NOT NULL THEN $10
                    WHEN COALESCE($7, status) = 'PUBLISHED' AND published_at IS NULL THEN NOW()
                    ELSE published_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.featured_image)
            .bind(&input.status)
            .bind(input.category_id)
            .bind(input.is_active)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    /// Set the post status directly (publish / unpublish actions), with the
    /// same publish-timestamp rule as [`update`](Self::update).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                status = $2,
                published_at = CASE
                    WHEN $2 = 'PUBLISHED' AND published_at IS NULL THEN NOW()
                    ELSE published_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a post. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of live posts (dashboard widget).
    pub async fn count_live(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM blog_posts b WHERE {LIVE}"))
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Number of drafts (dashboard widget).
    pub async fn count_drafts(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM blog_posts WHERE status = 'DRAFT'")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
