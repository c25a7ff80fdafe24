//! Slug collision resolution against live tables.
//!
//! [`next_free_slug`] owns the `-1`, `-2`, … suffix loop; the base slug
//! comes from [`folio_core::slug::slugify`]. Table names are compile-time
//! constants supplied by the repositories, never user input.

use folio_core::slug::{candidate, slugify, MAX_SLUG_ATTEMPTS};
use folio_core::types::DbId;
use sqlx::PgPool;

/// Whether `slug` is already taken in `table`, optionally ignoring one row
/// (the row being updated).
async fn slug_in_use(
    pool: &PgPool,
    table: &str,
    slug: &str,
    exclude_id: Option<DbId>,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT EXISTS(SELECT 1 FROM {table} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))"
    );
    let (exists,): (bool,) = sqlx::query_as(&query)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Slugify `name` and append a numeric suffix until the result is free in
/// `table`.
///
/// After [`MAX_SLUG_ATTEMPTS`] collisions the current timestamp is appended
/// instead, which is unique for any realistic table.
pub async fn next_free_slug(
    pool: &PgPool,
    table: &str,
    name: &str,
    exclude_id: Option<DbId>,
) -> Result<String, sqlx::Error> {
    let base = slugify(name);
    for n in 0..MAX_SLUG_ATTEMPTS {
        let slug = candidate(&base, n);
        if !slug_in_use(pool, table, &slug, exclude_id).await? {
            return Ok(slug);
        }
    }
    tracing::warn!(table, base, "slug suffix space exhausted, falling back to timestamp");
    Ok(format!("{base}-{}", chrono::Utc::now().timestamp()))
}
