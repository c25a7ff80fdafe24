//! Repository for the `contact_inquiries` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::inquiry::{ContactInquiry, CreateInquiry, UpdateInquiry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, subject, message, status, internal_notes, \
                        submitted_at, updated_at";

/// Provides CRUD operations for contact inquiries.
pub struct InquiryRepo;

impl InquiryRepo {
    /// Insert a visitor-submitted inquiry with status `NEW`.
    pub async fn create(pool: &PgPool, input: &CreateInquiry) -> Result<ContactInquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_inquiries (name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactInquiry>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find an inquiry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContactInquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_inquiries WHERE id = $1");
        sqlx::query_as::<_, ContactInquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List inquiries newest first, optionally filtered by workflow status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<ContactInquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_inquiries
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY submitted_at DESC"
        );
        sqlx::query_as::<_, ContactInquiry>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Staff triage update: workflow status and/or internal notes. The
    /// visitor-supplied fields are never writable.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInquiry,
    ) -> Result<Option<ContactInquiry>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_inquiries SET
                status = COALESCE($2, status),
                internal_notes = COALESCE($3, internal_notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactInquiry>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.internal_notes)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an inquiry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_inquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of unhandled (`NEW`) inquiries (dashboard widget).
    pub async fn count_new(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contact_inquiries WHERE status = 'NEW'")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
