//! Contact inquiry model and DTOs.
//!
//! Visitor-supplied fields are immutable after submission; staff edit only
//! the workflow status and internal notes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use folio_core::types::{DbId, Timestamp};

/// A contact inquiry row from the `contact_inquiries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactInquiry {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub internal_notes: String,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a visitor-submitted inquiry (contact form or JSON API).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInquiry {
    #[validate(length(min = 1, max = 200, message = "Please provide your name"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 25))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub subject: String,
    #[validate(length(min = 1, max = 10_000, message = "Please include a message"))]
    pub message: String,
}

/// DTO for staff triage: workflow status and internal notes only.
#[derive(Debug, Deserialize)]
pub struct UpdateInquiry {
    pub status: Option<String>,
    pub internal_notes: Option<String>,
}
