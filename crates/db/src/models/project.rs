//! Portfolio project model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use folio_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    /// Media path of the card/featured image, if one was uploaded or
    /// promoted from the gallery.
    pub featured_image: Option<String>,
    pub short_description: String,
    pub details: String,
    /// Comma-separated technology list, e.g. `"Rust, Axum, PostgreSQL"`.
    pub technologies: String,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub sort_order: i32,
    pub status: String,
    pub year_completed: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
///
/// `category_ids` replaces the category assignment wholesale; `None` means
/// "no categories", matching an empty multi-select.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub details: Option<String>,
    pub technologies: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(url)]
    pub live_demo_url: Option<String>,
    /// Defaults to one past the current maximum so new projects land last.
    pub sort_order: Option<i32>,
    pub status: Option<String>,
    pub year_completed: Option<i32>,
    pub is_active: Option<bool>,
    pub category_ids: Option<Vec<DbId>>,
}

/// DTO for updating a project. Only non-`None` fields are applied;
/// `category_ids: Some(..)` replaces the assignment.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub details: Option<String>,
    pub technologies: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(url)]
    pub live_demo_url: Option<String>,
    pub sort_order: Option<i32>,
    pub status: Option<String>,
    pub year_completed: Option<i32>,
    pub is_active: Option<bool>,
    pub category_ids: Option<Vec<DbId>>,
}

/// Public list/card representation: the project plus its resolved card
/// image (featured image, falling back to the first gallery image) and
/// category names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub technologies: String,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub status: String,
    pub year_completed: Option<i32>,
    pub card_image: Option<String>,
    pub categories: Vec<String>,
}
