//! Gallery image model, ordered and owned by a project.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use folio_core::types::{DbId, Timestamp};

/// A gallery image row from the `project_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    /// Media path relative to the media root, e.g.
    /// `portfolio_gallery/my-project/shot.png`.
    pub file_path: String,
    pub caption: String,
    pub sort_order: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_at: Timestamp,
}

/// DTO for recording an uploaded gallery image.
#[derive(Debug, Deserialize)]
pub struct CreateProjectImage {
    pub project_id: DbId,
    pub file_path: String,
    pub caption: String,
    pub sort_order: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// DTO for editing gallery image metadata (caption / ordering).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectImage {
    #[validate(length(max = 255))]
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}
