//! Blog post model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use folio_core::types::{DbId, Timestamp};

/// A blog post row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub status: String,
    pub category_id: Option<DbId>,
    pub author_id: Option<DbId>,
    /// Set automatically the first time the post is published.
    pub published_at: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BlogPost {
    /// Whether the post is visible on the public site right now.
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.status == folio_core::status::POST_STATUS_PUBLISHED
            && self.published_at.is_some_and(|p| p <= now)
            && self.is_active
    }
}

/// DTO for creating a blog post. The author comes from the authenticated
/// user, not the payload.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateBlogPost {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// `DRAFT` (default) or `PUBLISHED`.
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    /// Explicit publish timestamp for scheduled posts.
    pub published_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}

/// DTO for updating a blog post. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBlogPost {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}

/// Public list representation with resolved category and author names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub author_name: Option<String>,
    pub published_at: Option<Timestamp>,
}
