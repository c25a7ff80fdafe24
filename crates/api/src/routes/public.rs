//! Public JSON routes for the front-end script.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{inquiries, public};
use crate::state::AppState;

/// Routes merged directly into `/api/v1`.
///
/// ```text
/// GET  /portfolio/projects    -> active project cards
/// GET  /portfolio/categories  -> active categories with counts
/// POST /contact               -> submit an inquiry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio/projects", get(public::projects))
        .route("/portfolio/categories", get(public::categories))
        .route("/contact", post(inquiries::submit))
}
