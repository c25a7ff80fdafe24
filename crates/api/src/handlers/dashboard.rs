//! Staff dashboard counters.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use folio_db::repositories::{BlogPostRepo, InquiryRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Counts shown on the staff dashboard landing page.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub new_inquiries: i64,
    pub active_projects: i64,
    pub live_posts: i64,
    pub draft_posts: i64,
}

/// GET /api/v1/staff/dashboard
pub async fn counts(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardCounts>>> {
    let new_inquiries = InquiryRepo::count_new(&state.pool).await?;
    let active_projects = ProjectRepo::count_active(&state.pool).await?;
    let live_posts = BlogPostRepo::count_live(&state.pool).await?;
    let draft_posts = BlogPostRepo::count_drafts(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardCounts {
            new_inquiries,
            active_projects,
            live_posts,
            draft_posts,
        },
    }))
}
