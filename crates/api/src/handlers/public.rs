//! Public JSON endpoints consumed by the front-end script.

use axum::extract::State;
use axum::Json;

use folio_db::models::category::CategoryWithCount;
use folio_db::models::project::ProjectSummary;
use folio_db::repositories::{PortfolioCategoryRepo, ProjectRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/portfolio/projects
///
/// Active projects as card summaries, display order first.
pub async fn projects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProjectSummary>>>> {
    let projects = ProjectRepo::list_public(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/portfolio/categories
///
/// Active categories that contain at least one visible project.
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryWithCount>>>> {
    let categories = PortfolioCategoryRepo::list_active_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}
