//! Staff handlers for the `/staff/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use folio_core::error::CoreError;
use folio_core::status::{parse_status, PROJECT_STATUSES};
use folio_core::types::DbId;
use folio_db::models::category::Category;
use folio_db::models::project::{CreateProject, Project, UpdateProject};
use folio_db::models::project_image::ProjectImage;
use folio_db::repositories::{ProjectImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Full staff view of a project: the row plus its categories and gallery.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub categories: Vec<Category>,
    pub images: Vec<ProjectImage>,
}

/// Load a project with its categories and gallery, or 404.
async fn load_detail(state: &AppState, id: DbId) -> AppResult<ProjectDetail> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let categories = ProjectRepo::categories_for(&state.pool, id).await?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;
    Ok(ProjectDetail {
        project,
        categories,
        images,
    })
}

/// Reject unknown project status values before they hit the CHECK constraint.
fn validate_status(status: Option<&str>) -> AppResult<()> {
    if let Some(raw) = status {
        parse_status(raw, &PROJECT_STATUSES).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown project status '{raw}'"
            )))
        })?;
    }
    Ok(())
}

/// GET /api/v1/staff/projects
pub async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/staff/projects
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectDetail>)> {
    input.validate()?;
    validate_status(input.status.as_deref())?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, slug = %project.slug, "Project created");

    let detail = load_detail(&state, project.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/staff/projects/{id}
pub async fn get_by_id(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = load_detail(&state, id).await?;
    Ok(Json(detail))
}

/// PUT /api/v1/staff/projects/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectDetail>> {
    input.validate()?;
    validate_status(input.status.as_deref())?;

    ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let detail = load_detail(&state, id).await?;
    Ok(Json(detail))
}

/// DELETE /api/v1/staff/projects/{id}
///
/// Removes the row (gallery rows cascade) and then best-effort deletes the
/// stored files.
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let images = ProjectImageRepo::list_for_project(&state.pool, id).await?;

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    for image in &images {
        state.media.remove(&image.file_path).await;
    }
    if let Some(featured) = &project.featured_image {
        state.media.remove(featured).await;
    }
    tracing::info!(project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
