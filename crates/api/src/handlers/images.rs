//! Staff handlers for project gallery images: multipart upload, metadata
//! edits, deletion, and promoting a gallery image to the featured slot.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use folio_core::error::CoreError;
use folio_core::media::{basename, has_allowed_extension, image_dimensions, MAX_UPLOAD_BYTES};
use folio_core::types::DbId;
use folio_db::models::project::Project;
use folio_db::models::project_image::{CreateProjectImage, ProjectImage, UpdateProjectImage};
use folio_db::repositories::{ProjectImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::media::{MediaStore, FEATURED_DIR, GALLERY_DIR};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// One rejected file from a multipart upload.
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// Response for the gallery upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub uploaded: Vec<ProjectImage>,
    pub skipped: Vec<SkippedFile>,
    /// Set when the request included a `featured` file field.
    pub featured_image: Option<String>,
}

/// POST /api/v1/staff/projects/{id}/images
///
/// Multipart upload. Every file field becomes a gallery image except a
/// field named `featured`, which replaces the project's featured image.
/// Files failing the extension, size, or decode checks are reported in
/// `skipped` rather than failing the whole batch.
pub async fn upload(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResult>)> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let gallery_dir = format!("{GALLERY_DIR}/{}", project.slug);
    let mut uploaded = Vec::new();
    let mut skipped = Vec::new();
    let mut featured_image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(|f| basename(f).to_string()) else {
            // Non-file fields (e.g. captions handled elsewhere) are ignored.
            continue;
        };
        let is_featured = field.name() == Some("featured");

        if !has_allowed_extension(&filename) {
            skipped.push(SkippedFile {
                filename,
                reason: "Only jpg, jpeg, png, gif, and webp files are allowed".into(),
            });
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if data.len() > MAX_UPLOAD_BYTES {
            skipped.push(SkippedFile {
                filename,
                reason: format!("File exceeds the {MAX_UPLOAD_BYTES} byte limit"),
            });
            continue;
        }

        let Some((width, height)) = image_dimensions(&data) else {
            skipped.push(SkippedFile {
                filename,
                reason: "File could not be verified as a valid image".into(),
            });
            continue;
        };

        if is_featured {
            let path = state.media.save(FEATURED_DIR, &filename, &data).await?;
            replace_featured(&state, &project, &path).await?;
            featured_image = Some(path);
            continue;
        }

        let path = state.media.save(&gallery_dir, &filename, &data).await?;
        let image = ProjectImageRepo::create(
            &state.pool,
            &CreateProjectImage {
                project_id,
                file_path: path,
                caption: String::new(),
                sort_order: 0,
                width: Some(width as i32),
                height: Some(height as i32),
            },
        )
        .await?;
        uploaded.push(image);
    }

    tracing::info!(
        project_id,
        uploaded = uploaded.len(),
        skipped = skipped.len(),
        "Gallery upload processed"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResult {
            uploaded,
            skipped,
            featured_image,
        }),
    ))
}

/// PUT /api/v1/staff/projects/{id}/images/{image_id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProjectImage>,
) -> AppResult<Json<ProjectImage>> {
    input.validate()?;

    let image = ProjectImageRepo::update(&state.pool, project_id, image_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }))?;
    Ok(Json(image))
}

/// DELETE /api/v1/staff/projects/{id}/images/{image_id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let image = ProjectImageRepo::find_scoped(&state.pool, project_id, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }))?;

    ProjectImageRepo::delete(&state.pool, project_id, image_id).await?;
    state.media.remove(&image.file_path).await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/staff/projects/{id}/images/{image_id}/feature
///
/// Copy a gallery image into the featured-images area and point the project
/// at it. A no-op when that image is already featured.
pub async fn set_featured(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let image = ProjectImageRepo::find_scoped(&state.pool, project_id, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }))?;

    // Already featured? (Compare stored basenames, as the copy keeps the
    // gallery file's name.)
    if let Some(current) = &project.featured_image {
        if MediaStore::file_name(current) == MediaStore::file_name(&image.file_path) {
            return Ok(Json(project));
        }
    }

    let new_path = state.media.copy(&image.file_path, FEATURED_DIR).await?;
    replace_featured(&state, &project, &new_path).await?;

    let updated = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    tracing::info!(project_id, image_id, "Featured image updated");
    Ok(Json(updated))
}

/// Point the project at a new featured image, removing the old stored file.
async fn replace_featured(
    state: &AppState,
    project: &Project,
    new_path: &str,
) -> AppResult<()> {
    if let Some(old) = &project.featured_image {
        if old != new_path {
            state.media.remove(old).await;
        }
    }
    ProjectRepo::set_featured_image(&state.pool, project.id, Some(new_path)).await?;
    Ok(())
}
