//! Staff handlers for the `/staff/posts` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use folio_core::error::CoreError;
use folio_core::media::{basename, has_allowed_extension, image_dimensions, MAX_UPLOAD_BYTES};
use folio_core::status::{parse_status, POST_STATUSES, POST_STATUS_DRAFT, POST_STATUS_PUBLISHED};
use folio_core::types::DbId;
use folio_db::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use folio_db::repositories::BlogPostRepo;

use crate::error::{AppError, AppResult};
use crate::media::BLOG_DIR;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Reject unknown post status values before they hit the CHECK constraint.
fn validate_status(status: Option<&str>) -> AppResult<()> {
    if let Some(raw) = status {
        parse_status(raw, &POST_STATUSES).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown post status '{raw}'")))
        })?;
    }
    Ok(())
}

/// GET /api/v1/staff/posts
pub async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogPost>>>> {
    let posts = BlogPostRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/staff/posts
///
/// The authenticated staff user becomes the author.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    input.validate()?;
    validate_status(input.status.as_deref())?;

    let post = BlogPostRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    tracing::info!(post_id = post.id, slug = %post.slug, "Blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/v1/staff/posts/{id}
pub async fn get_by_id(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    Ok(Json(post))
}

/// PUT /api/v1/staff/posts/{id}
pub async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<BlogPost>> {
    input.validate()?;
    validate_status(input.status.as_deref())?;

    let post = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    Ok(Json(post))
}

/// POST /api/v1/staff/posts/{id}/publish
///
/// Sets status to `PUBLISHED`; the publish timestamp is stamped on the
/// first transition only.
pub async fn publish(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::set_status(&state.pool, id, POST_STATUS_PUBLISHED)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    tracing::info!(post_id = id, "Blog post published");
    Ok(Json(post))
}

/// POST /api/v1/staff/posts/{id}/unpublish
///
/// Returns the post to draft; `published_at` is preserved.
pub async fn unpublish(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::set_status(&state.pool, id, POST_STATUS_DRAFT)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    tracing::info!(post_id = id, "Blog post unpublished");
    Ok(Json(post))
}

/// POST /api/v1/staff/posts/{id}/featured-image
///
/// Multipart upload of a single featured image, replacing any previous one.
pub async fn upload_featured(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;

    let mut stored = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(|f| basename(f).to_string()) else {
            continue;
        };
        if !has_allowed_extension(&filename) {
            return Err(AppError::BadRequest(
                "Only jpg, jpeg, png, gif, and webp files are allowed".into(),
            ));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(format!(
                "File exceeds the {MAX_UPLOAD_BYTES} byte limit"
            )));
        }
        if image_dimensions(&data).is_none() {
            return Err(AppError::BadRequest(
                "File could not be verified as a valid image".into(),
            ));
        }
        stored = Some(state.media.save(BLOG_DIR, &filename, &data).await?);
        break;
    }

    let path = stored.ok_or_else(|| AppError::BadRequest("No image file in request".into()))?;

    if let Some(old) = &post.featured_image {
        state.media.remove(old).await;
    }

    let updated = BlogPostRepo::update(
        &state.pool,
        id,
        &UpdateBlogPost {
            featured_image: Some(path),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "BlogPost",
        id,
    }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/staff/posts/{id}
pub async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;

    BlogPostRepo::delete(&state.pool, id).await?;
    if let Some(featured) = &post.featured_image {
        state.media.remove(featured).await;
    }
    Ok(StatusCode::NO_CONTENT)
}
