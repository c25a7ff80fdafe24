//! Route definitions for the staff management API.
//!
//! Everything here requires a `staff` or `admin` role (enforced by the
//! `RequireStaff` extractor inside each handler).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{blog, categories, dashboard, images, inquiries, profile, projects};
use crate::state::AppState;

/// Body limit for multipart upload routes; a gallery batch can carry
/// several files at the per-file cap, plus multipart framing.
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Routes mounted at `/staff`.
///
/// ```text
/// GET    /dashboard                          counters
///
/// GET    /projects                           list, POST create
/// GET    /projects/{id}                      get, PUT update, DELETE delete
/// POST   /projects/{id}/images               multipart gallery upload
/// PUT    /projects/{id}/images/{image_id}    caption / ordering
/// DELETE /projects/{id}/images/{image_id}    remove image + file
/// POST   /projects/{id}/images/{image_id}/feature   promote to featured
///
/// GET    /portfolio-categories               list, POST create
/// PUT    /portfolio-categories/{id}          update, DELETE delete
/// GET    /blog-categories                    list, POST create
/// PUT    /blog-categories/{id}               update, DELETE delete
///
/// GET    /posts                              list, POST create
/// GET    /posts/{id}                         get, PUT update, DELETE delete
/// POST   /posts/{id}/publish                 status -> PUBLISHED
/// POST   /posts/{id}/unpublish               status -> DRAFT
/// POST   /posts/{id}/featured-image          multipart featured upload
///
/// GET    /inquiries[?status=...]             list, filterable
/// GET    /inquiries/{id}                     get, PUT triage, DELETE delete
///
/// GET    /profile                            own profile, PUT update
/// POST   /profile/password                   change own password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::counts))
        // Projects + gallery.
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/projects/{id}/images",
            post(images::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/projects/{id}/images/{image_id}",
            put(images::update).delete(images::delete),
        )
        .route(
            "/projects/{id}/images/{image_id}/feature",
            post(images::set_featured),
        )
        // Categories, both kinds.
        .route(
            "/portfolio-categories",
            get(categories::list_portfolio).post(categories::create_portfolio),
        )
        .route(
            "/portfolio-categories/{id}",
            put(categories::update_portfolio).delete(categories::delete_portfolio),
        )
        .route(
            "/blog-categories",
            get(categories::list_blog).post(categories::create_blog),
        )
        .route(
            "/blog-categories/{id}",
            put(categories::update_blog).delete(categories::delete_blog),
        )
        // Blog posts.
        .route("/posts", get(blog::list).post(blog::create))
        .route(
            "/posts/{id}",
            get(blog::get_by_id).put(blog::update).delete(blog::delete),
        )
        .route("/posts/{id}/publish", post(blog::publish))
        .route("/posts/{id}/unpublish", post(blog::unpublish))
        .route(
            "/posts/{id}/featured-image",
            post(blog::upload_featured).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Inquiries.
        .route("/inquiries", get(inquiries::list))
        .route(
            "/inquiries/{id}",
            get(inquiries::get_by_id)
                .put(inquiries::update)
                .delete(inquiries::delete),
        )
        // Own profile.
        .route("/profile", get(profile::get).put(profile::update))
        .route("/profile/password", post(profile::change_password))
}
