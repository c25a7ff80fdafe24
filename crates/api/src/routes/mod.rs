pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;
pub mod public;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /portfolio/projects                              public project cards
/// /portfolio/categories                            public categories + counts
/// /contact                                         public inquiry submit (POST)
///
/// /staff/dashboard                                 counters (staff)
/// /staff/projects[...]                             project CRUD + gallery
/// /staff/portfolio-categories[...]                 portfolio category CRUD
/// /staff/blog-categories[...]                      blog category CRUD
/// /staff/posts[...]                                blog post CRUD + publish
/// /staff/inquiries[...]                            inquiry triage
/// /staff/profile[...]                              own profile + password
///
/// /admin/users[...]                                user management (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Public JSON endpoints for the front-end script.
        .merge(public::router())
        // Staff content management.
        .nest("/staff", staff::router())
        // Admin user management.
        .nest("/admin", admin::router())
}
