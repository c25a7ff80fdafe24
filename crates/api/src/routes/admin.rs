//! Route definitions for admin-only user management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                       list, POST create
/// GET    /users/{id}                  get, PUT update, DELETE deactivate
/// POST   /users/{id}/reset-password   reset password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list).post(admin::create))
        .route(
            "/users/{id}",
            get(admin::get_by_id)
                .put(admin::update)
                .delete(admin::deactivate),
        )
        .route("/users/{id}/reset-password", post(admin::reset_password))
}
