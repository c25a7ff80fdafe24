//! Route definitions for the server-rendered public site.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// GET  /                          home
/// GET  /about                     about page
/// GET  /contact                   contact form, POST submit
/// GET  /blog                      live posts
/// GET  /blog/category/{slug}      live posts in a category
/// GET  /blog/{slug}               post detail
/// GET  /portfolio                 active projects
/// GET  /portfolio/styles          categories with active projects
/// GET  /portfolio/styles/{slug}   projects in a category
/// GET  /portfolio/{slug}          project detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route(
            "/contact",
            get(pages::contact_form).post(pages::contact_submit),
        )
        .route("/blog", get(pages::blog_list))
        .route("/blog/category/{slug}", get(pages::blog_category))
        .route("/blog/{slug}", get(pages::blog_detail))
        .route("/portfolio", get(pages::portfolio_list))
        .route("/portfolio/styles", get(pages::portfolio_categories))
        .route("/portfolio/styles/{slug}", get(pages::portfolio_by_category))
        .route("/portfolio/{slug}", get(pages::portfolio_detail))
}
