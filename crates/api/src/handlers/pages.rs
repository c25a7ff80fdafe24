//! Server-rendered public pages.
//!
//! Every handler returns a full HTML document rendered from the embedded
//! Handlebars templates. Unknown slugs and inactive records render the 404
//! page; database failures render a plain 500 page (and are logged).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use validator::Validate;

use folio_db::models::inquiry::CreateInquiry;
use folio_db::repositories::{
    BlogCategoryRepo, BlogPostRepo, InquiryRepo, PortfolioCategoryRepo, ProjectImageRepo,
    ProjectRepo, UserRepo,
};

use crate::state::AppState;

/// Number of blog posts teased on the home page.
const HOME_POST_COUNT: i64 = 3;

/// Related posts shown under a blog article.
const RELATED_POST_COUNT: i64 = 3;

/// Meta-description length budget.
const META_DESCRIPTION_CHARS: usize = 160;

/// Last-resort body when even the error template fails to render.
const FALLBACK_ERROR: &str = "<!DOCTYPE html><html><body><h1>Something went wrong</h1></body></html>";

// ---------------------------------------------------------------------------
// Page error plumbing
// ---------------------------------------------------------------------------

/// A fully rendered error response (404 or 500 page).
pub struct PageError(Response);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0
    }
}

impl PageError {
    /// Render the 404 page.
    fn not_found(state: &AppState) -> Self {
        let ctx = base_ctx(state, "Not Found", None);
        let html = state
            .templates
            .render("not_found", &ctx)
            .unwrap_or_else(|_| FALLBACK_ERROR.to_string());
        PageError((StatusCode::NOT_FOUND, Html(html)).into_response())
    }

    /// Log a database error and render a plain 500 page.
    fn internal(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "Database error while rendering page");
        PageError(
            (StatusCode::INTERNAL_SERVER_ERROR, Html(FALLBACK_ERROR.to_string())).into_response(),
        )
    }
}

type PageResult = Result<Response, PageError>;

/// Common template context shared by the layout.
fn base_ctx(state: &AppState, page_title: &str, meta_description: Option<&str>) -> Value {
    json!({
        "site_name": state.config.site_name,
        "page_title": page_title,
        "meta_description": meta_description,
    })
}

/// Merge page-specific values into a base context.
fn with(mut ctx: Value, extra: Value) -> Value {
    if let (Some(base), Some(more)) = (ctx.as_object_mut(), extra.as_object()) {
        for (k, v) in more {
            base.insert(k.clone(), v.clone());
        }
    }
    ctx
}

/// Render a template to a 200 response; template failures become 500s.
fn render(state: &AppState, template: &str, ctx: &Value) -> Response {
    match state.templates.render(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(template, error = %err, "Template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(FALLBACK_ERROR.to_string())).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Home / about
// ---------------------------------------------------------------------------

/// GET /
pub async fn home(State(state): State<AppState>) -> PageResult {
    let latest_posts = BlogPostRepo::latest_live(&state.pool, HOME_POST_COUNT)
        .await
        .map_err(PageError::internal)?;

    let ctx = with(
        base_ctx(
            &state,
            "Home",
            Some("Software projects, write-ups, and experiments."),
        ),
        json!({ "latest_posts": latest_posts }),
    );
    Ok(render(&state, "home", &ctx))
}

/// GET /about
pub async fn about(State(state): State<AppState>) -> PageResult {
    let ctx = with(
        base_ctx(&state, "About", Some("Who I am and what I build.")),
        json!({
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "About" },
            ]
        }),
    );
    Ok(render(&state, "about", &ctx))
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    /// Present after a successful submit (post/redirect/get).
    pub sent: Option<String>,
}

/// GET /contact
pub async fn contact_form(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> PageResult {
    let ctx = with(
        base_ctx(&state, "Contact", Some("Get in touch about a project.")),
        json!({
            "sent": query.sent.is_some(),
            "values": {},
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Contact" },
            ]
        }),
    );
    Ok(render(&state, "contact", &ctx))
}

/// POST /contact
///
/// Valid input is stored and answered with a redirect back to the form
/// (post/redirect/get) carrying the sent flag; invalid input re-renders the
/// form with field errors and the submitted values.
pub async fn contact_submit(
    State(state): State<AppState>,
    Form(input): Form<CreateInquiry>,
) -> PageResult {
    if let Err(errors) = input.validate() {
        let ctx = with(
            base_ctx(&state, "Contact", None),
            json!({
                "errors": field_error_map(&errors),
                "values": {
                    "name": input.name,
                    "email": input.email,
                    "phone": input.phone,
                    "subject": input.subject,
                    "message": input.message,
                },
            }),
        );
        return Ok(render(&state, "contact", &ctx));
    }

    let inquiry = InquiryRepo::create(&state.pool, &input)
        .await
        .map_err(PageError::internal)?;
    tracing::info!(inquiry_id = inquiry.id, "Contact inquiry submitted");

    if let Some(mailer) = state.mailer.clone() {
        // Notification failures must not affect the visitor's submit.
        tokio::spawn(async move {
            if let Err(e) = mailer.send_new_inquiry(&inquiry).await {
                tracing::warn!(error = %e, "Failed to send inquiry notification");
            }
        });
    }

    Ok(Redirect::to("/contact?sent=1").into_response())
}

/// Flatten validator output into `{ field: first_message }`.
fn field_error_map(errors: &validator::ValidationErrors) -> Value {
    let mut map = Map::new();
    for (field, errs) in errors.field_errors() {
        let message = errs
            .first()
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string());
        map.insert(field.to_string(), Value::String(message));
    }
    Value::Object(map)
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

/// GET /blog
pub async fn blog_list(State(state): State<AppState>) -> PageResult {
    let posts = BlogPostRepo::list_live(&state.pool)
        .await
        .map_err(PageError::internal)?;
    let sidebar = BlogCategoryRepo::list_active_with_counts(&state.pool)
        .await
        .map_err(PageError::internal)?;

    let ctx = with(
        base_ctx(
            &state,
            "Blog",
            Some("Write-ups on software projects and engineering."),
        ),
        json!({
            "posts": posts,
            "sidebar_categories": sidebar,
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Blog" },
            ]
        }),
    );
    Ok(render(&state, "blog_list", &ctx))
}

/// GET /blog/category/{slug}
pub async fn blog_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> PageResult {
    let category = BlogCategoryRepo::find_active_by_slug(&state.pool, &slug)
        .await
        .map_err(PageError::internal)?
        .ok_or_else(|| PageError::not_found(&state))?;

    let posts = BlogPostRepo::list_live_by_category(&state.pool, category.id)
        .await
        .map_err(PageError::internal)?;
    let sidebar = BlogCategoryRepo::list_active_with_counts(&state.pool)
        .await
        .map_err(PageError::internal)?;

    let meta = category
        .description
        .clone()
        .unwrap_or_else(|| format!("Blog posts about {}.", category.name));
    let title = format!("{} - Blog", category.name);
    let ctx = with(
        base_ctx(&state, &title, Some(&meta)),
        json!({
            "category": category,
            "posts": posts,
            "sidebar_categories": sidebar,
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Blog", "url": "/blog" },
                { "name": category.name },
            ]
        }),
    );
    Ok(render(&state, "blog_list", &ctx))
}

/// GET /blog/{slug}
pub async fn blog_detail(State(state): State<AppState>, Path(slug): Path<String>) -> PageResult {
    let post = BlogPostRepo::find_live_by_slug(&state.pool, &slug)
        .await
        .map_err(PageError::internal)?
        .ok_or_else(|| PageError::not_found(&state))?;

    let category = match post.category_id {
        Some(id) => BlogCategoryRepo::find_by_id(&state.pool, id)
            .await
            .map_err(PageError::internal)?
            .filter(|c| c.is_active),
        None => None,
    };

    let author_name = match post.author_id {
        Some(id) => UserRepo::display_name(&state.pool, id)
            .await
            .map_err(PageError::internal)?,
        None => None,
    };

    let related_posts = BlogPostRepo::related(
        &state.pool,
        post.id,
        category.as_ref().map(|c| c.id),
        RELATED_POST_COUNT,
    )
    .await
    .map_err(PageError::internal)?;

    let meta = if post.excerpt.is_empty() {
        folio_core::text::summarize(&post.content, META_DESCRIPTION_CHARS)
    } else {
        post.excerpt.clone()
    };

    let mut breadcrumbs = vec![
        json!({ "name": "Home", "url": "/" }),
        json!({ "name": "Blog", "url": "/blog" }),
    ];
    if let Some(c) = &category {
        breadcrumbs.push(json!({ "name": c.name, "url": format!("/blog/category/{}", c.slug) }));
    }
    breadcrumbs.push(json!({ "name": folio_core::text::truncate_chars(&post.title, 40) }));

    let ctx = with(
        base_ctx(&state, &post.title, Some(&meta)),
        json!({
            "post": post,
            "category": category,
            "author_name": author_name,
            "related_posts": related_posts,
            "breadcrumbs": breadcrumbs,
        }),
    );
    Ok(render(&state, "blog_detail", &ctx))
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// GET /portfolio
pub async fn portfolio_list(State(state): State<AppState>) -> PageResult {
    let projects = ProjectRepo::list_public(&state.pool)
        .await
        .map_err(PageError::internal)?;
    let sidebar = PortfolioCategoryRepo::list_active_with_counts(&state.pool)
        .await
        .map_err(PageError::internal)?;

    let ctx = with(
        base_ctx(&state, "Portfolio", Some("Selected software projects.")),
        json!({
            "projects": projects,
            "sidebar_categories": sidebar,
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Portfolio" },
            ]
        }),
    );
    Ok(render(&state, "portfolio_list", &ctx))
}

/// GET /portfolio/styles
pub async fn portfolio_categories(State(state): State<AppState>) -> PageResult {
    let categories = PortfolioCategoryRepo::list_active_with_counts(&state.pool)
        .await
        .map_err(PageError::internal)?;

    let ctx = with(
        base_ctx(&state, "Browse by stack", Some("Projects grouped by technology stack.")),
        json!({
            "categories": categories,
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Portfolio", "url": "/portfolio" },
                { "name": "Stacks" },
            ]
        }),
    );
    Ok(render(&state, "portfolio_categories", &ctx))
}

/// GET /portfolio/styles/{slug}
pub async fn portfolio_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> PageResult {
    let category = PortfolioCategoryRepo::find_active_by_slug(&state.pool, &slug)
        .await
        .map_err(PageError::internal)?
        .ok_or_else(|| PageError::not_found(&state))?;

    let projects = ProjectRepo::list_public_by_category(&state.pool, category.id)
        .await
        .map_err(PageError::internal)?;
    let sidebar = PortfolioCategoryRepo::list_active_with_counts(&state.pool)
        .await
        .map_err(PageError::internal)?;

    let meta = category
        .description
        .clone()
        .unwrap_or_else(|| format!("Projects built with {}.", category.name));
    let title = format!("{} projects", category.name);
    let ctx = with(
        base_ctx(&state, &title, Some(&meta)),
        json!({
            "category": category,
            "projects": projects,
            "sidebar_categories": sidebar,
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Portfolio", "url": "/portfolio" },
                { "name": "Stacks", "url": "/portfolio/styles" },
                { "name": category.name },
            ]
        }),
    );
    Ok(render(&state, "portfolio_list", &ctx))
}

/// GET /portfolio/{slug}
pub async fn portfolio_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> PageResult {
    let project = ProjectRepo::find_active_by_slug(&state.pool, &slug)
        .await
        .map_err(PageError::internal)?
        .ok_or_else(|| PageError::not_found(&state))?;

    let categories = ProjectRepo::categories_for(&state.pool, project.id)
        .await
        .map_err(PageError::internal)?;
    let images = ProjectImageRepo::list_for_project(&state.pool, project.id)
        .await
        .map_err(PageError::internal)?;

    let tech_list: Vec<String> = project
        .technologies
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let meta = if project.short_description.is_empty() {
        folio_core::text::summarize(&project.details, META_DESCRIPTION_CHARS)
    } else {
        project.short_description.clone()
    };
    let title = format!("{} - Portfolio", project.title);

    let ctx = with(
        base_ctx(&state, &title, Some(&meta)),
        json!({
            "project": project,
            "categories": categories,
            "images": images,
            "tech_list": tech_list,
            "breadcrumbs": [
                { "name": "Home", "url": "/" },
                { "name": "Portfolio", "url": "/portfolio" },
                { "name": folio_core::text::truncate_chars(&project.title, 40) },
            ]
        }),
    );
    Ok(render(&state, "portfolio_detail", &ctx))
}

/// Catch-all 404 for unmatched paths.
pub async fn fallback(State(state): State<AppState>) -> Response {
    PageError::not_found(&state).into_response()
}
