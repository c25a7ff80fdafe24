//! HTTP-level tests for the server-rendered public site: visibility
//! filtering, 404 behavior, and the contact form round-trip.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_text, get, post_form};
use folio_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use folio_db::models::category::CreateCategory;
use folio_db::models::project::{CreateProject, UpdateProject};
use folio_db::repositories::{BlogPostRepo, InquiryRepo, PortfolioCategoryRepo, ProjectRepo};
use sqlx::PgPool;

fn draft_post(title: &str) -> CreateBlogPost {
    CreateBlogPost {
        title: title.to_string(),
        ..Default::default()
    }
}

fn published_post(title: &str) -> CreateBlogPost {
    CreateBlogPost {
        title: title.to_string(),
        content: Some("<p>body</p>".to_string()),
        status: Some("PUBLISHED".to_string()),
        ..Default::default()
    }
}

fn project(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Basic pages
// ---------------------------------------------------------------------------

/// Home, about, and contact render with the site chrome.
#[sqlx::test(migrations = "../../migrations")]
async fn basic_pages_render(pool: PgPool) {
    for path in ["/", "/about", "/contact", "/blog", "/portfolio", "/portfolio/styles"] {
        let response = get(common::build_test_app(pool.clone()), path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path} should render");
        let html = body_text(response).await;
        assert!(html.contains("Folio"), "{path} should use the layout");
    }
}

/// Unknown paths render the 404 page.
#[sqlx::test(migrations = "../../migrations")]
async fn unknown_path_renders_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("404"));
}

// ---------------------------------------------------------------------------
// Blog visibility
// ---------------------------------------------------------------------------

/// Drafts, inactive posts, and future-dated posts are hidden from the
/// public list and detail pages; live posts are shown.
#[sqlx::test(migrations = "../../migrations")]
async fn blog_visibility_filtering(pool: PgPool) {
    BlogPostRepo::create(&pool, &draft_post("Hidden Draft"), None)
        .await
        .unwrap();

    let live = BlogPostRepo::create(&pool, &published_post("Visible Post"), None)
        .await
        .unwrap();

    let scheduled = CreateBlogPost {
        published_at: Some(Utc::now() + Duration::days(7)),
        ..published_post("Scheduled Post")
    };
    BlogPostRepo::create(&pool, &scheduled, None).await.unwrap();

    let inactive = BlogPostRepo::create(&pool, &published_post("Deactivated Post"), None)
        .await
        .unwrap();
    BlogPostRepo::update(
        &pool,
        inactive.id,
        &UpdateBlogPost {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let html = body_text(get(common::build_test_app(pool.clone()), "/blog").await).await;
    assert!(html.contains("Visible Post"));
    assert!(!html.contains("Hidden Draft"));
    assert!(!html.contains("Scheduled Post"));
    assert!(!html.contains("Deactivated Post"));

    // Detail pages follow the same rule.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/blog/{}", live.slug),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), "/blog/hidden-draft").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Category pages 404 for unknown slugs and list only their own posts.
#[sqlx::test(migrations = "../../migrations")]
async fn blog_category_pages(pool: PgPool) {
    let category = folio_db::repositories::BlogCategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Engineering".to_string(),
            slug: None,
            description: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let tagged = CreateBlogPost {
        category_id: Some(category.id),
        ..published_post("Tagged Post")
    };
    BlogPostRepo::create(&pool, &tagged, None).await.unwrap();
    BlogPostRepo::create(&pool, &published_post("Untagged Post"), None)
        .await
        .unwrap();

    let html = body_text(
        get(common::build_test_app(pool.clone()), "/blog/category/engineering").await,
    )
    .await;
    assert!(html.contains("Tagged Post"));
    assert!(!html.contains("Untagged Post"));

    let response = get(common::build_test_app(pool), "/blog/category/nonsense").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Portfolio visibility
// ---------------------------------------------------------------------------

/// Inactive projects disappear from the list and 404 on detail.
#[sqlx::test(migrations = "../../migrations")]
async fn portfolio_visibility_filtering(pool: PgPool) {
    ProjectRepo::create(&pool, &project("Shown Project")).await.unwrap();

    let hidden = ProjectRepo::create(&pool, &project("Hidden Project"))
        .await
        .unwrap();
    ProjectRepo::update(
        &pool,
        hidden.id,
        &UpdateProject {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let html = body_text(get(common::build_test_app(pool.clone()), "/portfolio").await).await;
    assert!(html.contains("Shown Project"));
    assert!(!html.contains("Hidden Project"));

    let response = get(
        common::build_test_app(pool.clone()),
        "/portfolio/shown-project",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), "/portfolio/hidden-project").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The styles index only lists categories that contain active projects.
#[sqlx::test(migrations = "../../migrations")]
async fn portfolio_styles_skip_empty_categories(pool: PgPool) {
    PortfolioCategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Empty Stack".to_string(),
            slug: None,
            description: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let full = PortfolioCategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Busy Stack".to_string(),
            slug: None,
            description: None,
            is_active: None,
        },
    )
    .await
    .unwrap();
    ProjectRepo::create(
        &pool,
        &CreateProject {
            category_ids: Some(vec![full.id]),
            ..project("Stacked Project")
        },
    )
    .await
    .unwrap();

    let html = body_text(get(common::build_test_app(pool), "/portfolio/styles").await).await;
    assert!(html.contains("Busy Stack"));
    assert!(!html.contains("Empty Stack"));
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

/// A valid submit stores the inquiry and redirects (post/redirect/get).
#[sqlx::test(migrations = "../../migrations")]
async fn contact_form_submit(pool: PgPool) {
    let response = post_form(
        common::build_test_app(pool.clone()),
        "/contact",
        "name=Visitor&email=visitor%40example.com&phone=&subject=Hello&message=Let%27s+talk",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(location, "/contact?sent=1");

    let stored = InquiryRepo::list(&pool, None).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Visitor");
    assert_eq!(stored[0].status, "NEW");

    // The follow-up GET shows the success flash.
    let html = body_text(get(common::build_test_app(pool), "/contact?sent=1").await).await;
    assert!(html.contains("Thank you for your message"));
}

/// Invalid input re-renders the form with errors and keeps the values.
#[sqlx::test(migrations = "../../migrations")]
async fn contact_form_validation(pool: PgPool) {
    let response = post_form(
        common::build_test_app(pool.clone()),
        "/contact",
        "name=Visitor&email=not-an-email&phone=&subject=&message=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please correct the errors below"));
    assert!(html.contains("valid email address"));
    assert!(html.contains("Visitor"), "submitted values should be kept");

    let stored = InquiryRepo::list(&pool, None).await.unwrap();
    assert!(stored.is_empty(), "invalid input must not be stored");
}
