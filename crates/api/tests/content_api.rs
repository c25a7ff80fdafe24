//! HTTP-level integration tests for the staff content-management API:
//! projects with category assignment, categories, blog posts with the
//! publish workflow, and inquiry triage.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get_auth, login_token, post_json, post_json_auth,
    put_json_auth, ROLE_ID_STAFF,
};
use sqlx::PgPool;

/// Create a staff user and return a valid access token.
async fn staff_token(pool: &PgPool) -> String {
    let (_user, password) = create_test_user(pool, "editor", ROLE_ID_STAFF).await;
    login_token(common::build_test_app(pool.clone()), "editor", &password).await
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Creating a project derives the slug and assigns categories.
#[sqlx::test(migrations = "../../migrations")]
async fn project_create_with_categories(pool: PgPool) {
    let token = staff_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/staff/portfolio-categories",
        &token,
        serde_json::json!({ "name": "Rust" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category = body_json(response).await;
    assert_eq!(category["slug"], "rust");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/staff/projects",
        &token,
        serde_json::json!({
            "title": "My First Project!",
            "short_description": "A demo.",
            "technologies": "Rust, Axum",
            "category_ids": [category["id"]],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["slug"], "my-first-project");
    assert_eq!(project["categories"][0]["name"], "Rust");
    assert_eq!(project["status"], "COMPLETED");
}

/// Slug collisions get numeric suffixes, repeatedly.
#[sqlx::test(migrations = "../../migrations")]
async fn project_slug_collision_suffixes(pool: PgPool) {
    let token = staff_token(&pool).await;

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/staff/projects",
            &token,
            serde_json::json!({ "title": "Same Title" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let project = body_json(response).await;
        slugs.push(project["slug"].as_str().unwrap().to_string());
    }

    assert_eq!(slugs, ["same-title", "same-title-1", "same-title-2"]);
}

/// Updating without a slug keeps the slug, even when the title changes.
#[sqlx::test(migrations = "../../migrations")]
async fn project_update_preserves_slug(pool: PgPool) {
    let token = staff_token(&pool).await;

    let created = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/staff/projects",
            &token,
            serde_json::json!({ "title": "Original Name" }),
        )
        .await,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/staff/projects/{}", created["id"]),
        &token,
        serde_json::json!({ "title": "Renamed Completely" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Renamed Completely");
    assert_eq!(updated["slug"], "original-name");
}

/// Unknown status values are rejected before reaching the database.
#[sqlx::test(migrations = "../../migrations")]
async fn project_rejects_unknown_status(pool: PgPool) {
    let token = staff_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/staff/projects",
        &token,
        serde_json::json!({ "title": "Bad Status", "status": "SHIPPED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Empty titles fail validation.
#[sqlx::test(migrations = "../../migrations")]
async fn project_rejects_empty_title(pool: PgPool) {
    let token = staff_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/staff/projects",
        &token,
        serde_json::json!({ "title": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Duplicate category names surface as 409 via the unique constraint.
#[sqlx::test(migrations = "../../migrations")]
async fn category_duplicate_name_conflicts(pool: PgPool) {
    let token = staff_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/staff/blog-categories",
        &token,
        serde_json::json!({ "name": "Announcements" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/staff/blog-categories",
        &token,
        serde_json::json!({ "name": "Announcements" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Same name in different tables is fine, and slugs collide independently.
#[sqlx::test(migrations = "../../migrations")]
async fn category_tables_are_independent(pool: PgPool) {
    let token = staff_token(&pool).await;

    let blog = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/staff/blog-categories",
            &token,
            serde_json::json!({ "name": "Rust" }),
        )
        .await,
    )
    .await;
    let portfolio = body_json(
        post_json_auth(
            common::build_test_app(pool),
            "/api/v1/staff/portfolio-categories",
            &token,
            serde_json::json!({ "name": "Rust" }),
        )
        .await,
    )
    .await;

    assert_eq!(blog["slug"], "rust");
    assert_eq!(portfolio["slug"], "rust");
}

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

/// Publishing stamps `published_at` once; unpublishing preserves it.
#[sqlx::test(migrations = "../../migrations")]
async fn post_publish_workflow(pool: PgPool) {
    let token = staff_token(&pool).await;

    let created = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/staff/posts",
            &token,
            serde_json::json!({ "title": "Hello World", "content": "<p>hi</p>" }),
        )
        .await,
    )
    .await;
    assert_eq!(created["status"], "DRAFT");
    assert!(created["published_at"].is_null());

    let id = created["id"].as_i64().unwrap();

    let published = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/staff/posts/{id}/publish"),
            &token,
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(published["status"], "PUBLISHED");
    let first_publish = published["published_at"].as_str().unwrap().to_string();

    let unpublished = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/staff/posts/{id}/unpublish"),
            &token,
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(unpublished["status"], "DRAFT");
    assert_eq!(
        unpublished["published_at"].as_str().unwrap(),
        first_publish,
        "unpublish must not clear the publish timestamp"
    );

    // Republishing keeps the original timestamp.
    let republished = body_json(
        post_json_auth(
            common::build_test_app(pool),
            &format!("/api/v1/staff/posts/{id}/publish"),
            &token,
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(republished["published_at"].as_str().unwrap(), first_publish);
}

/// The creating staff user becomes the post author.
#[sqlx::test(migrations = "../../migrations")]
async fn post_author_is_request_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "author", ROLE_ID_STAFF).await;
    let token = login_token(common::build_test_app(pool.clone()), "author", &password).await;

    let created = body_json(
        post_json_auth(
            common::build_test_app(pool),
            "/api/v1/staff/posts",
            &token,
            serde_json::json!({ "title": "Bylined" }),
        )
        .await,
    )
    .await;
    assert_eq!(created["author_id"], user.id);
}

// ---------------------------------------------------------------------------
// Inquiries
// ---------------------------------------------------------------------------

/// Public submission, staff triage, and the status filter.
#[sqlx::test(migrations = "../../migrations")]
async fn inquiry_lifecycle(pool: PgPool) {
    let token = staff_token(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/contact",
        serde_json::json!({
            "name": "Visitor",
            "email": "visitor@example.com",
            "message": "I have a project for you.",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let inquiry = body_json(response).await;
    assert_eq!(inquiry["data"]["status"], "NEW");
    let id = inquiry["data"]["id"].as_i64().unwrap();

    // Staff move it through the workflow; visitor fields stay frozen.
    let updated = body_json(
        put_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/staff/inquiries/{id}"),
            &token,
            serde_json::json!({ "status": "RESPONDED", "internal_notes": "replied by email" }),
        )
        .await,
    )
    .await;
    assert_eq!(updated["status"], "RESPONDED");
    assert_eq!(updated["internal_notes"], "replied by email");
    assert_eq!(updated["email"], "visitor@example.com");

    // The status filter only returns matching inquiries.
    let listed = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/staff/inquiries?status=RESPONDED",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let empty = body_json(
        get_auth(
            common::build_test_app(pool),
            "/api/v1/staff/inquiries?status=NEW",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(empty["data"].as_array().unwrap().len(), 0);
}

/// Malformed public submissions are rejected.
#[sqlx::test(migrations = "../../migrations")]
async fn inquiry_validation(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/contact",
        serde_json::json!({ "name": "X", "email": "not-an-email", "message": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/contact",
        serde_json::json!({ "name": "X", "email": "x@example.com", "message": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An unknown status filter is rejected, not silently ignored.
    let token = staff_token(&pool).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/staff/inquiries?status=SPAM",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Deleting an inquiry removes it.
#[sqlx::test(migrations = "../../migrations")]
async fn inquiry_delete(pool: PgPool) {
    let token = staff_token(&pool).await;

    let inquiry = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/contact",
            serde_json::json!({
                "name": "V", "email": "v@example.com", "message": "hello"
            }),
        )
        .await,
    )
    .await;
    let id = inquiry["data"]["id"].as_i64().unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/staff/inquiries/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/staff/inquiries/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
