//! HTTP-level integration tests for authentication and authorization:
//! login, lockout, token refresh, logout, and role gating of the staff and
//! admin route trees.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, get_auth, login_token, post_json, post_json_auth,
    ROLE_ID_ADMIN, ROLE_ID_STAFF,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns tokens and user info.
#[sqlx::test(migrations = "../../migrations")]
async fn login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "loginuser", ROLE_ID_STAFF).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["role"], "staff");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../../migrations")]
async fn login_wrong_password(pool: PgPool) {
    create_test_user(&pool, "wrongpw", ROLE_ID_STAFF).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown username returns 401 (same message as wrong
/// password, no user enumeration).
#[sqlx::test(migrations = "../../migrations")]
async fn login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Five consecutive failures lock the account; the correct password is then
/// rejected with 403 until the lock expires.
#[sqlx::test(migrations = "../../migrations")]
async fn login_lockout_after_failures(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "lockme", ROLE_ID_STAFF).await;

    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "username": "lockme", "password": "bad" });
        let response = post_json(app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "lockme", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(
        response.status(),
        StatusCode::FORBIDDEN,
        "locked account must reject even the correct password"
    );
}

/// A deactivated account cannot log in.
#[sqlx::test(migrations = "../../migrations")]
async fn login_deactivated_account(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "gone", ROLE_ID_STAFF).await;
    folio_db::repositories::UserRepo::deactivate(&pool, user.id)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "gone", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh / logout
// ---------------------------------------------------------------------------

/// Refresh rotates the token: the new pair works, the old refresh token is
/// dead.
#[sqlx::test(migrations = "../../migrations")]
async fn refresh_rotates_token(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresher", ROLE_ID_STAFF).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": "refresher", "password": password });
    let login = body_json(post_json(app, "/api/v1/auth/login", body).await).await;
    let old_refresh = login["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert!(refreshed["access_token"].is_string());

    // The old refresh token was revoked by the rotation.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every session for the user.
#[sqlx::test(migrations = "../../migrations")]
async fn logout_revokes_sessions(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "leaver", ROLE_ID_STAFF).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": "leaver", "password": password });
    let login = body_json(post_json(app, "/api/v1/auth/login", body).await).await;
    let access = login["access_token"].as_str().unwrap().to_string();
    let refresh = login["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/auth/logout", &access, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Route gating
// ---------------------------------------------------------------------------

/// Staff routes reject anonymous requests with 401.
#[sqlx::test(migrations = "../../migrations")]
async fn staff_routes_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/staff/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Staff routes reject garbage tokens with 401.
#[sqlx::test(migrations = "../../migrations")]
async fn staff_routes_reject_bad_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/staff/dashboard", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Admin routes reject the staff role with 403 but accept admins.
#[sqlx::test(migrations = "../../migrations")]
async fn admin_routes_reject_staff_role(pool: PgPool) {
    let (_staff, staff_pw) = create_test_user(&pool, "plainstaff", ROLE_ID_STAFF).await;
    let (_admin, admin_pw) = create_test_user(&pool, "realadmin", ROLE_ID_ADMIN).await;

    let staff_token = login_token(common::build_test_app(pool.clone()), "plainstaff", &staff_pw).await;
    let admin_token = login_token(common::build_test_app(pool.clone()), "realadmin", &admin_pw).await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/users", &staff_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(common::build_test_app(pool), "/api/v1/admin/users", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Staff tokens work on staff routes.
#[sqlx::test(migrations = "../../migrations")]
async fn staff_token_reaches_dashboard(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "dasher", ROLE_ID_STAFF).await;
    let token = login_token(common::build_test_app(pool.clone()), "dasher", &password).await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/staff/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["new_inquiries"], 0);
    assert_eq!(json["data"]["active_projects"], 0);
}
