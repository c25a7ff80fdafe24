//! Schema-level checks: seed data, unique constraints, and session
//! visibility rules.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use folio_db::models::session::CreateSession;
use folio_db::models::user::CreateUser;
use folio_db::repositories::{RoleRepo, SessionRepo, UserRepo};

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$fake".to_string(),
        role_id: 2,
        first_name: String::new(),
        last_name: String::new(),
    }
}

/// Migrations seed the two roles.
#[sqlx::test(migrations = "../../migrations")]
async fn roles_are_seeded(pool: PgPool) {
    folio_db::health_check(&pool).await.unwrap();

    let roles = RoleRepo::list(&pool).await.unwrap();
    let names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["admin", "staff"]);

    assert_eq!(RoleRepo::resolve_name(&pool, roles[0].id).await.unwrap(), "admin");
}

/// Duplicate usernames and emails violate named unique constraints.
#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_username_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("taken")).await.unwrap();

    let err = UserRepo::create(&pool, &new_user("taken")).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_users_username"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

/// Revoked and expired sessions are invisible to the refresh lookup.
#[sqlx::test(migrations = "../../migrations")]
async fn session_lookup_excludes_dead_sessions(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("sessions")).await.unwrap();

    let active = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-active".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-expired".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "hash-active")
        .await
        .unwrap()
        .is_some());
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "hash-expired")
        .await
        .unwrap()
        .is_none());

    // Revocation hides the active one too.
    assert!(SessionRepo::revoke(&pool, active.id).await.unwrap());
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "hash-active")
        .await
        .unwrap()
        .is_none());

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 0);
}
