//! First-run provisioning: the seed admin account.

use folio_core::roles::ROLE_ADMIN;
use folio_db::models::user::CreateUser;
use folio_db::repositories::{RoleRepo, UserRepo};
use folio_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};

/// Startup provisioning failure. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Create the seed admin user from `ADMIN_USERNAME` / `ADMIN_PASSWORD`
/// (plus optional `ADMIN_EMAIL`) if that username does not exist yet.
///
/// A no-op when the variables are unset or the user already exists, so it
/// is safe to run on every startup.
pub async fn ensure_admin_user(pool: &DbPool) -> Result<(), BootstrapError> {
    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::debug!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(());
    };

    if UserRepo::find_by_username(pool, &username).await?.is_some() {
        tracing::debug!(%username, "Admin user already exists, skipping bootstrap");
        return Ok(());
    }

    validate_password_strength(&password)
        .map_err(|msg| BootstrapError::Invalid(format!("ADMIN_PASSWORD rejected: {msg}")))?;

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| format!("{username}@localhost"));
    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| BootstrapError::Invalid("admin role missing from roles table".into()))?;

    let password_hash = hash_password(&password)
        .map_err(|e| BootstrapError::Invalid(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username,
            email,
            password_hash,
            role_id: role.id,
            first_name: String::new(),
            last_name: String::new(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Seed admin user created");
    Ok(())
}
