//! Handlers for the authenticated staff user's own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use folio_core::error::CoreError;
use folio_db::models::user::UserResponse;
use folio_db::repositories::{RoleRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for `PUT /staff/profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(max = 150))]
    pub first_name: String,
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

/// Request body for `POST /staff/profile/password`.
#[derive(Debug, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Load the authenticated user's row and resolve its role name.
async fn load_own(state: &AppState, user_id: i64) -> AppResult<UserResponse> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role))
}

/// GET /api/v1/staff/profile
pub async fn get(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let profile = load_own(&state, user.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/staff/profile
///
/// Update own name and email.
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<ProfileUpdate>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    UserRepo::update_profile(
        &state.pool,
        user.user_id,
        &input.first_name,
        &input.last_name,
        &input.email,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let profile = load_own(&state, user.user_id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/staff/profile/password
///
/// Change own password after verifying the current one. Existing access
/// tokens stay valid until they expire; refresh sessions are untouched.
pub async fn change_password(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<PasswordChange>,
) -> AppResult<StatusCode> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let current_ok = verify_password(&input.current_password, &record.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::Core(CoreError::Forbidden(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password_hash(&state.pool, user.user_id, &new_hash).await?;

    tracing::info!(user_id = user.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
