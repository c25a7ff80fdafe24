use crate::types::DbId;

/// Domain-level error shared by the db and api crates.
///
/// HTTP mapping happens in the api crate; repositories and helpers return
/// this (or `sqlx::Error`) and let the handler layer translate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record that was asked for by id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. duplicate name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Anything unexpected. The message is logged, never sent to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}
