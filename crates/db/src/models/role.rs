use serde::Serialize;
use sqlx::FromRow;

use folio_core::types::DbId;

/// A role row from the `roles` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
}
