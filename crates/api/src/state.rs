use std::sync::Arc;

use handlebars::Handlebars;

use crate::config::ServerConfig;
use crate::media::MediaStore;
use crate::notify::InquiryMailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Compiled page templates.
    pub templates: Arc<Handlebars<'static>>,
    /// Uploaded-file storage rooted at `config.media_root`.
    pub media: Arc<MediaStore>,
    /// New-inquiry email notifications; `None` when SMTP is not configured.
    pub mailer: Option<Arc<InquiryMailer>>,
}
