//! Uploaded-file storage under the media root.
//!
//! Stored paths are always relative, `/`-separated, and free of `..`
//! components; the same strings go into the database and into `/media/...`
//! URLs. Gallery files live under `portfolio_gallery/{project_slug}/`,
//! promoted featured images under `portfolio_featured_images/`.

use std::path::{Component, Path, PathBuf};

use folio_core::media::{dedupe_candidate, sanitize_filename};

use crate::error::AppError;

/// Subdirectory for project gallery uploads (suffixed with the project slug).
pub const GALLERY_DIR: &str = "portfolio_gallery";

/// Subdirectory for promoted/uploaded featured images.
pub const FEATURED_DIR: &str = "portfolio_featured_images";

/// Subdirectory for blog featured images.
pub const BLOG_DIR: &str = "blog_featured_images";

/// Filesystem operations rooted at the configured media directory.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The absolute path a stored relative path maps to.
    ///
    /// Rejects absolute paths and any `..` component; stored paths are
    /// produced by this module, so a violation means a tampered database
    /// value and is refused.
    fn resolve(&self, rel_path: &str) -> Result<PathBuf, AppError> {
        let rel = Path::new(rel_path);
        let safe = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::BadRequest(format!(
                "Invalid media path: {rel_path}"
            )));
        }
        Ok(self.root.join(rel))
    }

    /// Store `bytes` under `dir` with a sanitized, de-duplicated filename.
    ///
    /// Returns the relative media path to persist. Duplicate names get a
    /// `-1`, `-2`, … suffix before the extension.
    pub async fn save(
        &self,
        dir: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let clean = sanitize_filename(filename, "upload.bin");

        let dir_abs = self.resolve(dir)?;
        tokio::fs::create_dir_all(&dir_abs)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;

        let mut chosen = None;
        for n in 0..1000 {
            let name = dedupe_candidate(&clean, n);
            let target = dir_abs.join(&name);
            match tokio::fs::try_exists(&target).await {
                Ok(false) => {
                    chosen = Some(name);
                    break;
                }
                Ok(true) => continue,
                Err(e) => {
                    return Err(AppError::InternalError(format!(
                        "Failed to probe media path: {e}"
                    )))
                }
            }
        }
        let name = chosen.ok_or_else(|| {
            AppError::InternalError(format!("No free filename for {clean} in {dir}"))
        })?;

        tokio::fs::write(dir_abs.join(&name), bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

        Ok(format!("{dir}/{name}"))
    }

    /// Copy an existing stored file into another media directory, returning
    /// the new relative path. Used when promoting a gallery image to the
    /// featured slot.
    pub async fn copy(&self, src_rel: &str, dest_dir: &str) -> Result<String, AppError> {
        let src = self.resolve(src_rel)?;
        let bytes = tokio::fs::read(&src)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to read {src_rel}: {e}")))?;
        let filename = src_rel.rsplit('/').next().unwrap_or(src_rel);
        self.save(dest_dir, filename, &bytes).await
    }

    /// Best-effort file removal; a missing file is not an error.
    pub async fn remove(&self, rel_path: &str) {
        let Ok(abs) = self.resolve(rel_path) else {
            tracing::warn!(rel_path, "refusing to remove invalid media path");
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&abs).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(rel_path, error = %e, "failed to remove media file");
            }
        }
    }

    /// Basename of a stored relative path.
    pub fn file_name(rel_path: &str) -> &str {
        rel_path.rsplit('/').next().unwrap_or(rel_path)
    }
}
