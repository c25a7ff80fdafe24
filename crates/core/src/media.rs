//! Upload filename rules and image-header inspection.

use std::io::Cursor;

/// File extensions accepted for gallery and featured-image uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Maximum accepted upload size in bytes (8 MiB).
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Lowercased extension of a filename, if any.
pub fn extension(filename: &str) -> Option<String> {
    let base = basename(filename);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether the filename carries an accepted image extension.
pub fn has_allowed_extension(filename: &str) -> bool {
    extension(filename)
        .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Strip any path components from a client-supplied filename.
///
/// Browsers normally send bare names, but the value is attacker-controlled;
/// both `/` and `\` are treated as separators.
pub fn basename(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// Replace characters outside `[A-Za-z0-9._-]` with `-` and strip path
/// components. Returns `fallback` when nothing usable remains.
pub fn sanitize_filename(filename: &str, fallback: &str) -> String {
    let name: String = basename(filename)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = name.trim_matches(['-', '.']);
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The `n`-th duplicate-name candidate: `photo.png` -> `photo-1.png`.
///
/// `n = 0` returns the name unchanged. Files without an extension get the
/// suffix appended at the end.
pub fn dedupe_candidate(filename: &str, n: u32) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{n}.{ext}"),
        _ => format!("{filename}-{n}"),
    }
}

/// Probe image dimensions from the file header without a full decode.
///
/// Returns `None` when the bytes are not a recognizable image, which doubles
/// as upload verification.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    reader.into_dimensions().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("Photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension(".hidden"), None);
    }

    #[test]
    fn allowed_extensions() {
        assert!(has_allowed_extension("shot.png"));
        assert!(has_allowed_extension("shot.WEBP"));
        assert!(!has_allowed_extension("shot.svg"));
        assert!(!has_allowed_extension("shot"));
    }

    #[test]
    fn basename_strips_paths() {
        assert_eq!(basename("../../etc/passwd"), "passwd");
        assert_eq!(basename("C:\\Users\\x\\shot.png"), "shot.png");
        assert_eq!(basename("shot.png"), "shot.png");
    }

    #[test]
    fn sanitize_replaces_and_falls_back() {
        assert_eq!(sanitize_filename("my shot (1).png", "img"), "my-shot--1-.png");
        assert_eq!(sanitize_filename("äöü", "img"), "img");
        assert_eq!(sanitize_filename("../..", "img"), "img");
    }

    #[test]
    fn dedupe_candidates() {
        assert_eq!(dedupe_candidate("shot.png", 0), "shot.png");
        assert_eq!(dedupe_candidate("shot.png", 2), "shot-2.png");
        assert_eq!(dedupe_candidate("noext", 1), "noext-1");
    }

    #[test]
    fn dimensions_of_encoded_png() {
        let img = image::RgbImage::new(4, 3);
        let mut buf = Vec::new();
        img.write_to(
            &mut Cursor::new(&mut buf),
            image::ImageFormat::Png,
        )
        .expect("encoding should succeed");

        assert_eq!(image_dimensions(&buf), Some((4, 3)));
    }

    #[test]
    fn dimensions_reject_non_image() {
        assert_eq!(image_dimensions(b"definitely not an image"), None);
    }
}
