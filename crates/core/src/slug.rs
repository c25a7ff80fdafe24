//! URL slug generation.
//!
//! Slugs are lowercase ASCII: alphanumeric runs joined by single hyphens.
//! Collision resolution (appending `-1`, `-2`, …) lives in the repositories,
//! which own the uniqueness queries; this module only produces candidates.

/// Maximum collision suffixes tried before giving up.
///
/// Repositories return a conflict error past this bound rather than loop
/// forever on a pathological table.
pub const MAX_SLUG_ATTEMPTS: u32 = 1000;

/// Derive a slug from a human-readable name or title.
///
/// Non-alphanumeric characters collapse into single hyphens; leading and
/// trailing hyphens are trimmed. An input with no alphanumeric characters
/// yields `"item"` so callers never end up with an empty slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("item");
    }
    slug
}

/// The `n`-th collision candidate for a base slug.
///
/// `n = 0` returns the base itself; `n = 1` returns `{base}-1`, and so on.
pub fn candidate(base: &str, n: u32) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}
