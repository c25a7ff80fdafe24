//! Compiled Handlebars templates for the public pages.
//!
//! Templates are embedded at compile time from the crate's `templates/`
//! directory and registered under their file stem (`home.hbs` -> `home`).
//! `layout.hbs` is used as a partial wrapping every page body.

use handlebars::{handlebars_helper, Handlebars};
use include_dir::{include_dir, Dir};
use serde_json::Value;

static TEMPLATES_DIR: Dir<'_> = include_dir!("templates");

/// Render an RFC 3339 timestamp as a human date, e.g. `Aug 6, 2026`.
/// Non-timestamp input renders as an empty string.
fn format_date(value: &Value) -> String {
    value
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Build the template registry with all embedded templates and helpers.
///
/// # Panics
///
/// Panics on a malformed embedded template, which is a build defect and
/// should fail at startup.
pub fn build_templates() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(date: |v: Value| format_date(&v));
    handlebars.register_helper("date", Box::new(date));

    handlebars_helper!(media_url: |path: String| format!("/media/{path}"));
    handlebars.register_helper("media_url", Box::new(media_url));

    for file in TEMPLATES_DIR.files() {
        let Some(name) = file.path().file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let contents = file
            .contents_utf8()
            .unwrap_or_else(|| panic!("template {name} is not UTF-8"));
        handlebars
            .register_template_string(name, contents)
            .unwrap_or_else(|e| panic!("template {name} failed to compile: {e}"));
    }

    handlebars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_templates_compile() {
        let templates = build_templates();
        for name in ["layout", "home", "about", "contact", "blog_list", "blog_detail",
                     "portfolio_list", "portfolio_detail", "portfolio_categories", "not_found"]
        {
            assert!(templates.has_template(name), "missing template {name}");
        }
    }

    #[test]
    fn date_helper_formats_rfc3339() {
        assert_eq!(format_date(&json!("2026-08-06T12:00:00Z")), "Aug 6, 2026");
        assert_eq!(format_date(&json!(null)), "");
    }

    #[test]
    fn not_found_renders() {
        let templates = build_templates();
        let html = templates
            .render("not_found", &json!({"site_name": "Folio", "page_title": "Not Found"}))
            .expect("render should succeed");
        assert!(html.contains("404"));
    }
}
