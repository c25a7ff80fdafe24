//! Text helpers for excerpts and meta descriptions.

/// Remove HTML tags, collapsing the result's whitespace.
///
/// Content fields may hold rich-text HTML; public list pages and meta
/// descriptions want plain text. This is a tag-stripper, not a sanitizer:
/// it does not decode entities or defend against malformed markup beyond
/// an unclosed `<`, which swallows the remainder.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters on a word boundary,
/// appending an ellipsis when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end())
}

/// Plain-text summary of a rich-text field, for meta descriptions and
/// excerpt fallbacks.
pub fn summarize(html: &str, max_chars: usize) -> String {
    truncate_chars(&strip_tags(html), max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        assert_eq!(
            strip_tags("<p>Hello <b>world</b></p>\n<p>again</p>"),
            "Hello world again"
        );
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("short", 40), "short");
    }

    #[test]
    fn truncates_on_word_boundary() {
        assert_eq!(truncate_chars("the quick brown fox jumps", 14), "the quick…");
    }

    #[test]
    fn summarize_combines_both() {
        let html = "<p>A long description of the project that keeps going</p>";
        let s = summarize(html, 20);
        assert!(s.ends_with('…'));
        assert!(!s.contains('<'));
    }
}
