//! Preview extraction
//!
//! Derives a short plain-text excerpt from rendered HTML. This is not a
//! security sanitizer: tag stripping is bounded and only serves listing
//! contexts where markup is unwanted.

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum preview length in characters, ellipsis included
pub const MAX_PREVIEW_LENGTH: usize = 300;

/// Upper bound on tag-stripping passes over the working text
const MAX_STRIP_PASSES: usize = 3;

lazy_static! {
    static ref STYLE_RE: Regex = Regex::new(r"(?s)<style[^>]*?>.*?</style>").unwrap();
    static ref SCRIPT_RE: Regex = Regex::new(r"(?s)<script[^>]*?>.*?</script>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"</?[^>]*?>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Resolve the preview for a post.
///
/// A non-empty explicit override is returned unchanged, regardless of length
/// or embedded markup. Otherwise an excerpt is derived from the rendered
/// content: style and script blocks removed, remaining tags stripped, runs of
/// whitespace collapsed, then truncated to [`MAX_PREVIEW_LENGTH`] characters
/// with a trailing ellipsis.
pub fn resolve_preview(override_preview: Option<&str>, content: &str) -> String {
    if let Some(p) = override_preview {
        if !p.is_empty() {
            return p.to_string();
        }
    }

    let text = STYLE_RE.replace_all(content, "");
    let mut text = SCRIPT_RE.replace_all(&text, "").into_owned();

    for _ in 0..MAX_STRIP_PASSES {
        if !TAG_RE.is_match(&text) {
            break;
        }
        text = TAG_RE.replace_all(&text, "").into_owned();
    }

    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = text.trim();

    truncate(text)
}

/// Truncate to the preview budget, replacing the last three characters with
/// an ellipsis so the total length stays exactly at the maximum.
fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_PREVIEW_LENGTH {
        return text.to_string();
    }

    let mut out: String = text.chars().take(MAX_PREVIEW_LENGTH - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_verbatim() {
        let preview = resolve_preview(Some("<b>keep me</b>"), "<p>ignored body</p>");
        assert_eq!(preview, "<b>keep me</b>");
    }

    #[test]
    fn test_long_override_not_truncated() {
        let long = "x".repeat(1000);
        assert_eq!(resolve_preview(Some(&long), "body"), long);
    }

    #[test]
    fn test_empty_override_falls_back_to_content() {
        let preview = resolve_preview(Some(""), "<p>actual text</p>");
        assert_eq!(preview, "actual text");
    }

    #[test]
    fn test_strips_style_and_script_blocks() {
        let content = "<style type=\"text/css\">\nbody { color: red }\n</style><p>hello</p><script>\nalert(1)\n</script>";
        assert_eq!(resolve_preview(None, content), "hello");
    }

    #[test]
    fn test_strips_nested_tags() {
        let content = "<div><p>one <em>two</em> three</p></div>";
        assert_eq!(resolve_preview(None, content), "one two three");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let content = "<p>one</p>\n\n   <p>two\t\tthree</p>\n";
        assert_eq!(resolve_preview(None, content), "one two three");
    }

    #[test]
    fn test_truncation_is_exactly_max_length() {
        let content = "word ".repeat(200);
        let preview = resolve_preview(None, &content);
        assert_eq!(preview.chars().count(), MAX_PREVIEW_LENGTH);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_short_content_untruncated() {
        let preview = resolve_preview(None, "<p>short</p>");
        assert_eq!(preview, "short");
        assert!(preview.chars().count() <= MAX_PREVIEW_LENGTH);
    }

    #[test]
    fn test_empty_content_yields_empty_preview() {
        assert_eq!(resolve_preview(None, ""), "");
    }

    #[test]
    fn test_multibyte_content_truncates_on_char_boundary() {
        let content = "日本語のテキスト".repeat(100);
        let preview = resolve_preview(None, &content);
        assert_eq!(preview.chars().count(), MAX_PREVIEW_LENGTH);
        assert!(preview.ends_with("..."));
    }
}
