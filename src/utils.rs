//! Text helpers shared by the extractor, the renderers and logging.
//!
//! - Whitespace collapsing and hard character truncation for summaries
//! - Title sanitising so titles are always safe inside XML
//! - Log-friendly truncation of long strings

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Anything that is not a word character, whitespace, hyphen, pipe or ampersand.
static TITLE_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s\-|&]").unwrap());

/// Marker appended to text cut by [`truncate_with_ellipsis`].
pub const ELLIPSIS: &str = "...";

/// Replace every run of whitespace (spaces, tabs, newlines) with one space.
///
/// Leading and trailing whitespace is collapsed too, not removed; callers that
/// want trimmed text trim before or after.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").into_owned()
}

/// Cut `s` to at most `max` characters, appending [`ELLIPSIS`] when anything
/// was cut.
///
/// The cut is a hard character boundary, not word-aware.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
/// assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
/// ```
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}{}", &s[..byte_idx], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Strip characters that could break an XML feed from a page title.
pub fn sanitize_title(title: &str) -> String {
    TITLE_DISALLOWED.replace_all(title, "").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}…(+{} bytes)", &s[..byte_idx], s.len() - byte_idx),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\n\n\tc"), "a b c");
        assert_eq!(collapse_whitespace("  padded  "), " padded ");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_truncate_with_ellipsis_exact_limit() {
        let s = "x".repeat(500);
        assert_eq!(truncate_with_ellipsis(&s, 500), s);
    }

    #[test]
    fn test_truncate_with_ellipsis_over_limit() {
        let s = "x".repeat(650);
        let out = truncate_with_ellipsis(&s, 500);
        assert_eq!(out.chars().count(), 503);
        assert!(out.ends_with("x..."));
    }

    #[test]
    fn test_truncate_with_ellipsis_multibyte() {
        assert_eq!(truncate_with_ellipsis("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Hello, World!"), "Hello World");
        assert_eq!(sanitize_title("News | Site & Co - Home"), "News | Site & Co - Home");
        assert_eq!(sanitize_title("<script>\"x\"</script>"), "scriptxscript");
        assert_eq!(sanitize_title("Café_2025"), "Café_2025");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }
}
