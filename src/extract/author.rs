//! Author chain.
//!
//! 1. `meta[name=author]`
//! 2. `meta[property=og:site_name]`
//! 3. a short byline element (`[rel=author]`, `[itemprop=author]`, `.byline`, ...)
//! 4. `Unknown Source`

use super::{ExtractError, Page, Strategy, element_text, first_attr, resolve, selector};
use crate::utils::collapse_whitespace;

pub const UNKNOWN_AUTHOR: &str = "Unknown Source";

const BYLINE_SELECTORS: &[&str] = &[
    "[rel=\"author\"]",
    "[itemprop=\"author\"]",
    ".byline",
    ".author-name",
    ".author",
    "[class*=\"byline\"]",
];

// Longer matches are usually a whole author bio box, not a name.
const MAX_BYLINE_CHARS: usize = 100;

const CHAIN: &[Strategy<String>] = &[meta_author, og_site_name, byline];

pub fn resolve_author(page: &Page<'_>) -> Result<String, ExtractError> {
    Ok(resolve(page, CHAIN)?.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
}

fn meta_author(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    first_attr(page, "meta[name=\"author\"]", "content")
}

fn og_site_name(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    first_attr(page, "meta[property=\"og:site_name\"]", "content")
}

fn byline(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    for css in BYLINE_SELECTORS {
        let sel = selector(css)?;
        for el in page.document.select(&sel) {
            if el.value().name() == "meta" || el.value().name() == "link" {
                continue;
            }
            let text = collapse_whitespace(&element_text(el));
            let text = text.trim();
            let text = text
                .strip_prefix("By ")
                .or_else(|| text.strip_prefix("by "))
                .unwrap_or(text)
                .trim();
            if !text.is_empty() && text.chars().count() <= MAX_BYLINE_CHARS {
                return Ok(Some(text.to_string()));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn author_of(html: &str) -> String {
        let doc = Html::parse_document(html);
        resolve_author(&Page::new(&doc, "https://example.com/")).unwrap()
    }

    #[test]
    fn test_meta_author_wins() {
        let html = r#"<meta property="og:site_name" content="Site">
            <meta name="author" content=" Jane ">"#;
        assert_eq!(author_of(html), "Jane");
    }

    #[test]
    fn test_site_name_fallback() {
        assert_eq!(author_of(r#"<meta property="og:site_name" content="Example Daily">"#), "Example Daily");
    }

    #[test]
    fn test_empty_meta_defers() {
        let html = r#"<meta name="author" content="  ">
            <meta property="og:site_name" content="Example Daily">"#;
        assert_eq!(author_of(html), "Example Daily");
    }

    #[test]
    fn test_byline_heuristic() {
        let html = r#"<body><span class="post-byline">By   Sam
            Writer</span></body>"#;
        assert_eq!(author_of(html), "Sam Writer");
    }

    #[test]
    fn test_long_byline_ignored() {
        let bio = "word ".repeat(40);
        let html = format!(r#"<div class="author">{}</div>"#, bio);
        assert_eq!(author_of(&html), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_unknown_default() {
        assert_eq!(author_of("<p>nothing</p>"), UNKNOWN_AUTHOR);
    }
}
