//! Title chain: `<title>` text, else a placeholder naming the URL.

use super::{ExtractError, Page, Strategy, element_text, resolve, selector};
use crate::utils::sanitize_title;

const CHAIN: &[Strategy<String>] = &[title_element];

/// Resolve the page title and strip characters unsafe for XML.
pub fn resolve_title(page: &Page<'_>) -> Result<String, ExtractError> {
    let title = resolve(page, CHAIN)?.unwrap_or_else(|| format!("Untitled Page: {}", page.url));
    Ok(sanitize_title(&title))
}

fn title_element(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    let sel = selector("title")?;
    Ok(page
        .document
        .select(&sel)
        .next()
        .map(|el| element_text(el).trim().to_string())
        .filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn title_of(html: &str) -> String {
        let doc = Html::parse_document(html);
        resolve_title(&Page::new(&doc, "https://example.com/a")).unwrap()
    }

    #[test]
    fn test_title_trimmed() {
        assert_eq!(title_of("<title>\n  Hello  \n</title>"), "Hello");
    }

    #[test]
    fn test_title_keeps_pipes_and_ampersands() {
        assert_eq!(title_of("<title>Tom &amp; Jerry | Home</title>"), "Tom & Jerry | Home");
    }

    #[test]
    fn test_title_strips_punctuation() {
        assert_eq!(title_of("<title>What's new? (2025)</title>"), "Whats new 2025");
    }

    #[test]
    fn test_missing_title_uses_url_placeholder() {
        assert_eq!(title_of("<p>no title</p>"), "Untitled Page httpsexamplecoma");
    }

    #[test]
    fn test_blank_title_uses_url_placeholder() {
        assert_eq!(title_of("<title>   </title>"), "Untitled Page httpsexamplecoma");
    }
}
