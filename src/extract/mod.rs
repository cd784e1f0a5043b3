//! Metadata extraction from fetched HTML.
//!
//! Every field of a [`Record`] is resolved independently through an ordered
//! chain of strategies. A strategy looks at the parsed page and either yields
//! a non-empty value or defers with `Ok(None)`; the first value wins and the
//! rest of the chain is skipped. An `Err` aborts extraction for the whole
//! page and becomes a `parseFailed` record upstream.
//!
//! # Chains
//!
//! | Field | Module | Fallback |
//! |-------|--------|----------|
//! | title | [`title`] | `Untitled Page: <url>` |
//! | author | [`author`] | `Unknown Source` |
//! | description | [`description`] | `No robust summary found.` |
//! | image | [`image`] | none |
//! | publication date | [`date`] | the caller's build instant |

pub mod author;
pub mod date;
pub mod description;
pub mod image;
pub mod title;

use crate::models::{Record, RecordStatus};
use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Why a fetched page could not be turned into a record.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A CSS selector used by a strategy failed to compile.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    /// The response body does not contain any markup.
    #[error("response body is not HTML ({0})")]
    NotHtml(String),
}

/// A parsed page together with the URL it was configured under.
pub struct Page<'a> {
    pub document: &'a Html,
    /// The configured site URL, used for fallbacks and relative links.
    pub url: &'a str,
    /// `url` parsed for joining; `None` if it does not parse.
    pub base: Option<Url>,
}

impl<'a> Page<'a> {
    pub fn new(document: &'a Html, url: &'a str) -> Self {
        Self {
            document,
            url,
            base: Url::parse(url).ok(),
        }
    }
}

/// One step in a field's fallback chain.
pub type Strategy<T> = fn(&Page<'_>) -> Result<Option<T>, ExtractError>;

/// Run `chain` in order and keep the first value produced.
pub fn resolve<T>(page: &Page<'_>, chain: &[Strategy<T>]) -> Result<Option<T>, ExtractError> {
    for strategy in chain {
        if let Some(value) = strategy(page)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Extract a [`Record`] from raw HTML fetched from `source_url`.
///
/// The record's `url` is always `source_url`, never a canonical link
/// declared inside the page. `now` stands in for the publication date when
/// the page declares none.
#[instrument(level = "debug", skip(html), fields(bytes = html.len()))]
pub fn extract(html: &str, source_url: &str, now: DateTime<FixedOffset>) -> Result<Record, ExtractError> {
    if !html.contains('<') {
        return Err(ExtractError::NotHtml(format!("{} bytes without markup", html.len())));
    }

    let document = Html::parse_document(html);
    let page = Page::new(&document, source_url);

    let title = title::resolve_title(&page)?;
    let author = author::resolve_author(&page)?;
    let description = description::resolve_description(&page)?;
    let image_url = image::resolve_image(&page)?;
    let pub_date = date::resolve_pub_date(&page, now)?;

    debug!(%title, %author, has_image = image_url.is_some(), %pub_date, "Extracted page metadata");

    Ok(Record {
        title,
        url: source_url.to_string(),
        source_name: author.clone(),
        author,
        description,
        image_url,
        pub_date,
        status: RecordStatus::Ok,
    })
}

/// Compile a CSS selector, mapping failures to [`ExtractError::Selector`].
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed value of `attr` on the first element matching `css`, if non-empty.
pub(crate) fn first_attr(page: &Page<'_>, css: &str, attr: &str) -> Result<Option<String>, ExtractError> {
    let sel = selector(css)?;
    Ok(page
        .document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string))
}

/// All text beneath `el`, concatenated as it appears in the document.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://example.com/articles/x";

    #[test]
    fn test_minimal_page() {
        let html = r#"<html><head>
            <title>Hello</title>
            <meta property="og:description" content="World">
        </head><body></body></html>"#;

        let now = Utc::now().fixed_offset();
        let record = extract(html, URL, now).unwrap();

        assert_eq!(record.title, "Hello");
        assert_eq!(record.description, "World");
        assert_eq!(record.author, "Unknown Source");
        assert_eq!(record.source_name, record.author);
        assert_eq!(record.url, URL);
        assert_eq!(record.image_url, None);
        assert_eq!(record.status, RecordStatus::Ok);
        assert_eq!(record.pub_date, now);
        assert_eq!(record.pub_date.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_full_page() {
        let html = r#"<html><head>
            <title>  Big News: Today!  </title>
            <link rel="canonical" href="https://other.example.org/canonical">
            <meta name="author" content="Jane Reporter">
            <meta name="description" content="A story">
            <meta property="og:image" content="/img.png">
            <meta property="article:published_time" content="2025-05-06T14:30:00+02:00">
        </head><body><p>Body</p></body></html>"#;

        let record = extract(html, URL, Utc::now().fixed_offset()).unwrap();
        assert_eq!(record.title, "Big News Today");
        assert_eq!(record.author, "Jane Reporter");
        assert_eq!(record.description, "A story");
        assert_eq!(record.image_url.as_deref(), Some("https://example.com/img.png"));
        assert_eq!(record.pub_date.to_rfc3339(), "2025-05-06T14:30:00+02:00");
        assert_eq!(record.url, URL);
    }

    #[test]
    fn test_non_html_body_is_error() {
        let err = extract("just some plain text", URL, Utc::now().fixed_offset()).unwrap_err();
        assert!(matches!(err, ExtractError::NotHtml(_)));
        assert!(err.to_string().contains("not HTML"));
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let err = selector("meta[").unwrap_err();
        assert!(err.to_string().contains("meta["));
    }

    #[test]
    fn test_resolve_first_value_wins() {
        fn none(_: &Page<'_>) -> Result<Option<u8>, ExtractError> {
            Ok(None)
        }
        fn one(_: &Page<'_>) -> Result<Option<u8>, ExtractError> {
            Ok(Some(1))
        }
        fn fail(_: &Page<'_>) -> Result<Option<u8>, ExtractError> {
            Err(ExtractError::NotHtml("unreachable".to_string()))
        }

        let doc = Html::parse_document("<p></p>");
        let page = Page::new(&doc, URL);
        let first_wins: [Strategy<u8>; 3] = [none, one, fail];
        let all_defer: [Strategy<u8>; 2] = [none, none];
        let error_aborts: [Strategy<u8>; 3] = [none, fail, one];

        assert_eq!(resolve(&page, &first_wins).unwrap(), Some(1));
        assert_eq!(resolve(&page, &all_defer).unwrap(), None);
        assert!(resolve(&page, &error_aborts).is_err());
    }
}
