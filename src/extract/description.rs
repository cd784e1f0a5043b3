//! Description chain.
//!
//! 1. `meta[property=og:description]`
//! 2. `meta[name=description]`
//! 3. up to three paragraphs of the first main-content region, cut at 500 chars
//! 4. the first paragraph on the page, cut at 200 chars
//! 5. a fixed default

use super::{ExtractError, Page, Strategy, element_text, first_attr, resolve, selector};
use crate::utils::{collapse_whitespace, truncate_with_ellipsis};

pub const DEFAULT_DESCRIPTION: &str = "No robust summary found.";

/// Regions tried in order when the page has no meta description.
pub const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".post-content",
    ".entry-content",
    "#content",
    "#main",
];

const MAIN_CONTENT_PARAGRAPHS: usize = 3;
const MAIN_CONTENT_MAX_CHARS: usize = 500;
const FIRST_PARAGRAPH_MAX_CHARS: usize = 200;

const CHAIN: &[Strategy<String>] = &[
    og_description,
    meta_description,
    main_content,
    first_paragraph,
];

pub fn resolve_description(page: &Page<'_>) -> Result<String, ExtractError> {
    Ok(resolve(page, CHAIN)?.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()))
}

fn og_description(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    first_attr(page, "meta[property=\"og:description\"]", "content")
}

fn meta_description(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    first_attr(page, "meta[name=\"description\"]", "content")
}

fn main_content(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    let paragraph = selector("p")?;
    for css in MAIN_CONTENT_SELECTORS {
        let sel = selector(css)?;
        let Some(region) = page.document.select(&sel).next() else {
            continue;
        };

        let joined = region
            .select(&paragraph)
            .take(MAIN_CONTENT_PARAGRAPHS)
            .map(|p| element_text(p).trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let summary = collapse_whitespace(&joined);
        if !summary.is_empty() {
            return Ok(Some(truncate_with_ellipsis(&summary, MAIN_CONTENT_MAX_CHARS)));
        }
    }
    Ok(None)
}

fn first_paragraph(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    let sel = selector("p")?;
    let Some(p) = page.document.select(&sel).next() else {
        return Ok(None);
    };
    let text = collapse_whitespace(element_text(p).trim());
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(truncate_with_ellipsis(&text, FIRST_PARAGRAPH_MAX_CHARS)))
}
