//! Lead image chain: `og:image`, `twitter:image`, then the first usable `<img>`.
//!
//! Relative and protocol-relative references are joined against the page URL
//! with standard URL resolution.

use super::{ExtractError, Page, Strategy, first_attr, resolve, selector};

const SKIPPED_EXTENSIONS: &[&str] = &[".svg", ".gif"];

const CHAIN: &[Strategy<String>] = &[og_image, twitter_image, first_img];

pub fn resolve_image(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    resolve(page, CHAIN)
}

fn og_image(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    Ok(first_attr(page, "meta[property=\"og:image\"]", "content")?.map(|src| absolutize(page, &src)))
}

fn twitter_image(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    Ok(first_attr(page, "meta[name=\"twitter:image\"]", "content")?.map(|src| absolutize(page, &src)))
}

fn first_img(page: &Page<'_>) -> Result<Option<String>, ExtractError> {
    let sel = selector("img[src]")?;
    Ok(page
        .document
        .select(&sel)
        .filter_map(|el| el.value().attr("src"))
        .map(str::trim)
        .find(|src| is_usable_img_src(src))
        .map(|src| absolutize(page, src)))
}

fn is_usable_img_src(src: &str) -> bool {
    if src.is_empty() || src.starts_with("data:") {
        return false;
    }
    let path = src.split(['?', '#']).next().unwrap_or(src).to_ascii_lowercase();
    !SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Join `src` against the page URL; leave it as-is when that is impossible.
fn absolutize(page: &Page<'_>, src: &str) -> String {
    match &page.base {
        Some(base) => base
            .join(src)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| src.to_string()),
        None => src.to_string(),
    }
}
