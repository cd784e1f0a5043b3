//! Publication date chain.
//!
//! Candidates are scanned in priority order and the first one whose raw value
//! parses wins. A candidate that matches but does not parse is skipped, not
//! fatal. Values without an offset are taken as UTC; when nothing parses the
//! caller's `now` is used.

use super::{ExtractError, Page, Strategy, resolve, selector};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// `(selector, attribute)` pairs scanned in order.
const CANDIDATES: &[(&str, &str)] = &[
    ("meta[property=\"article:published_time\"]", "content"),
    ("meta[name=\"date\"]", "content"),
    ("meta[name=\"pubdate\"]", "content"),
    ("meta[property=\"og:pubdate\"]", "content"),
    ("time[datetime]", "datetime"),
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

const CHAIN: &[Strategy<DateTime<FixedOffset>>] = &[tagged_date];

pub fn resolve_pub_date(page: &Page<'_>, now: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>, ExtractError> {
    Ok(resolve(page, CHAIN)?.unwrap_or(now))
}

fn tagged_date(page: &Page<'_>) -> Result<Option<DateTime<FixedOffset>>, ExtractError> {
    for (css, attr) in CANDIDATES {
        let sel = selector(css)?;
        let parsed = page
            .document
            .select(&sel)
            .filter_map(|el| el.value().attr(attr))
            .find_map(parse_lenient);
        if parsed.is_some() {
            return Ok(parsed);
        }
    }
    Ok(None)
}

/// Parse a date string in any of the common web formats.
///
/// Strings without an offset are interpreted as UTC.
pub fn parse_lenient(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc().fixed_offset());
        }
    }
    None
}
