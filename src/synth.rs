//! Placeholder records for sites that could not be fetched or parsed.
//!
//! One bad site must never drop an entry from the feed, so every failure is
//! turned into a well-formed [`Record`] that carries the diagnostic text.
//! Nothing in here can fail.

use crate::extract::ExtractError;
use crate::fetcher::FetchError;
use crate::models::{Record, RecordStatus};
use chrono::{DateTime, FixedOffset};

pub const NETWORK_ERROR_SOURCE: &str = "Network Error";
pub const SCRAPING_ERROR_SOURCE: &str = "Scraping Error";
/// Author shown on failure items in the syndication feed.
pub const SYSTEM_ERROR_AUTHOR: &str = "System Error";

/// Title prefix marking a synthesized record.
pub const FAILURE_TITLE_PREFIX: &str = "[FAIL]";

pub const FETCH_FAILURE_IMAGE: &str = "https://placehold.co/150x100/A0A0A0/FFFFFF?text=Fetching+Error";
pub const PARSE_FAILURE_IMAGE: &str = "https://placehold.co/150x100/505050/FFFFFF?text=Parsing+Error";

/// A failure at the single-site boundary.
#[derive(Debug)]
pub enum SiteFailure {
    Fetch(FetchError),
    Parse(ExtractError),
}

impl From<FetchError> for SiteFailure {
    fn from(e: FetchError) -> Self {
        SiteFailure::Fetch(e)
    }
}

impl From<ExtractError> for SiteFailure {
    fn from(e: ExtractError) -> Self {
        SiteFailure::Parse(e)
    }
}

/// Build the placeholder record for `url`, dated `now`.
///
/// Every failure in one feed build shares the same `now`, so a stable sort
/// keeps failures in configuration order.
pub fn from_failure(url: &str, failure: &SiteFailure, now: DateTime<FixedOffset>) -> Record {
    let (status, stage, source, detail, image) = match failure {
        SiteFailure::Fetch(e) => (
            RecordStatus::FetchFailed,
            "Fetching",
            NETWORK_ERROR_SOURCE,
            format!("Could not reach or retrieve site content. Error: {e}"),
            FETCH_FAILURE_IMAGE,
        ),
        SiteFailure::Parse(e) => (
            RecordStatus::ParseFailed,
            "Parsing",
            SCRAPING_ERROR_SOURCE,
            format!("Site content could not be parsed correctly. Error: {e}"),
            PARSE_FAILURE_IMAGE,
        ),
    };

    Record {
        title: format!("{FAILURE_TITLE_PREFIX} {stage} Failed for: {url}"),
        url: url.to_string(),
        author: source.to_string(),
        description: detail,
        image_url: Some(image.to_string()),
        pub_date: now,
        source_name: source.to_string(),
        status,
    }
}
