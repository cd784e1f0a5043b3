//! Data models for scraped site records and the feed document built from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Record`]: Normalized metadata for one configured site
//! - [`RecordStatus`]: Whether a record came from a page or from a failure
//! - [`FeedDocument`]: Channel metadata plus the time-ordered records
//! - [`Channel`]: Feed-level metadata rendered once per document

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Outcome that produced a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatus {
    /// Page was fetched and its metadata extracted.
    Ok,
    /// The page could not be fetched (timeout, connection, non-2xx status).
    FetchFailed,
    /// The page was fetched but its metadata could not be derived.
    ParseFailed,
}

impl RecordStatus {
    pub fn is_failure(self) -> bool {
        !matches!(self, RecordStatus::Ok)
    }
}

/// Normalized metadata for a single configured site.
///
/// Exactly one `Record` is produced per configured URL, whether the page was
/// scraped successfully or a placeholder had to be synthesized.
///
/// # Fields
///
/// * `url` - Always the configured URL, never a canonical link found in the page
/// * `pub_date` - Timezone-aware; UTC "now" when nothing on the page parses
/// * `source_name` - Mirrors `author`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Page title with XML-hostile characters stripped.
    pub title: String,
    /// The configured site URL.
    pub url: String,
    /// Display name of the author or publishing site.
    pub author: String,
    /// Summary text, possibly containing light HTML for failure records.
    pub description: String,
    /// Absolute URL of the lead image, if any.
    pub image_url: Option<String>,
    /// Publication time, serialized as ISO-8601.
    pub pub_date: DateTime<FixedOffset>,
    /// Equal to `author`.
    pub source_name: String,
    /// How this record was produced.
    pub status: RecordStatus,
}

/// Feed-level metadata for the syndication channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub title: String,
    /// Canonical link of the service (the "alternate" link).
    pub link: String,
    /// Absolute URL of the feed itself (the "self" link).
    pub self_link: String,
    pub description: String,
    pub language: String,
    pub managing_editor: String,
    pub last_build_date: DateTime<Utc>,
}

/// What a feed request produced.
///
/// An empty site list is a designed degenerate case, so it gets its own
/// variant instead of an empty record list.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEntries {
    /// One record per configured site, newest first.
    Records(Vec<Record>),
    /// No sites were configured; carries the notice shown to readers.
    NoSitesConfigured(String),
}

/// A fully built feed, created and discarded within one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub channel: Channel,
    pub entries: FeedEntries,
}

impl FeedDocument {
    /// Records in feed order, empty for the degenerate document.
    pub fn records(&self) -> &[Record] {
        match &self.entries {
            FeedEntries::Records(records) => records,
            FeedEntries::NoSitesConfigured(_) => &[],
        }
    }
}
