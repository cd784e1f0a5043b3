//! Fetch, extract and order every configured site into one feed document.
//!
//! Sites are processed strictly one after another. Each site is isolated:
//! a fetch or parse failure becomes a placeholder record and processing moves
//! on. The result always holds exactly one record per configured URL, sorted
//! newest first with ties kept in configuration order. Failures and undated
//! pages are all stamped with the single instant the build started.

use crate::config::FeedConfig;
use crate::extract;
use crate::fetcher::PageFetcher;
use crate::models::{FeedDocument, FeedEntries, Record};
use crate::synth::{self, SiteFailure};
use chrono::{DateTime, FixedOffset, Utc};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Build the feed for `urls`.
///
/// An empty list yields the [`FeedEntries::NoSitesConfigured`] document.
#[instrument(level = "info", skip_all, fields(sites = urls.len()))]
pub async fn build_feed(fetcher: &PageFetcher, config: &FeedConfig, urls: &[String]) -> FeedDocument {
    let t0 = Instant::now();
    let built_at = Utc::now();
    let channel = config.channel(built_at);
    let now = built_at.fixed_offset();

    if urls.is_empty() {
        warn!(path = %config.sites_file.display(), "No sites configured");
        return FeedDocument {
            channel,
            entries: FeedEntries::NoSitesConfigured(format!(
                "No sites configured in {}",
                config.sites_file.display()
            )),
        };
    }

    let mut records: Vec<Record> = stream::iter(urls)
        .then(|url| process_site(fetcher, url, now))
        .collect()
        .await;

    sort_newest_first(&mut records);

    let failed = records.iter().filter(|r| r.status.is_failure()).count();
    info!(
        total = records.len(),
        ok = records.len() - failed,
        failed,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Built feed"
    );

    FeedDocument {
        channel,
        entries: FeedEntries::Records(records),
    }
}

/// Sort by publication date, newest first.
///
/// The sort is stable, so records with equal dates keep their relative order.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}

#[instrument(level = "info", skip(fetcher, now))]
async fn process_site(fetcher: &PageFetcher, url: &str, now: DateTime<FixedOffset>) -> Record {
    let outcome = match fetcher.fetch(url).await {
        Ok(page) => {
            if page.final_url != url {
                debug!(status = page.status, final_url = %page.final_url, "Followed redirect");
            }
            extract::extract(&page.body, url, now).map_err(SiteFailure::from)
        }
        Err(e) => Err(SiteFailure::from(e)),
    };

    match outcome {
        Ok(record) => {
            debug!(title = %record.title, "Scraped site");
            record
        }
        Err(failure) => {
            match &failure {
                SiteFailure::Fetch(e) => warn!(error = %e, "Failed to fetch site"),
                SiteFailure::Parse(e) => warn!(error = %e, "Failed to parse site"),
            }
            synth::from_failure(url, &failure, now)
        }
    }
}
