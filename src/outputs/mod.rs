//! Feed rendering.
//!
//! # Submodules
//!
//! - [`rss`]: RSS 2.0 XML for feed readers
//! - [`json`]: Flat list of records for machine consumption
//!
//! Both renderers consume only a built [`FeedDocument`](crate::models::FeedDocument)
//! and return bytes; a render error fails that one request.

pub mod json;
pub mod rss;

use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Write a rendered document to `path`, creating parent directories.
#[instrument(level = "info", skip(bytes), fields(bytes = bytes.len()))]
pub async fn write_output(path: &str, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, bytes).await?;
    info!(%path, "Wrote feed document");
    Ok(())
}
