//! Loading the operator-maintained list of site URLs.
//!
//! One absolute URL per line. Blank lines and lines starting with `#` are
//! ignored. A missing file is an empty list, not an error.

use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Parse site-list text into URLs, preserving order.
pub fn parse_site_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read the site list from `path`.
///
/// # Errors
///
/// Any I/O error other than the file not existing.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_sites(path: impl AsRef<Path>) -> Result<Vec<String>, std::io::Error> {
    match fs::read_to_string(path.as_ref()).await {
        Ok(contents) => {
            let sites = parse_site_list(&contents);
            debug!(count = sites.len(), "Loaded site list");
            Ok(sites)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Site list not found; treating as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
