//! Immutable feed configuration, resolved once at startup.
//!
//! The external base URL used for channel links lives here instead of in
//! mutable global state; the server and renderers receive it explicitly.

use crate::cli::Cli;
use crate::models::Channel;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Pure XML Site Aggregator Feed";
pub const DEFAULT_DESCRIPTION: &str =
    "An aggregated feed of custom URLs scraped for rich content, one entry per site.";

/// Routes the server always mounts itself.
const RESERVED_PATHS: &[&str] = &["/health"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("feed path and API path are both `{0}`")]
    SamePath(String),
    #[error("`{0}` is reserved by the server")]
    ReservedPath(String),
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub title: String,
    /// External base URL of the service, without a trailing slash.
    pub link: String,
    pub feed_path: String,
    pub api_path: String,
    pub description: String,
    pub contact_email: String,
    pub language: String,
    pub sites_file: PathBuf,
    pub fetch_timeout: Duration,
}

impl FeedConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config = Self {
            title: cli.title.clone(),
            link: cli.app_link.trim_end_matches('/').to_string(),
            feed_path: normalize_path(&cli.feed_path),
            api_path: normalize_path(&cli.api_path),
            description: DEFAULT_DESCRIPTION.to_string(),
            contact_email: cli.contact_email.clone(),
            language: "en".to_string(),
            sites_file: PathBuf::from(&cli.sites_file),
            fetch_timeout: Duration::from_secs(cli.timeout_secs),
        };
        config.check_routes()?;
        Ok(config)
    }

    fn check_routes(&self) -> Result<(), ConfigError> {
        if self.feed_path == self.api_path {
            return Err(ConfigError::SamePath(self.feed_path.clone()));
        }
        for path in [&self.feed_path, &self.api_path] {
            if RESERVED_PATHS.contains(&path.as_str()) {
                return Err(ConfigError::ReservedPath(path.clone()));
            }
        }
        Ok(())
    }

    /// Absolute URL of the syndication feed.
    pub fn feed_url(&self) -> String {
        format!("{}{}", self.link, self.feed_path)
    }

    /// Channel metadata stamped with `built_at`.
    pub fn channel(&self, built_at: DateTime<Utc>) -> Channel {
        Channel {
            title: self.title.clone(),
            link: self.link.clone(),
            self_link: self.feed_url(),
            description: self.description.clone(),
            language: self.language.clone(),
            managing_editor: format!("{} (RSS Generator)", self.contact_email),
            last_build_date: built_at,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            link: "http://127.0.0.1:5000".to_string(),
            feed_path: "/feed.xml".to_string(),
            api_path: "/api/sites".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            contact_email: "contact@example.com".to_string(),
            language: "en".to_string(),
            sites_file: PathBuf::from("sites.txt"),
            fetch_timeout: crate::fetcher::DEFAULT_TIMEOUT,
        }
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
