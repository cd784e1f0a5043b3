//! Command-line interface definitions for the site feed service.
//!
//! All options can be given as flags or environment variables. By default the
//! binary serves the feed over HTTP; `--once` builds a single document and
//! exits.

use clap::{Parser, ValueEnum};

/// Output shape for `--once` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// RSS 2.0 XML.
    Rss,
    /// JSON array of records.
    Json,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Serve on the default address
/// site_feed --sites-file ./sites.txt
///
/// # Behind a public hostname
/// site_feed --listen 0.0.0.0:8080 --app-link https://feeds.example.com
///
/// # Build one feed and write it to disk
/// site_feed --once rss --output feed.xml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// File with one site URL per line
    #[arg(short, long, env = "SITES_FILE", default_value = "sites.txt")]
    pub sites_file: String,

    /// Address to listen on
    #[arg(short, long, env = "LISTEN_ADDR", default_value = "127.0.0.1:5000")]
    pub listen: String,

    /// Public base URL of this service, used for channel links
    #[arg(long, env = "APP_LINK", default_value = "http://127.0.0.1:5000")]
    pub app_link: String,

    /// Path serving the RSS feed
    #[arg(long, default_value = "/feed.xml")]
    pub feed_path: String,

    /// Path serving the JSON record list
    #[arg(long, default_value = "/api/sites")]
    pub api_path: String,

    /// Channel title
    #[arg(long, default_value = crate::config::DEFAULT_TITLE)]
    pub title: String,

    /// Contact address for the channel's managing editor
    #[arg(long, env = "CONTACT_EMAIL", default_value = "contact@example.com")]
    pub contact_email: String,

    /// Per-site fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Build one feed in the given format and exit instead of serving
    #[arg(long, value_enum)]
    pub once: Option<OutputFormat>,

    /// With --once, write to this file instead of stdout
    #[arg(short, long, requires = "once")]
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["site_feed"]);

        assert_eq!(cli.feed_path, "/feed.xml");
        assert_eq!(cli.api_path, "/api/sites");
        assert_eq!(cli.timeout_secs, 10);
        assert_eq!(cli.once, None);
    }

    #[test]
    fn test_cli_once_mode() {
        let cli = Cli::parse_from(["site_feed", "--once", "json", "-o", "/tmp/feed.json"]);

        assert_eq!(cli.once, Some(OutputFormat::Json));
        assert_eq!(cli.output.as_deref(), Some("/tmp/feed.json"));
    }

    #[test]
    fn test_cli_output_requires_once() {
        assert!(Cli::try_parse_from(["site_feed", "--output", "feed.xml"]).is_err());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["site_feed", "-s", "/etc/sites.txt", "-l", "0.0.0.0:8080"]);

        assert_eq!(cli.sites_file, "/etc/sites.txt");
        assert_eq!(cli.listen, "0.0.0.0:8080");
    }
}
