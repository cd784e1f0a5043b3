//! # Site Feed
//!
//! Turns a small, hand-maintained list of web page URLs into a single RSS
//! (or JSON) feed. Each page is fetched, its title, author, summary, lead
//! image and publication date are pulled out of the HTML, and the results are
//! merged into one newest-first document.
//!
//! ## Usage
//!
//! ```sh
//! site_feed --sites-file sites.txt --app-link https://feeds.example.com
//! site_feed --once json --output feed.json
//! ```
//!
//! ## Architecture
//!
//! Every feed request runs the same pipeline from scratch:
//! 1. **Loading**: Read the configured URLs from the site list
//! 2. **Fetching**: One bounded GET per site, no retries
//! 3. **Extracting**: Resolve each metadata field through its fallback chain
//! 4. **Synthesizing**: Turn fetch or parse failures into placeholder records
//! 5. **Rendering**: Sort newest first and write RSS or JSON

use clap::Parser;
use std::error::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod extract;
mod fetcher;
mod models;
mod outputs;
mod server;
mod sites;
mod synth;
mod utils;

use cli::{Cli, OutputFormat};
use config::FeedConfig;
use fetcher::PageFetcher;
use outputs::{json, rss, write_output};
use server::AppState;
use utils::truncate_for_log;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = FeedConfig::from_cli(&args)?;
    let fetcher = PageFetcher::new(config.fetch_timeout)?;
    info!(
        sites_file = %config.sites_file.display(),
        timeout_secs = config.fetch_timeout.as_secs(),
        "site_feed starting up"
    );

    match args.once {
        Some(format) => run_once(&fetcher, &config, format, args.output.as_deref()).await,
        None => server::serve(AppState::new(config, fetcher), &args.listen).await,
    }
}

/// Build a single document, write it out and return.
#[instrument(level = "info", skip(fetcher, config))]
async fn run_once(
    fetcher: &PageFetcher,
    config: &FeedConfig,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    let urls = sites::load_sites(&config.sites_file).await?;
    let doc = aggregate::build_feed(fetcher, config, &urls).await;

    let bytes = match format {
        OutputFormat::Rss => rss::render_rss(&doc).map_err(|e| e as Box<dyn Error>)?,
        OutputFormat::Json => json::render_json(&doc)?,
    };
    debug!(preview = %truncate_for_log(&String::from_utf8_lossy(&bytes), 300), "Rendered document");

    match output {
        Some(path) => write_output(path, &bytes).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&bytes).await?;
            stdout.flush().await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        records = doc.records().len(),
        "Execution complete"
    );
    Ok(())
}
