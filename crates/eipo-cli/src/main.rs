use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eipo_client::{HtmlListingParser, ReqwestFetcher};
use eipo_core::config::SiteConfig;
use eipo_core::traits::PageFetcher;
use eipo_core::{ScrapeService, write_csv, write_json};

#[derive(Parser)]
#[command(name = "eipo", version, about = "Scrape the e-IPO listing into CSV and JSON")]
struct Cli {
    /// JSON file overriding the built-in site configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk every list page and write all listings
    Scrape {
        /// Safety ceiling on the number of pages fetched
        #[arg(long, default_value_t = 200)]
        max_pages: u32,

        /// Seconds to sleep between page requests
        #[arg(long, default_value_t = 0.7)]
        sleep: f64,

        /// Listings per page (defaults to the config value)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        per_page: Option<u32>,

        /// CSV output path
        #[arg(long, default_value = "ipo_list.csv")]
        csv: PathBuf,

        /// JSON output path
        #[arg(long, default_value = "ipo_list.json")]
        json: PathBuf,

        /// Skip the homepage request that picks up session cookies
        #[arg(long, default_value_t = false)]
        no_warm_up: bool,
    },

    /// Warm up and fetch a single page to check the site is reachable
    Probe {
        /// Page index to fetch
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Print the effective site configuration as JSON
    Config,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("eipo=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scrape {
            max_pages,
            sleep,
            per_page,
            csv,
            json,
            no_warm_up,
        } => {
            let delay = Duration::try_from_secs_f64(sleep)
                .with_context(|| format!("Invalid --sleep value: {sleep}"))?;
            let per_page = per_page.unwrap_or(config.per_page);
            cmd_scrape(&config, max_pages, delay, per_page, &csv, &json, !no_warm_up)?;
        }
        Commands::Probe { page } => cmd_probe(&config, page)?,
        Commands::Config => println!("{}", render_config(&config)?),
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let config = match path {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn cmd_scrape(
    config: &SiteConfig,
    max_pages: u32,
    delay: Duration,
    per_page: u32,
    csv_path: &Path,
    json_path: &Path,
    warm_up: bool,
) -> Result<()> {
    let fetcher = ReqwestFetcher::new(config).context("Failed to create HTTP client")?;
    let parser = HtmlListingParser::new(config).context("Failed to build listing parser")?;
    let svc = ScrapeService::new(fetcher, parser).with_per_page(per_page);

    if warm_up {
        svc.warm_up().context("Warm-up request failed")?;
    }

    tracing::info!("Scraping {} (up to {} pages)", config.list_url(), max_pages);
    let listings = svc.scrape_all(max_pages, delay)?;

    write_csv(csv_path, &listings)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    write_json(json_path, &listings)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    println!(
        "Wrote {} listings to {} and {}",
        listings.len(),
        csv_path.display(),
        json_path.display()
    );

    Ok(())
}

fn cmd_probe(config: &SiteConfig, page: u32) -> Result<()> {
    let fetcher = ReqwestFetcher::new(config).context("Failed to create HTTP client")?;
    fetcher.warm_up().context("Warm-up request failed")?;

    let html = fetcher.fetch_page(page, config.per_page)?;
    println!("{}", probe_summary(&html));

    Ok(())
}

/// Length is counted in characters, not bytes.
fn probe_summary(html: &str) -> String {
    format!("OK len(html)= {}", html.chars().count())
}

/// Pretty JSON that `--config` accepts back unchanged.
fn render_config(config: &SiteConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize config")
}
