//! Khabar main entry point.
//!
//! Command-line interface for the news article crawler.

use clap::Parser;
use khabar::config::load_config_with_hash;
use khabar::render::WebDriverEngine;
use khabar::sink::SqliteSink;
use khabar::Coordinator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Khabar: a browser-rendered news article crawler
///
/// Khabar crawls the configured news sources through a rendering browser,
/// extracts normalized articles, and stores one record per URL.
#[derive(Parser, Debug)]
#[command(name = "khabar")]
#[command(version = "1.0.0")]
#[command(about = "A browser-rendered news article crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Restrict the run to one configured source
    #[arg(long, value_name = "NAME")]
    source: Option<String>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show stored article counts from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // The WebDriver endpoint can be overridden from the environment, which
    // is handy in containerized setups.
    if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
        if !webdriver_url.is_empty() {
            config.webdriver.url = webdriver_url;
        }
    }

    if let Some(name) = &cli.source {
        config.sources.retain(|entry| &entry.name == name);
        if config.sources.is_empty() {
            return Err(format!("no configured source named {:?}", name).into());
        }
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("khabar=info,warn"),
            1 => EnvFilter::new("khabar=debug,info"),
            2 => EnvFilter::new("khabar=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run.
fn handle_dry_run(config: &khabar::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Khabar Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent pages: {}",
        config.crawler.max_concurrent_pages
    );
    println!(
        "  Navigation timeout: {}s",
        config.crawler.navigation_timeout_secs
    );
    println!(
        "  Readiness timeout: {}s",
        config.crawler.readiness_timeout_secs
    );

    println!("\nWebDriver:");
    println!("  Endpoint: {}", config.webdriver.url);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\nSources ({}):", config.sources.len());
    for entry in &config.sources {
        let profile = khabar::sources::profile_for(&entry.name)
            .ok_or_else(|| format!("unknown source {:?}", entry.name))?;
        println!("  - {} ({})", entry.name, profile.source_site());
        let seeds: Vec<&str> = if entry.seeds.is_empty() {
            profile.seeds.to_vec()
        } else {
            entry.seeds.iter().map(String::as_str).collect()
        };
        for seed in seeds {
            println!("    * {}", seed);
        }
    }

    match &config.intake {
        Some(intake) => println!("\nIntake endpoint: {}", intake.endpoint),
        None => println!("\nIntake endpoint: (none)"),
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the --stats mode: shows stored article counts.
fn handle_stats(config: &khabar::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Database: {}\n", config.output.database_path);

    let sink = SqliteSink::new(Path::new(&config.output.database_path))?;
    let total = sink.count_total()?;
    println!("Stored articles: {}", total);
    for (source, count) in sink.counts_by_source()? {
        println!("  {:<22} {}", source, count);
    }

    Ok(())
}

/// Handles the main crawl operation.
async fn handle_crawl(config: &khabar::Config) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Arc::new(WebDriverEngine::new(config.webdriver.url.clone()));
    let sink = Arc::new(SqliteSink::new(Path::new(&config.output.database_path))?);
    let coordinator = Coordinator::new(config, engine, sink)?;

    // Ctrl-c cancels the run; in-flight tasks release their pages and the
    // coordinator drains before returning.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {:?}", error);
            return;
        }
        tracing::info!("shutdown requested, finishing in-flight tasks");
        signal_cancel.cancel();
    });

    match coordinator.run(cancel).await {
        Ok(summary) => {
            println!("\n=== Crawl Summary ===");
            println!("Listing pages visited:  {}", summary.listing_pages);
            println!("Links discovered:       {}", summary.links_discovered);
            println!("Articles extracted:     {}", summary.articles_extracted);
            println!("Articles stored:        {}", summary.stored);
            println!("Duplicates dropped:     {}", summary.duplicates);
            println!("Fetch errors:           {}", summary.fetch_errors);
            println!("Extraction failures:    {}", summary.extraction_failures);
            println!("Partial extractions:    {}", summary.partial_extractions);
            println!("Sink errors:            {}", summary.sink_errors);
            println!("Intake failures:        {}", summary.intake_failures);
            println!("Layout drift warnings:  {}", summary.layout_drift_warnings);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
