//! The `crawl` command: seed resolution, pipeline startup, and run summary.
//!
//! Per-category and per-product failures are logged and skipped rather than
//! propagated, so one bad category or document never aborts the full run.
//! Configuration problems (an unusable catalog URL, an unreadable seed file)
//! are fatal at startup.

mod runner;
mod sink;

use std::path::PathBuf;

use clap::Args;

use fixprice_core::{load_catalogs, AppConfig};
use fixprice_scraper::{extract_category, ClientConfig, FixPriceClient, LocaleLabels, Normalizer};

use sink::{JsonLinesSink, RecordSink};

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Restrict the crawl to one configured catalog URL
    #[arg(long)]
    pub catalog: Option<String>,

    /// JSON-lines output file, one canonical record per line
    #[arg(long, default_value = "products.jsonl")]
    pub output: PathBuf,

    /// List the categories that would be crawled without issuing requests
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the crawl end to end: resolve seeds, fan out category pagination and
/// detail fetches, write records to the output sink, print a summary.
///
/// # Errors
///
/// Returns an error for configuration problems (seed file, catalog filter,
/// category resolution, client construction), sink I/O failures, or when
/// every category failed to crawl.
pub async fn run_crawl(config: &AppConfig, args: CrawlArgs) -> anyhow::Result<()> {
    let catalogs_file = load_catalogs(&config.catalogs_path)?;

    let seeds: Vec<_> = match args.catalog.as_deref() {
        Some(filter) => {
            let seed = catalogs_file
                .catalogs
                .iter()
                .find(|s| s.url == filter)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "catalog '{filter}' is not listed in {}",
                        config.catalogs_path.display()
                    )
                })?;
            vec![seed.clone()]
        }
        None => catalogs_file.catalogs.clone(),
    };

    // Seed resolution failures are configuration errors: abort before any
    // request is issued.
    let categories = seeds
        .iter()
        .map(|seed| extract_category(&seed.url))
        .collect::<Result<Vec<_>, _>>()?;

    if args.dry_run {
        println!(
            "dry-run: would crawl {} categories: [{}]",
            categories.len(),
            categories.join(", ")
        );
        return Ok(());
    }

    let client = build_client(config)?;
    let normalizer = Normalizer::new(&config.site_base_url, LocaleLabels::default());
    let mut sink = JsonLinesSink::create(&args.output).await?;

    let totals = runner::run_pipeline(&client, &normalizer, config, &categories, &mut sink).await?;
    sink.flush().await?;

    println!(
        "emitted {} records from {} discovered products across {} categories ({} skipped, {} categories failed)",
        totals.records_emitted,
        totals.refs_discovered,
        categories.len(),
        totals.products_skipped,
        totals.categories_failed,
    );

    if totals.categories_failed == categories.len() {
        anyhow::bail!("all {} categories failed to crawl", categories.len());
    }

    Ok(())
}

fn build_client(config: &AppConfig) -> anyhow::Result<FixPriceClient> {
    let client = FixPriceClient::new(&ClientConfig {
        api_base_url: config.api_base_url.clone(),
        request_timeout_secs: config.request_timeout_secs,
        user_agent: config.user_agent.clone(),
        language: config.language.clone(),
        city_id: config.city_id.clone(),
        api_key: config.api_key.clone(),
        max_retries: config.max_retries,
        backoff_base_secs: config.retry_backoff_base_secs,
    })?;
    Ok(client)
}
