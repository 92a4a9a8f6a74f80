//! The crawl pipeline: category pagination tasks feeding a bounded pool of
//! product-detail fetches through a channel.
//!
//! Categories progress independently under `max_concurrent_categories`;
//! every discovered `ProductRef` crosses the channel once and is consumed by
//! the detail stage, which fetches, normalizes, and emits under
//! `max_concurrent_details`. The only shared state is the channel itself —
//! each category's page cursor lives inside its own pagination task.

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use fixprice_core::AppConfig;
use fixprice_scraper::{FixPriceClient, Normalizer, ProductRef, ScraperError};

use super::sink::RecordSink;

/// Capacity of the discovery channel. Bounds how far pagination can run
/// ahead of the detail stage.
const REFS_CHANNEL_CAPACITY: usize = 256;

/// Aggregated counters for one crawl run.
#[derive(Debug, Default)]
pub(super) struct CrawlTotals {
    pub categories_failed: usize,
    /// Product refs that reached the detail stage.
    pub refs_discovered: usize,
    pub records_emitted: usize,
    /// Detail documents that failed to fetch or normalize.
    pub products_skipped: usize,
}

/// Drives the full pipeline to completion and returns the run totals.
///
/// Category failures (transport errors, page caps, malformed pages) are
/// logged and counted, never propagated — refs discovered before a failure
/// are still processed. Sink failures are propagated: losing the output is
/// not a per-unit condition.
///
/// # Errors
///
/// Returns an error only when the sink rejects a write.
pub(super) async fn run_pipeline<S: RecordSink>(
    client: &FixPriceClient,
    normalizer: &Normalizer,
    config: &AppConfig,
    categories: &[String],
    sink: &mut S,
) -> anyhow::Result<CrawlTotals> {
    let (refs_tx, refs_rx) = mpsc::channel::<ProductRef>(REFS_CHANNEL_CAPACITY);

    let pagination = async {
        let outcomes: Vec<(String, Result<_, ScraperError>)> = stream::iter(categories)
            .map(|category| {
                let refs_tx = refs_tx.clone();
                async move {
                    let result = client
                        .crawl_category(
                            category,
                            config.page_size,
                            config.max_pages,
                            config.inter_request_delay_ms,
                            &refs_tx,
                        )
                        .await;
                    (category.clone(), result)
                }
            })
            .buffer_unordered(config.max_concurrent_categories.max(1))
            .collect()
            .await;
        // Close the channel so the detail stage drains and finishes.
        drop(refs_tx);
        outcomes
    };

    let details = async {
        let mut refs_discovered = 0usize;
        let mut records_emitted = 0usize;
        let mut products_skipped = 0usize;

        let mut fetched = ReceiverStream::new(refs_rx)
            .map(|product_ref| async move {
                let detail = client.fetch_product_detail(&product_ref.relative_url).await;
                (product_ref, detail)
            })
            .buffer_unordered(config.max_concurrent_details.max(1));

        while let Some((product_ref, fetch_result)) = fetched.next().await {
            refs_discovered += 1;
            match fetch_result.and_then(|raw| normalizer.normalize(raw)) {
                Ok(record) => {
                    sink.emit(&record).await?;
                    records_emitted += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        category = %product_ref.category,
                        product = %product_ref.relative_url,
                        error = %e,
                        "skipping product"
                    );
                    products_skipped += 1;
                }
            }
        }

        Ok::<_, anyhow::Error>((refs_discovered, records_emitted, products_skipped))
    };

    let (category_outcomes, detail_outcome) = tokio::join!(pagination, details);
    let (refs_discovered, records_emitted, products_skipped) = detail_outcome?;

    let mut categories_failed = 0usize;
    for (category, outcome) in category_outcomes {
        match outcome {
            Ok(crawl) => {
                tracing::info!(
                    category = %category,
                    pages = crawl.pages_fetched,
                    refs = crawl.refs_discovered,
                    "category crawl complete"
                );
            }
            Err(e) => {
                tracing::error!(category = %category, error = %e, "category crawl failed");
                categories_failed += 1;
            }
        }
    }

    Ok(CrawlTotals {
        categories_failed,
        refs_discovered,
        records_emitted,
        products_skipped,
    })
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
