//! Sequential per-category pagination loop for `FixPriceClient`.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::ScraperError;
use crate::pagination::{page_is_full, PageCursor};
use crate::types::ProductRef;

use super::FixPriceClient;

/// Summary of one category's completed pagination run.
#[derive(Debug)]
pub struct CategoryCrawl {
    pub category: String,
    pub pages_fetched: u32,
    pub refs_discovered: usize,
}

impl FixPriceClient {
    /// Walks a category's listing pages in order, forwarding every
    /// discovered [`ProductRef`] into `refs_tx` as soon as its page is
    /// parsed.
    ///
    /// Page N+1 is requested only after page N's response is observed, and
    /// only when page N held exactly `page_size` items; a short page
    /// (including an empty one) ends the category. `inter_request_delay_ms`
    /// is applied between page requests. The `max_pages` guard converts an
    /// upstream that never returns a short page into an error instead of an
    /// unbounded loop.
    ///
    /// Refs forwarded before a failure stay with the receiver — a page
    /// error ends this category's pagination but does not retract products
    /// already discovered. A closed receiver ends the walk early without an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::PaginationLimit`] — more than `max_pages` full pages.
    /// - Any error from [`Self::fetch_category_page`], after retries.
    pub async fn crawl_category(
        &self,
        category: &str,
        page_size: u32,
        max_pages: u32,
        inter_request_delay_ms: u64,
        refs_tx: &mpsc::Sender<ProductRef>,
    ) -> Result<CategoryCrawl, ScraperError> {
        let mut cursor = PageCursor::first(category);
        let mut pages_fetched = 0u32;
        let mut refs_discovered = 0usize;

        loop {
            if cursor.page > max_pages {
                return Err(ScraperError::PaginationLimit {
                    category: category.to_owned(),
                    max_pages,
                });
            }

            if pages_fetched > 0 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let summaries = self
                .fetch_category_page(category, cursor.page, page_size)
                .await?;
            pages_fetched += 1;
            let item_count = summaries.len();

            for summary in summaries {
                let product_ref = ProductRef {
                    category: category.to_owned(),
                    relative_url: summary.url,
                };
                if refs_tx.send(product_ref).await.is_err() {
                    tracing::debug!(category, "product channel closed — stopping pagination");
                    return Ok(CategoryCrawl {
                        category: category.to_owned(),
                        pages_fetched,
                        refs_discovered,
                    });
                }
                refs_discovered += 1;
            }

            tracing::debug!(
                category,
                page = cursor.page,
                items = item_count,
                "category page fetched"
            );

            if !page_is_full(item_count, page_size) {
                break;
            }
            cursor.advance();
        }

        Ok(CategoryCrawl {
            category: category.to_owned(),
            pages_fetched,
            refs_discovered,
        })
    }
}
