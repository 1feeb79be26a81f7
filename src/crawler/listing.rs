//! Paginated listing crawler
//!
//! Walks the ccan.de listing page by page until a page parses to zero items.
//! A failed page is retried after a fixed delay without advancing; too many
//! failures in a row abort the whole run, since the rest of the catalog would
//! be unreachable.

use crate::config::ListingConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::table::parse_listing_page;
use crate::crawler::{emit, CrawlError};
use crate::record::{supplementary_items, CcanItem, Record};
use crate::url::fill_template;
use crate::ArchiverError;
use std::time::Duration;
use tokio::sync::mpsc::Sender;

/// Crawler for the paginated ccan.de listing
pub struct ListingCrawler {
    fetcher: Fetcher,
    config: ListingConfig,
}

impl ListingCrawler {
    pub fn new(fetcher: Fetcher, config: ListingConfig) -> Self {
        Self { fetcher, config }
    }

    /// URL of the listing page with the given 0-based index
    pub fn page_url(&self, page: u32) -> String {
        fill_template(&self.config.url_template, "{page}", page)
    }

    /// Crawls the whole listing, sending every item to `output`
    ///
    /// The curated supplementary items are sent first unless disabled. The
    /// sender is dropped when the crawl returns.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CrawlError>)` - Crawl finished; the failures that were retried along the way
    /// * `Err(ArchiverError::CrawlAborted)` - Too many consecutive page failures
    /// * `Err(ArchiverError::ChannelClosed)` - The archiver stopped receiving
    pub async fn crawl(&self, output: Sender<Record>) -> Result<Vec<CrawlError>, ArchiverError> {
        if self.config.include_supplementary {
            for item in supplementary_items() {
                emit(&output, item.into()).await?;
            }
        }

        let mut errors = Vec::new();
        let mut page = 0u32;
        let mut consecutive_failures = 0u32;
        let mut total_items = 0usize;
        let retry_delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            let url = self.page_url(page);
            tracing::info!("Fetching listing page {}", page + 1);

            let items = match self.fetch_page(&url).await {
                Ok(items) => items,
                Err(e) => {
                    consecutive_failures += 1;
                    errors.push(CrawlError::new(
                        &url,
                        format!(
                            "listing page {} failed (try {}/{}): {}",
                            page, consecutive_failures, self.config.max_consecutive_failures, e
                        ),
                    ));

                    if consecutive_failures >= self.config.max_consecutive_failures {
                        tracing::error!(
                            "Giving up on listing page {} after {} consecutive failures",
                            page,
                            consecutive_failures
                        );
                        return Err(ArchiverError::CrawlAborted {
                            url,
                            failures: consecutive_failures,
                            last_error: e.to_string(),
                        });
                    }

                    tracing::warn!(
                        "Listing page {} failed: {}; retrying in {:?}",
                        page,
                        e,
                        retry_delay
                    );
                    tokio::time::sleep(retry_delay).await;
                    continue;
                }
            };
            consecutive_failures = 0;

            if items.is_empty() {
                tracing::info!(
                    "Listing page {} is empty, crawl complete ({} items)",
                    page + 1,
                    total_items
                );
                break;
            }

            total_items += items.len();
            for item in items {
                emit(&output, item.into()).await?;
            }

            page += 1;
        }

        Ok(errors)
    }

    async fn fetch_page(&self, url: &str) -> Result<Vec<CcanItem>, ArchiverError> {
        let html = self.fetcher.fetch_text(url).await?;
        parse_listing_page(&html, &self.config.link_base).map_err(|message| {
            ArchiverError::HtmlParse {
                url: url.to_string(),
                message,
            }
        })
    }
}
