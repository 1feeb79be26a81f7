//! Enumerated-ID crawler for the Clonk-Center archive
//!
//! The archive has no listing, so every ID in the configured range is fetched
//! in ascending order. A failing ID is recorded and skipped; the crawl never
//! aborts. A fixed pause separates two IDs to keep the load on the archive low.

use crate::config::EnumeratedConfig;
use crate::crawler::detail::parse_detail_page;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::{emit, CrawlError};
use crate::record::{ClonkCenterItem, Record};
use crate::url::fill_template;
use crate::ArchiverError;
use std::time::Duration;
use tokio::sync::mpsc::Sender;

/// Crawler for the ID-addressed Clonk-Center detail pages
pub struct EnumeratedCrawler {
    fetcher: Fetcher,
    config: EnumeratedConfig,
}

impl EnumeratedCrawler {
    pub fn new(fetcher: Fetcher, config: EnumeratedConfig) -> Self {
        Self { fetcher, config }
    }

    /// URL of the detail page for `id`
    pub fn detail_url(&self, id: u32) -> String {
        fill_template(&self.config.url_template, "{id}", id)
    }

    /// Crawls every ID in the configured range, sending complete items to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CrawlError>)` - One entry per ID that could not be fetched or parsed
    /// * `Err(ArchiverError::ChannelClosed)` - The archiver stopped receiving
    pub async fn crawl(&self, output: Sender<Record>) -> Result<Vec<CrawlError>, ArchiverError> {
        let mut errors = Vec::new();
        let delay = Duration::from_millis(self.config.delay_ms);
        let (first, last) = (self.config.first_id, self.config.last_id);

        for id in first..=last {
            let url = self.detail_url(id);

            match self.fetch_item(id, &url).await {
                Ok(item) if item.is_complete() => {
                    tracing::info!("Found item {}: {} by {}", id, item.name, item.author);
                    emit(&output, item.into()).await?;
                }
                Ok(_) => {
                    tracing::debug!("Dropping incomplete item {}", id);
                }
                Err(e) => {
                    tracing::warn!("Skipping item {}: {}", id, e);
                    errors.push(CrawlError::new(
                        &url,
                        format!("Error while downloading page {}: {}", id, e),
                    ));
                }
            }

            if id < last && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(errors)
    }

    async fn fetch_item(&self, id: u32, url: &str) -> Result<ClonkCenterItem, ArchiverError> {
        let html = self.fetcher.fetch_text(url).await?;

        tracing::debug_span!("detail_page", id)
            .in_scope(|| parse_detail_page(&html, &self.config.link_base))
            .map_err(|message| ArchiverError::HtmlParse {
                url: url.to_string(),
                message,
            })
    }
}
