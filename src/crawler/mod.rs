//! Crawler module for the source catalogs
//!
//! This module contains the producing side of the pipeline:
//! - HTTP fetching with status validation
//! - The listing table parser and its paginated crawler
//! - The detail page parser and its enumerated-ID crawler
//! - The coordinator that wires both crawlers to the archiver

mod coordinator;
mod detail;
mod enumerated;
mod fetcher;
mod listing;
mod table;
mod text;

pub use coordinator::{run_archive, run_pipeline};
pub use detail::{parse_detail_page, DETAIL_DATE_FORMAT};
pub use enumerated::EnumeratedCrawler;
pub use fetcher::{build_http_client, Fetcher};
pub use listing::ListingCrawler;
pub use table::{
    parse_listing_date, parse_listing_document, parse_listing_page, ColumnLayout,
    LISTING_DATE_FORMAT,
};

use crate::record::Record;
use crate::ArchiverError;
use std::fmt;
use tokio::sync::mpsc::Sender;

/// A non-fatal failure met while crawling
///
/// Crawlers collect these and return them once they are done so the caller
/// can report them; they never interrupt the crawl on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlError {
    /// The URL that failed
    pub url: String,

    /// Error message
    pub message: String,
}

impl CrawlError {
    pub fn new(url: &str, message: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.url)
    }
}

/// Sends a record to the archiver, waiting while the channel is full
async fn emit(output: &Sender<Record>, record: Record) -> Result<(), ArchiverError> {
    output
        .send(record)
        .await
        .map_err(|_| ArchiverError::ChannelClosed)
}
