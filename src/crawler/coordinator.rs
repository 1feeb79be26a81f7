//! Pipeline coordinator
//!
//! Wires the two crawlers to the archiver over one bounded channel:
//! - the archiver is spawned first and drains the channel
//! - both crawlers run concurrently, each holding a sender
//! - the channel closes once both crawlers are done and their senders dropped
//! - the archiver then finalizes the archive

use crate::config::Config;
use crate::crawler::enumerated::EnumeratedCrawler;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::ListingCrawler;
use crate::crawler::CrawlError;
use crate::output::{ArchiveReport, Archiver};
use crate::record::{CcanItem, ClonkCenterItem};
use crate::ArchiverError;
use std::io::{Seek, Write};
use std::path::Path;
use tokio::sync::mpsc;

/// Runs a complete archiving operation
///
/// Creates the archive at `config.output.archive_path`, crawls both catalogs
/// into it and finalizes it.
///
/// # Returns
///
/// * `Ok(ArchiveReport)` - The archive was written
/// * `Err(ArchiverError)` - The archive could not be created or finalized, or
///   the listing crawl was aborted
///
/// # Example
///
/// ```no_run
/// use ccan_archiver::config::Config;
/// use ccan_archiver::crawler::run_archive;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_archive(Config::default()).await?;
/// println!("{} items archived", report.archived);
/// # Ok(())
/// # }
/// ```
pub async fn run_archive(config: Config) -> Result<ArchiveReport, ArchiverError> {
    let fetcher = Fetcher::new(&config.http)?;
    let archiver = Archiver::create(Path::new(&config.output.archive_path), fetcher.clone())?;

    let (_, report) = run_pipeline(&config, fetcher, archiver).await?;
    Ok(report)
}

/// Runs both crawlers into the given archiver and finalizes it
///
/// A fatal crawl error aborts the archiver task; the archive is left
/// unfinished in that case.
pub async fn run_pipeline<W>(
    config: &Config,
    fetcher: Fetcher,
    archiver: Archiver<W>,
) -> Result<(W, ArchiveReport), ArchiverError>
where
    W: Write + Seek + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(config.output.channel_capacity);
    let consumer = tokio::spawn(archiver.run(receiver));

    let enumerated = EnumeratedCrawler::new(fetcher.clone(), config.enumerated.clone());
    let listing = ListingCrawler::new(fetcher, config.listing.clone());

    let crawled = tokio::try_join!(enumerated.crawl(sender.clone()), listing.crawl(sender));

    let (enumerated_errors, listing_errors) = match crawled {
        Ok(errors) => errors,
        Err(ArchiverError::ChannelClosed) => {
            // The archiver went away first; its own error says why
            consumer.await??;
            return Err(ArchiverError::ChannelClosed);
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            consumer.abort();
            return Err(e);
        }
    };

    report_crawl_errors(ClonkCenterItem::SOURCE_NAME, &enumerated_errors);
    report_crawl_errors(CcanItem::SOURCE_NAME, &listing_errors);

    let (writer, report) = consumer.await??;
    tracing::info!(
        "Archive finished: {} archived, {} skipped, {} failed",
        report.archived,
        report.skipped,
        report.failed
    );

    Ok((writer, report))
}

/// Logs the non-fatal errors one crawler collected
fn report_crawl_errors(source: &str, errors: &[CrawlError]) {
    if errors.is_empty() {
        tracing::info!("{} crawl finished without errors", source);
        return;
    }

    tracing::warn!(
        "There were {} errors while crawling {}:",
        errors.len(),
        source
    );
    for error in errors {
        tracing::warn!("  {}", error);
    }
}
