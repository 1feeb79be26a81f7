//! The archiving consumer
//!
//! Drains the record stream and writes, per record, the downloaded payload and
//! its metadata into one zip archive. A record that fails at any stage lands in
//! the failure ledger and the archiver moves on; only creating or finalizing
//! the archive itself can fail the run.

use crate::crawler::Fetcher;
use crate::output::markdown::{format_readme, ReadmeData};
use crate::output::report::{to_pretty_json, ArchiveReport, FailureEntry};
use crate::output::sanitize::archive_path;
use crate::record::{Archivable, Record};
use crate::ArchiverError;
use chrono::Local;
use reqwest::Response;
use std::collections::HashSet;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use thiserror::Error;
use tokio::sync::mpsc::Receiver;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the summary entry at the archive root
pub const README_ENTRY: &str = "README.md";

/// Name of the failure ledger entry at the archive root
pub const FAILED_ENTRY: &str = "failed.json";

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Payload and metadata were written under this path
    Archived(String),

    /// Duplicate download link or no link at all
    Skipped,

    /// Recorded in the failure ledger
    Failed,
}

/// A per-record failure, tagged with the stage it happened in
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
struct StageError {
    stage: &'static str,
    source: ArchiverError,
}

impl StageError {
    fn new(stage: &'static str, source: impl Into<ArchiverError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

/// Payloads are streamed without a known size, so every entry is written as zip64
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true)
}

/// Single consumer that turns records into archive entries
///
/// The dedup index and the failure ledger are owned by the archiver; it is
/// the only writer of the zip file.
pub struct Archiver<W: Write + Seek> {
    writer: ZipWriter<W>,
    fetcher: Fetcher,
    downloaded: HashSet<String>,
    used_paths: HashSet<String>,
    failures: Vec<FailureEntry>,
    report: ArchiveReport,
}

impl Archiver<File> {
    /// Creates the archive file at `path`, truncating an existing one
    pub fn create(path: &Path, fetcher: Fetcher) -> Result<Self, ArchiverError> {
        let file = File::create(path)?;
        tracing::info!("Writing archive to {}", path.display());
        Ok(Self::new(file, fetcher))
    }
}

impl<W: Write + Seek> Archiver<W> {
    /// Creates an archiver writing a new zip archive into `writer`
    pub fn new(writer: W, fetcher: Fetcher) -> Self {
        Self {
            writer: ZipWriter::new(writer),
            fetcher,
            downloaded: HashSet::new(),
            used_paths: HashSet::new(),
            failures: Vec::new(),
            report: ArchiveReport::default(),
        }
    }

    /// Archives every record until all senders are dropped, then finalizes
    ///
    /// # Returns
    ///
    /// * `Ok((W, ArchiveReport))` - The finished archive's writer and the run's counters
    /// * `Err(ArchiverError)` - The archive could not be finalized
    pub async fn run(mut self, mut input: Receiver<Record>) -> Result<(W, ArchiveReport), ArchiverError> {
        while let Some(record) = input.recv().await {
            self.archive(record).await;
        }

        tracing::info!("Record stream closed, finalizing archive");
        self.finish()
    }

    /// Archives one record
    pub async fn archive(&mut self, record: Record) -> ArchiveOutcome {
        let link = record.download_link();

        if link.is_empty() {
            tracing::info!("Skipping {} by {}: no download link", record.name(), record.author());
            self.report.skipped += 1;
            return ArchiveOutcome::Skipped;
        }

        if self.downloaded.contains(link) {
            tracing::info!("Already have {}", link);
            self.report.skipped += 1;
            return ArchiveOutcome::Skipped;
        }

        match self.store(&record).await {
            Ok(path) => {
                self.downloaded.insert(link.to_string());
                self.report.archived += 1;
                tracing::info!("Archived {} (#{})", path, self.report.archived);
                ArchiveOutcome::Archived(path)
            }
            Err(e) => {
                tracing::error!("Error {} ({})", e, link);
                self.report.failed += 1;
                self.failures.push(FailureEntry {
                    error_message: e.to_string(),
                    item: record,
                });
                ArchiveOutcome::Failed
            }
        }
    }

    /// Download links archived so far
    pub fn downloaded(&self) -> &HashSet<String> {
        &self.downloaded
    }

    /// Failures recorded so far, in arrival order
    pub fn failures(&self) -> &[FailureEntry] {
        &self.failures
    }

    /// Counters so far
    pub fn report(&self) -> ArchiveReport {
        self.report
    }

    /// Writes the README and failure ledger and closes the archive
    pub fn finish(mut self) -> Result<(W, ArchiveReport), ArchiverError> {
        let readme = format_readme(&ReadmeData {
            archived: self.report.archived,
            failed: self.report.failed,
            generated_on: Local::now().date_naive(),
        });
        self.writer.start_file(README_ENTRY, entry_options())?;
        self.writer.write_all(readme.as_bytes())?;
        tracing::info!("Generated README");

        if !self.failures.is_empty() {
            let ledger = to_pretty_json(&self.failures)?;
            self.writer.start_file(FAILED_ENTRY, entry_options())?;
            self.writer.write_all(&ledger)?;
            tracing::info!("Listed {} failed items in {}", self.failures.len(), FAILED_ENTRY);
        }

        let writer = self.writer.finish()?;
        Ok((writer, self.report))
    }

    /// Downloads the payload and writes payload and metadata entries
    async fn store(&mut self, record: &Record) -> Result<String, StageError> {
        let metadata =
            to_pretty_json(record).map_err(|e| StageError::new("while generating json data", e))?;

        let response = self
            .fetcher
            .fetch(record.download_link())
            .await
            .map_err(|e| StageError::new("while downloading item", e))?;

        // Only used for the extension; the record keeps the advertised link
        let direct_link = response.url().to_string();
        let path = self.unused_path(record, &direct_link);
        tracing::info!("Downloading {} (#{})", path, self.report.archived + 1);

        self.writer
            .start_file(path.as_str(), entry_options())
            .map_err(|e| StageError::new("while creating file", e))?;
        self.used_paths.insert(path.clone());

        if let Err(e) = self.copy_body(response).await {
            self.abort_entry(&path);
            return Err(StageError::new("while copying file stream to archive", e));
        }
        self.writer
            .flush()
            .map_err(|e| StageError::new("while flushing downloaded file", e))?;

        let info_path = metadata_path(&path);
        self.writer
            .start_file(info_path.as_str(), entry_options())
            .map_err(|e| StageError::new("while creating json file", e))?;
        self.used_paths.insert(info_path.clone());
        if let Err(e) = self.writer.write_all(&metadata) {
            self.abort_entry(&info_path);
            return Err(StageError::new("while writing json file", e));
        }
        self.writer
            .flush()
            .map_err(|e| StageError::new("while flushing json file", e))?;

        Ok(path)
    }

    /// Streams the response body into the entry currently being written
    async fn copy_body(&mut self, mut response: Response) -> Result<u64, ArchiverError> {
        let url = response.url().to_string();
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| ArchiverError::Http {
                url: url.clone(),
                source,
            })?
        {
            self.writer.write_all(&chunk)?;
            written += chunk.len() as u64;
        }

        Ok(written)
    }

    /// Drops the partially written entry from the archive
    fn abort_entry(&mut self, path: &str) {
        match self.writer.abort_file() {
            Ok(()) => {
                self.used_paths.remove(path);
            }
            Err(e) => tracing::warn!("Could not discard partial entry {}: {}", path, e),
        }
    }

    /// First path for the record whose payload and metadata entries are both free
    fn unused_path(&self, record: &Record, direct_link: &str) -> String {
        let mut copy = 1;
        loop {
            let path = archive_path(record, direct_link, copy);
            if !self.used_paths.contains(&path) && !self.used_paths.contains(&metadata_path(&path)) {
                return path;
            }
            copy += 1;
        }
    }
}

/// Name of the metadata entry stored next to a payload
fn metadata_path(path: &str) -> String {
    format!("{}.json", path)
}
