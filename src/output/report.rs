//! Report types produced by the archiver

use crate::record::Record;
use serde::Serialize;

/// A record that could not be archived, as persisted in `failed.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureEntry {
    /// What went wrong, prefixed with the stage it went wrong in
    pub error_message: String,

    /// The record that caused it
    pub item: Record,
}

/// Counters of one archiving run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Records whose payload and metadata were written
    pub archived: u64,

    /// Records skipped as duplicates or for lacking a download link
    pub skipped: u64,

    /// Records that ended up in the failure ledger
    pub failed: u64,
}

impl ArchiveReport {
    /// Total number of records the archiver received
    pub fn total(&self) -> u64 {
        self.archived + self.skipped + self.failed
    }
}

/// Serializes `value` as JSON indented with four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
