//! Output module: the archiving side of the pipeline
//!
//! This module handles:
//! - Consuming the record stream into a zip archive
//! - Deriving sanitized entry paths
//! - Generating the README summary
//! - Keeping the failure ledger

mod archiver;
mod markdown;
mod report;
mod sanitize;

pub use archiver::{ArchiveOutcome, Archiver, FAILED_ENTRY, README_ENTRY};
pub use markdown::{format_readme, ReadmeData, README_DATE_FORMAT};
pub use report::{to_pretty_json, ArchiveReport, FailureEntry};
pub use sanitize::{archive_path, clean_filename, is_allowed_char};
