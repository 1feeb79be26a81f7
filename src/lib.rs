//! ccan-archiver: a catalog archiver for ccan.de and the Clonk-Center archive
//!
//! This crate crawls a paginated listing and an ID-enumerated detail catalog,
//! normalizes every entry into a [`Record`], and streams the linked downloads
//! together with their metadata into a single zip archive.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod url;

use thiserror::Error;

/// Main error type for archiver operations
#[derive(Debug, Error)]
pub enum ArchiverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL parse error for {url}: {source}")]
    UrlParse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Crawl of {url} aborted after {failures} consecutive failures: {last_error}")]
    CrawlAborted {
        url: String,
        failures: u32,
        last_error: String,
    },

    #[error("Record channel closed before the crawl finished")]
    ChannelClosed,

    #[error("Archiver task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid URL template: {0}")]
    InvalidTemplate(String),
}

/// Result type alias for archiver operations
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_archive, CrawlError};
pub use output::{ArchiveReport, Archiver, FailureEntry};
pub use record::{Archivable, CcanItem, ClonkCenterItem, Record};
