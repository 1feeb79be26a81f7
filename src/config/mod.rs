//! Configuration module for the archiver
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys have defaults, so running without a configuration file archives the
//! public catalogs into `result.zip`.
//!
//! # Example
//!
//! ```no_run
//! use ccan_archiver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("archiver.toml")).unwrap();
//! println!("Writing archive to {}", config.output.archive_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EnumeratedConfig, HttpConfig, ListingConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
