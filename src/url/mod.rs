//! URL handling module
//!
//! This module provides URL template expansion, href resolution against a
//! catalog's link base, and file-extension inference from download links.

mod resolve;
mod template;

pub use resolve::{resolve_href, url_extension};
pub use template::fill_template;
