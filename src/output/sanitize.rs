//! Archive path derivation
//!
//! Entry paths are built from the record's source tag, author and name. Only
//! an allow-list of characters survives; everything else is dropped.

use crate::record::Archivable;
use crate::url::url_extension;

/// Punctuation kept in file names, space included
const ALLOWED_PUNCTUATION: &str = " -_.,()[]+";

/// German diacritics used throughout both catalogs
const ALLOWED_DIACRITICS: &str = "ÄÖÜßäöü";

/// Substitute for a component that sanitizes to nothing
const UNNAMED: &str = "unnamed";

/// Returns true if `c` may appear in an archive path component
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c) || ALLOWED_DIACRITICS.contains(c)
}

/// Drops every character outside the allow-list
///
/// # Examples
///
/// ```
/// use ccan_archiver::output::clean_filename;
///
/// assert_eq!(clean_filename("Hazard: Die Rückkehr!"), "Hazard Die Rückkehr");
/// ```
pub fn clean_filename(input: &str) -> String {
    input.chars().filter(|c| is_allowed_char(*c)).collect()
}

/// Sanitized component that is safe to use as a directory or file stem
fn path_component(input: &str) -> String {
    let cleaned = clean_filename(input);
    if cleaned.trim().is_empty() || cleaned.chars().all(|c| c == '.') {
        UNNAMED.to_string()
    } else {
        cleaned
    }
}

/// Builds the entry path `Source/Author/Name.ext` for a record
///
/// The extension comes from the final path segment of `direct_link`, the URL
/// the download actually resolved to. Without an extension the dot is left
/// out too. `copy` numbers repeated paths: 1 is the plain path, 2 and above
/// append ` (n)` to the name.
pub fn archive_path(record: &dyn Archivable, direct_link: &str, copy: u32) -> String {
    let author = path_component(record.author());
    let mut name = path_component(record.name());
    if copy > 1 {
        name = format!("{} ({})", name, copy);
    }

    let extension = clean_filename(&url_extension(direct_link));
    if extension.is_empty() {
        format!("{}/{}/{}", record.source_name(), author, name)
    } else {
        format!("{}/{}/{}.{}", record.source_name(), author, name, extension)
    }
}
