//! Detail page parser for the Clonk-Center archive
//!
//! Every item has its own page with a `table.fullgrid` of label/value rows.
//! The row with class `header` holds the item name.

use crate::crawler::text::{children_named, trimmed_text};
use crate::record::ClonkCenterItem;
use crate::url::resolve_href;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt::Display;
use std::panic::{self, UnwindSafe};

/// Date-time format of the `Datum` row, e.g. `30.06.2004 21:02:00`
pub const DETAIL_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Labels that are known and deliberately not carried over
const IGNORED_LABELS: &[&str] = &["Dateigröße", "Bewertung"];

/// Both spellings were used for the original game author
const MERGED_AUTHOR: &str = "Matthes Bender/Redwolf Design";
const CANONICAL_AUTHOR: &str = "Redwolf Design";

static GRID_ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.fullgrid > tbody > tr").expect("static selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));
static DOWNLOAD_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d+) mal runtergeladen\)").expect("static regex"));

/// Parses a detail page into an item
///
/// Fields whose rows are missing stay empty; the caller decides whether the
/// item is complete enough to keep.
///
/// # Returns
///
/// * `Ok(ClonkCenterItem)` - The page had a detail grid
/// * `Err(String)` - No `table.fullgrid` rows were found
pub fn parse_detail_page(html: &str, link_base: &str) -> Result<ClonkCenterItem, String> {
    let document = Html::parse_document(html);
    let mut item = ClonkCenterItem::default();
    let mut rows = 0usize;

    for row in document.select(&GRID_ROWS) {
        rows += 1;

        if row.value().classes().any(|class| class == "header") {
            item.name = trimmed_text(row);
            continue;
        }

        let mut cells = children_named(row, &["td", "th"]);
        let (Some(label), Some(value)) = (cells.next(), cells.next()) else {
            continue;
        };

        apply_field(&mut item, &trimmed_text(label), value, link_base);
    }

    if rows == 0 {
        return Err("detail page contains no fullgrid table".to_string());
    }

    Ok(item)
}

fn apply_field(item: &mut ClonkCenterItem, label: &str, value: ElementRef<'_>, link_base: &str) {
    match label {
        "Datum" => {
            let text = trimmed_text(value);
            match NaiveDateTime::parse_from_str(&text, DETAIL_DATE_FORMAT) {
                Ok(date) => item.date = Some(date),
                Err(e) => tracing::warn!("Error parsing date \"{}\": {}", text, e),
            }
        }
        "Autor" => item.author = normalize_author(trimmed_text(value)),
        "Gepostet von" => item.posted_by = trimmed_text(value),
        "Engine-Version" => item.engine = trimmed_text(value),
        "Download" => {
            if let Some(link) = value
                .select(&ANCHOR)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
                .and_then(|href| resolve_href(href, link_base))
            {
                item.download_link = link;
            }

            if let Some(count) = parse_download_count(&trimmed_text(value)) {
                item.download_count = count;
            }
        }
        "Beschreibung" => {
            let html = value.inner_html();
            if !html.trim().is_empty() {
                item.description = html_to_markdown(&html);
            }
        }
        other if IGNORED_LABELS.contains(&other) => {}
        other => tracing::warn!("Unknown field \"{}\" encountered", other),
    }
}

fn normalize_author(author: String) -> String {
    if author == MERGED_AUTHOR {
        CANONICAL_AUTHOR.to_string()
    } else {
        author
    }
}

/// Reads N from a `(N mal runtergeladen)` suffix
fn parse_download_count(text: &str) -> Option<u64> {
    DOWNLOAD_COUNT
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|count| count.as_str().parse().ok())
}

/// Converts description markup to Markdown, keeping the markup if that fails
fn html_to_markdown(html: &str) -> String {
    convert_or_keep(html, htmd::convert)
}

/// Runs `convert` on `html`, falling back to `html` on an error or a panic
fn convert_or_keep<F, E>(html: &str, convert: F) -> String
where
    F: FnOnce(&str) -> Result<String, E> + UnwindSafe,
    E: Display,
{
    match panic::catch_unwind(|| convert(html)) {
        Ok(Ok(markdown)) => markdown.trim().to_string(),
        Ok(Err(e)) => {
            tracing::warn!("Keeping raw description markup: {}", e);
            html.to_string()
        }
        Err(_) => {
            tracing::warn!("Markdown conversion panicked, keeping raw description markup");
            html.to_string()
        }
    }
}
