//! Listing table parser
//!
//! Turns one ccan.de listing page into [`CcanItem`]s. The page is a single
//! table body whose first row is the header; every following row is one item
//! with its fields at fixed column positions (see [`ColumnLayout`]).
//!
//! Rows that do not validate are dropped without an error: a listing always
//! carries a few half-filled rows and they are not worth failing a page over.

use crate::crawler::text::{children_named, trimmed_text};
use crate::record::CcanItem;
use crate::url::resolve_href;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Date-time format of the listing's date column, e.g. `30.06.04 21:02`
pub const LISTING_DATE_FORMAT: &str = "%d.%m.%y %H:%M";

static TABLE_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table > tbody").expect("static selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Cell index of every field the listing provides
///
/// Columns that are not listed (the type icon and the file size) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub link: usize,
    pub category: usize,
    pub author: usize,
    pub engine: usize,
    pub votes: usize,
    pub downloads: usize,
    pub date: usize,
}

impl ColumnLayout {
    /// Layout of the listing requested with `ac=ty-ti-ni-tm-ca-dc-ev-vo-si`
    pub const CCAN: Self = Self {
        name: 1,
        link: 2,
        category: 3,
        author: 4,
        engine: 5,
        votes: 6,
        downloads: 7,
        date: 9,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::CCAN
    }
}

/// Parses a listing page with the default column layout
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `link_base` - Base that relative download hrefs are resolved against
///
/// # Returns
///
/// * `Ok(Vec<CcanItem>)` - Valid rows in document order; empty means there are no more pages
/// * `Err(String)` - The page has no table body at all
///
/// # Example
///
/// ```
/// use ccan_archiver::crawler::parse_listing_page;
///
/// let html = "<table><tbody><tr><th>header</th></tr></tbody></table>";
/// let items = parse_listing_page(html, "https://ccan.de/cgi-bin/ccan/").unwrap();
/// assert!(items.is_empty());
/// ```
pub fn parse_listing_page(html: &str, link_base: &str) -> Result<Vec<CcanItem>, String> {
    let document = Html::parse_document(html);
    parse_listing_document(&document, ColumnLayout::CCAN, link_base)
}

/// Parses an already built document with an explicit column layout
pub fn parse_listing_document(
    document: &Html,
    layout: ColumnLayout,
    link_base: &str,
) -> Result<Vec<CcanItem>, String> {
    let body = document
        .select(&TABLE_BODY)
        .next()
        .ok_or_else(|| "listing page contains no table body".to_string())?;

    let items = children_named(body, &["tr"])
        .skip(1)
        .filter_map(|row| {
            let item = parse_row(row, layout, link_base);
            if item.is_none() {
                tracing::trace!("Dropping malformed listing row");
            }
            item
        })
        .collect();

    Ok(items)
}

/// Extracts one item from a table row; None if any field fails validation
fn parse_row(row: ElementRef<'_>, layout: ColumnLayout, link_base: &str) -> Option<CcanItem> {
    let cells: Vec<ElementRef<'_>> = children_named(row, &["td", "th"]).collect();

    let name = non_empty_text(*cells.get(layout.name)?)?;
    let download_link = cell_link(*cells.get(layout.link)?, link_base)?;
    let category = non_empty_text(*cells.get(layout.category)?)?;
    let author = non_empty_text(*cells.get(layout.author)?)?;
    let engine = non_empty_text(*cells.get(layout.engine)?)?;
    let votes = trimmed_text(*cells.get(layout.votes)?).parse::<u64>().ok()?;
    let download_count = trimmed_text(*cells.get(layout.downloads)?)
        .parse::<u64>()
        .ok()?;
    let date = parse_listing_date(&trimmed_text(*cells.get(layout.date)?))?;

    let item = CcanItem {
        name,
        date: Some(date),
        download_count,
        author,
        votes,
        category,
        engine,
        download_link,
    };

    item.is_complete().then_some(item)
}

fn non_empty_text(cell: ElementRef<'_>) -> Option<String> {
    let text = trimmed_text(cell);
    (!text.is_empty()).then_some(text)
}

/// Resolves the href of the first anchor inside a cell
fn cell_link(cell: ElementRef<'_>, link_base: &str) -> Option<String> {
    let anchor = cell.select(&ANCHOR).next()?;
    let href = anchor.value().attr("href")?;
    resolve_href(href, link_base)
}

/// Parses a date in [`LISTING_DATE_FORMAT`]
pub fn parse_listing_date(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), LISTING_DATE_FORMAT).ok()
}
