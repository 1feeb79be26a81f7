//! Shared fixtures for the integration tests

use ccan_archiver::config::{Config, EnumeratedConfig, HttpConfig, ListingConfig, OutputConfig};
use ccan_archiver::crawler::Fetcher;
use ccan_archiver::record::{CcanItem, Record};
use std::io::{Cursor, Read};
use tokio::sync::mpsc::Receiver;
use zip::ZipArchive;

/// Configuration pointing both catalogs at the mock server, with no delays
pub fn test_config(server_uri: &str, last_id: u32) -> Config {
    Config {
        http: HttpConfig {
            user_agent: "TestArchiver/1.0".to_string(),
            timeout_secs: 10,
        },
        listing: ListingConfig {
            url_template: format!("{}/listing?pg={{page}}", server_uri),
            link_base: format!("{}/ccan/", server_uri),
            retry_delay_ms: 10,
            max_consecutive_failures: 6,
            include_supplementary: false,
        },
        enumerated: EnumeratedConfig {
            url_template: format!("{}/detail?dl={{id}}", server_uri),
            link_base: format!("{}/cc/", server_uri),
            first_id: 1,
            last_id,
            delay_ms: 0,
        },
        output: OutputConfig {
            archive_path: "unused.zip".to_string(),
            channel_capacity: 4,
        },
    }
}

pub fn fetcher() -> Fetcher {
    Fetcher::new(&HttpConfig::default()).expect("Failed to build fetcher")
}

/// One listing row in the column order of the ccan.de listing
pub fn listing_row(name: &str, href: &str, author: &str) -> String {
    format!(
        "<tr><td><img src=\"t.png\"></td><td><b>{}</b></td><td><a href=\"{}\">DL</a></td><td>Objekte</td><td><a href=\"#\">{}</a></td><td><span>CR</span></td><td>4</td><td>120</td><td>1 MB</td><td>24.12.08 18:30</td></tr>",
        name, href, author
    )
}

/// A listing page made of a header row followed by `rows`
pub fn listing_page(rows: &[String]) -> String {
    format!(
        "<html><body><table><tbody><tr><th>Typ</th><th>Titel</th><th>DL</th><th>Kategorie</th><th>Autor</th><th>Engine</th><th>Votes</th><th>Downloads</th><th>Größe</th><th>Datum</th></tr>{}</tbody></table></body></html>",
        rows.concat()
    )
}

/// A Clonk-Center detail page
pub fn detail_page(name: &str, author: &str, href: &str) -> String {
    format!(
        r#"<html><body><table class="fullgrid"><tbody>
        <tr class="header"><td colspan="2">{}</td></tr>
        <tr><td>Datum</td><td>01.03.2005 12:00:00</td></tr>
        <tr><td>Autor</td><td>{}</td></tr>
        <tr><td>Gepostet von</td><td>Admin</td></tr>
        <tr><td>Engine-Version</td><td>4.9.1.0</td></tr>
        <tr><td>Download</td><td><a href="{}">file</a> (7 mal runtergeladen)</td></tr>
        <tr><td>Beschreibung</td><td><p>Just a test.</p></td></tr>
        </tbody></table></body></html>"#,
        name, author, href
    )
}

pub fn ccan_record(name: &str, author: &str, link: String) -> Record {
    Record::from(CcanItem {
        name: name.to_string(),
        author: author.to_string(),
        category: "Objekte".to_string(),
        engine: "CR".to_string(),
        download_link: link,
        ..CcanItem::default()
    })
}

/// Drains a receiver whose senders have all been dropped
pub async fn collect(mut receiver: Receiver<Record>) -> Vec<Record> {
    let mut records = Vec::new();
    while let Some(record) = receiver.recv().await {
        records.push(record);
    }
    records
}

pub fn open_archive(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes)).expect("Archive should be readable")
}

pub fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("Missing archive entry {}", name));
    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer).expect("Failed to read entry");
    buffer
}

pub fn entry_names(archive: &ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}
