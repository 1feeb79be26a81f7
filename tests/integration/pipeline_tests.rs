//! End-to-end pipeline tests

use crate::common::{
    detail_page, entry_names, fetcher, listing_page, listing_row, open_archive, read_entry,
    test_config,
};
use ccan_archiver::crawler::run_pipeline;
use ccan_archiver::output::README_ENTRY;
use ccan_archiver::{Archiver, ArchiverError};
use std::io::Cursor;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_pipeline_archives_both_catalogs() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), 2);

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            listing_row("Alpha", "files/alpha.c4d", "Sven2"),
            // Same file as the Clonk-Center item below
            listing_row("Shared", "/shared/pack.c4d", "Newton"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/detail"))
        .and(query_param("dl", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(detail_page("Wipfs", "Sven2", "wipfs.c4d")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/detail"))
        .and(query_param("dl", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(detail_page("Shared", "Newton", "/shared/pack.c4d")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"\.c4d$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"DATA".to_vec()))
        .mount(&server)
        .await;

    let archiver = Archiver::new(Cursor::new(Vec::new()), fetcher());
    let (cursor, report) = run_pipeline(&config, fetcher(), archiver)
        .await
        .expect("Pipeline should succeed");

    assert_eq!(report.archived, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    let mut zip = open_archive(cursor.into_inner());
    let names = entry_names(&zip);
    assert!(names.contains(&"CCAN/Sven2/Alpha.c4d".to_string()));
    assert!(names.contains(&"Clonk-Center/Sven2/Wipfs.c4d".to_string()));
    assert!(names.contains(&"Clonk-Center/Sven2/Wipfs.c4d.json".to_string()));
    // 3 payloads, 3 metadata entries and the README
    assert_eq!(names.len(), 7);

    let shared = names
        .iter()
        .filter(|n| n.ends_with("/Newton/Shared.c4d"))
        .count();
    assert_eq!(shared, 1);

    let readme = String::from_utf8(read_entry(&mut zip, README_ENTRY)).expect("UTF-8 README");
    assert!(readme.contains("- **Items**: 3"));
}

#[tokio::test]
async fn test_pipeline_fails_when_listing_aborts() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), 1);

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/detail"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let archiver = Archiver::new(Cursor::new(Vec::new()), fetcher());
    let result = run_pipeline(&config, fetcher(), archiver).await;

    assert!(matches!(result, Err(ArchiverError::CrawlAborted { .. })));
}

#[tokio::test]
async fn test_archive_file_is_written_to_disk() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let archive_path = dir.path().join("result.zip");

    let mut config = test_config(&server.uri(), 1);
    config.output.archive_path = archive_path.to_string_lossy().into_owned();

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/detail"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = ccan_archiver::run_archive(config)
        .await
        .expect("Run should succeed");
    assert_eq!(report.total(), 0);

    let bytes = std::fs::read(&archive_path).expect("Archive should exist");
    let zip = open_archive(bytes);
    assert_eq!(entry_names(&zip), vec![README_ENTRY]);
}
