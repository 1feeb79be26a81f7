//! Listing crawler tests

use crate::common::{collect, fetcher, listing_page, listing_row, test_config};
use ccan_archiver::crawler::ListingCrawler;
use ccan_archiver::{ArchiverError, Archivable};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_listing_stops_at_first_empty_page() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), 0);

    let first_page = listing_page(&[
        listing_row("Alpha", "files/alpha.c4d", "Sven2"),
        listing_row("Beta", "files/beta.c4s", "Newton"),
        // No download link: dropped
        "<tr><td></td><td>Broken</td><td>-</td><td>Objekte</td><td>X</td><td>CR</td><td>1</td><td>2</td><td>1 MB</td><td>24.12.08 18:30</td></tr>".to_string(),
        listing_row("Gamma", "https://mirror.example/gamma.zip", "Clonkonaut"),
    ]);

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(first_page))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = ListingCrawler::new(fetcher(), config.listing);
    let (sender, receiver) = mpsc::channel(16);

    let errors = crawler.crawl(sender).await.expect("Crawl should finish");
    let records = collect(receiver).await;

    assert!(errors.is_empty());
    assert_eq!(records.len(), 3);

    let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

    assert_eq!(
        records[0].download_link(),
        format!("{}/ccan/files/alpha.c4d", server.uri())
    );
    assert_eq!(records[2].download_link(), "https://mirror.example/gamma.zip");
    assert!(records.iter().all(|r| r.source_name() == "CCAN"));
}

#[tokio::test]
async fn test_listing_aborts_after_consecutive_failures() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), 0);

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "0"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&server)
        .await;

    let crawler = ListingCrawler::new(fetcher(), config.listing);
    let (sender, receiver) = mpsc::channel(16);

    let result = crawler.crawl(sender).await;
    let records = collect(receiver).await;

    match result {
        Err(ArchiverError::CrawlAborted { url, failures, .. }) => {
            assert_eq!(failures, 6);
            assert!(url.ends_with("/listing?pg=0"));
        }
        other => panic!("Expected CrawlAborted, got {:?}", other),
    }
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_listing_recovers_from_intermittent_failures() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), 0);

    // Five failures on each page stay below the limit of six
    for page in ["0", "1"] {
        Mock::given(method("GET"))
            .and(path("/listing"))
            .and(query_param("pg", page))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(5)
            .with_priority(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[listing_row("Alpha", "a.c4d", "Sven2")])),
        )
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("pg", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .with_priority(2)
        .mount(&server)
        .await;

    let crawler = ListingCrawler::new(fetcher(), config.listing);
    let (sender, receiver) = mpsc::channel(16);

    let errors = crawler.crawl(sender).await.expect("Crawl should not abort");
    let records = collect(receiver).await;

    assert_eq!(errors.len(), 10);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Alpha");
}

#[tokio::test]
async fn test_page_without_table_is_retried() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri(), 0);
    config.listing.max_consecutive_failures = 2;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Wartung</body></html>"))
        .expect(2)
        .mount(&server)
        .await;

    let crawler = ListingCrawler::new(fetcher(), config.listing);
    let (sender, _receiver) = mpsc::channel(16);

    let result = crawler.crawl(sender).await;
    assert!(matches!(
        result,
        Err(ArchiverError::CrawlAborted { failures: 2, .. })
    ));
}

#[tokio::test]
async fn test_supplementary_items_come_first() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri(), 0);
    config.listing.include_supplementary = true;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .mount(&server)
        .await;

    let crawler = ListingCrawler::new(fetcher(), config.listing);
    let (sender, receiver) = mpsc::channel(64);

    crawler.crawl(sender).await.expect("Crawl should finish");
    let records = collect(receiver).await;

    let curated = ccan_archiver::record::supplementary_items();
    assert_eq!(records.len(), curated.len());
    assert!(records
        .iter()
        .all(|r| r.download_link().contains("clonkx.de")));
}
