//! HTTP fetcher shared by both crawlers and the archiver
//!
//! One GET with an overall timeout. Redirects are followed by the client, so
//! the returned response's URL is the final location. Any status outside
//! 200–399 is an error.

use crate::config::HttpConfig;
use crate::ArchiverError;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with the configured user agent and timeout
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(30))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Cheap-to-clone handle around the shared HTTP client
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, ArchiverError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends a GET request and validates the response status
    ///
    /// The body is not read; callers stream it and the connection is released
    /// when the response is dropped.
    ///
    /// # Errors
    ///
    /// * `UrlParse` - `url` is not an absolute URL
    /// * `Http` - transport failure, including the timeout
    /// * `HttpStatus` - final status outside 200–399
    pub async fn fetch(&self, url: &str) -> Result<Response, ArchiverError> {
        let parsed = Url::parse(url).map_err(|source| ArchiverError::UrlParse {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| ArchiverError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        if !(200..=399).contains(&status) {
            return Err(ArchiverError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }

    /// Fetches a page and reads its whole body as text
    pub async fn fetch_text(&self, url: &str) -> Result<String, ArchiverError> {
        let response = self.fetch(url).await?;
        response.text().await.map_err(|source| ArchiverError::Http {
            url: url.to_string(),
            source,
        })
    }
}
