use serde::Deserialize;

/// Main configuration structure for the archiver
///
/// Every section is optional; a missing section or key falls back to the
/// values used for the public ccan.de and Clonk-Center catalogs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub listing: ListingConfig,
    pub enumerated: EnumeratedConfig,
    pub output: OutputConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Overall timeout for a single request, body included (seconds)
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("ccan-archiver/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30 * 60,
        }
    }
}

/// Paginated listing crawl configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ListingConfig {
    /// Listing URL with a `{page}` placeholder for the 0-based page index
    pub url_template: String,

    /// Base that relative download hrefs are resolved against
    pub link_base: String,

    /// Delay before retrying a failed page (milliseconds)
    pub retry_delay_ms: u64,

    /// Consecutive failures after which the crawl is aborted
    pub max_consecutive_failures: u32,

    /// Emit the curated items the listing does not carry before crawling
    pub include_supplementary: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url_template: "https://ccan.de/cgi-bin/ccan/ccan-view.pl?a=&sc=tm&so=d&nr=250&ac=ty-ti-ni-tm-ca-dc-ev-vo-si&reveal=1&pg={page}".to_string(),
            link_base: "https://ccan.de/cgi-bin/ccan/".to_string(),
            retry_delay_ms: 5_000,
            max_consecutive_failures: 6,
            include_supplementary: true,
        }
    }
}

/// Enumerated-ID detail crawl configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EnumeratedConfig {
    /// Detail page URL with an `{id}` placeholder
    pub url_template: String,

    /// Base that relative download hrefs are resolved against
    pub link_base: String,

    /// First ID to fetch
    pub first_id: u32,

    /// Last ID to fetch (inclusive)
    pub last_id: u32,

    /// Delay between two IDs (milliseconds)
    pub delay_ms: u64,
}

impl Default for EnumeratedConfig {
    fn default() -> Self {
        Self {
            url_template: "https://cc-archive.lwrl.de/download.php?act=getinfo&dl={id}".to_string(),
            link_base: "https://cc-archive.lwrl.de/".to_string(),
            first_id: 1,
            last_id: 643,
            delay_ms: 1_000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the zip archive to create
    pub archive_path: String,

    /// Number of records buffered between the crawlers and the archiver
    pub channel_capacity: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            archive_path: "result.zip".to_string(),
            channel_capacity: 25,
        }
    }
}
