//! HTTP client for the emergency-medical information service.

use crate::uri::encode_component;

use super::error::{FeedError, SNIPPET_CHARS};
use super::{FeedKind, FeedSource};

/// Default base URL for the emergency medical information service.
const DEFAULT_BASE_URL: &str = "http://apis.data.go.kr/B552657/ErmctInfoInqireService";

/// Default number of rows requested per page.
const DEFAULT_NUM_OF_ROWS: u32 = 100;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Service key issued by the data portal (raw, not yet URL-encoded)
    pub service_key: String,
    /// Base URL for the API (defaults to the public data portal)
    pub base_url: String,
    /// Rows per page
    pub num_of_rows: u32,
    /// Page number, starting at 1
    pub page_no: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config with the given service key.
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            num_of_rows: DEFAULT_NUM_OF_ROWS,
            page_no: 1,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set rows per page.
    pub fn with_num_of_rows(mut self, n: u32) -> Self {
        self.num_of_rows = n;
        self
    }

    /// Set the page number.
    pub fn with_page_no(mut self, page: u32) -> Self {
        self.page_no = page;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the facility and bed-availability feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    encoded_key: String,
    num_of_rows: u32,
    page_no: u32,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            encoded_key: encode_component(&config.service_key),
            num_of_rows: config.num_of_rows,
            page_no: config.page_no,
        })
    }

    /// Full request URL for a feed.
    ///
    /// The service key is already percent-encoded, so the query string is
    /// assembled by hand.
    pub fn request_url(&self, kind: FeedKind) -> String {
        format!(
            "{}/{}?serviceKey={}&numOfRows={}&pageNo={}",
            self.base_url,
            kind.path(),
            self.encoded_key,
            self.num_of_rows,
            self.page_no
        )
    }

    /// Fetch the raw XML body of a feed.
    pub async fn fetch_raw(&self, kind: FeedKind) -> Result<String, FeedError> {
        let url = self.request_url(kind);
        tracing::debug!(feed = %kind, "requesting feed");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body.chars().take(SNIPPET_CHARS).collect(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(feed = %kind, bytes = body.len(), "received feed");
        Ok(body)
    }
}

impl FeedSource for FeedClient {
    async fn fetch(&self, kind: FeedKind) -> Result<String, FeedError> {
        self.fetch_raw(kind).await
    }
}
