use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use serde_json::Value;
use travelog_core::DataSource;
use url::Url;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each further attempt.
    pub base_delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Where each [`DataSource`] is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub local: String,
    pub bucket: String,
    pub api: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            local: "http://localhost:3000/travel-data.json".to_string(),
            bucket: "https://my-travel-data-bucket.s3.us-east-1.amazonaws.com/travel-data.json"
                .to_string(),
            api: "http://localhost:3000/api/travel-data".to_string(),
        }
    }
}

impl SourceUrls {
    pub fn request(&self, source: DataSource) -> Result<FetchRequest, FetchError> {
        let raw = match source {
            DataSource::Local => &self.local,
            DataSource::Bucket => &self.bucket,
            DataSource::Api => &self.api,
        };
        let base = Url::parse(raw)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{raw}: {err}")))?;
        Ok(FetchRequest { source, base })
    }
}

/// A resolved source, ready to be turned into a cache-busting URL per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub source: DataSource,
    pub base: Url,
}

impl FetchRequest {
    /// Static files get a `v=<millis>` parameter so intermediaries cannot serve a stale copy.
    pub fn url_at(&self, now: DateTime<Utc>) -> Url {
        let mut url = self.base.clone();
        if matches!(self.source, DataSource::Local | DataSource::Bucket) {
            url.query_pairs_mut()
                .append_pair("v", &now.timestamp_millis().to_string());
        }
        url
    }
}

/// One attempt at reading the raw rows.
#[async_trait::async_trait]
pub trait RowFetcher: Send + Sync {
    async fn fetch_rows(&self, url: &Url) -> Result<Vec<Value>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .default_headers(no_cache_headers())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Client, err.to_string()))
    }
}

#[async_trait::async_trait]
impl RowFetcher for ReqwestFetcher {
    async fn fetch_rows(&self, url: &Url) -> Result<Vec<Value>, FetchError> {
        let client = self.build_client()?;
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let kind = FailureKind::HttpStatus(status.as_u16());
            let message = if kind.is_transient() {
                format!("Server error: {status}")
            } else {
                format!("Failed to fetch travel data: {status}")
            };
            return Err(FetchError::new(kind, message));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        parse_rows(&bytes)
    }
}

/// Decodes the body; only a JSON array root is accepted.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<Value>, FetchError> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))?;
    match root {
        Value::Array(rows) => Ok(rows),
        _ => Err(FetchError::new(
            FailureKind::MalformedPayload,
            "Invalid data format: expected array",
        )),
    }
}

fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
