use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use travelog_core::{DataSource, ValidationMode};
use travelog_engine::{FetchSettings, SourceUrls};

pub const DEFAULT_CONFIG_FILENAME: &str = "travelog.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    pub local: String,
    pub bucket: String,
    pub api: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        let urls = SourceUrls::default();
        Self {
            local: urls.local,
            bucket: urls.bucket,
            api: urls.api,
        }
    }
}

/// Contents of `travelog.ron`; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: DataSource,
    pub urls: UrlConfig,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub validation: ValidationMode,
    pub dedupe: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            source: DataSource::default(),
            urls: UrlConfig::default(),
            max_attempts: fetch.max_attempts,
            base_delay_ms: millis(fetch.base_delay),
            request_timeout_ms: millis(fetch.request_timeout),
            validation: ValidationMode::default(),
            dedupe: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..FetchSettings::default()
        }
    }

    pub fn source_urls(&self) -> SourceUrls {
        SourceUrls {
            local: self.urls.local.clone(),
            bucket: self.urls.bucket.clone(),
            api: self.urls.api.clone(),
        }
    }

    pub fn level_filter(&self, override_level: Option<&str>) -> Result<log::LevelFilter, ConfigError> {
        let name = override_level.unwrap_or(&self.log_level);
        travelog_logging::parse_level(name)
            .ok_or_else(|| ConfigError::InvalidLogLevel(name.to_string()))
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
