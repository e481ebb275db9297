use std::time::Duration;

use url::Url;

use crate::domain::{AppError, Category, Result};

pub const DEFAULT_SMALL_URL: &str = "http://ipv4.download.thinkbroadband.com/10MB.zip";
pub const DEFAULT_MEDIUM_URL: &str = "http://ipv4.download.thinkbroadband.com/50MB.zip";
pub const DEFAULT_LARGE_URL: &str = "http://ipv4.download.thinkbroadband.com/200MB.zip";

/// Where each category downloads from, and how long a transfer may take
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedtestConfig {
    small_url: String,
    medium_url: String,
    large_url: String,
    timeout: Option<Duration>,
}

impl Default for SpeedtestConfig {
    fn default() -> Self {
        Self {
            small_url: DEFAULT_SMALL_URL.to_string(),
            medium_url: DEFAULT_MEDIUM_URL.to_string(),
            large_url: DEFAULT_LARGE_URL.to_string(),
            timeout: None,
        }
    }
}

impl SpeedtestConfig {
    /// Build a configuration, replacing the default URL of every category
    /// that has an override. Overrides must be absolute http(s) URLs.
    pub fn new(
        small_url: Option<String>,
        medium_url: Option<String>,
        large_url: Option<String>,
    ) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            small_url: resolve_url(small_url, defaults.small_url)?,
            medium_url: resolve_url(medium_url, defaults.medium_url)?,
            large_url: resolve_url(large_url, defaults.large_url)?,
            timeout: None,
        })
    }

    /// Bound every transfer by `seconds`; `None` keeps the transport default
    pub fn with_timeout(mut self, seconds: Option<u64>) -> Result<Self> {
        self.timeout = match seconds {
            Some(0) => {
                return Err(AppError::InvalidConfiguration(
                    "timeout must be at least one second".to_string(),
                ))
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };
        Ok(self)
    }

    pub fn url_for(&self, category: Category) -> &str {
        match category {
            Category::Small => &self.small_url,
            Category::Medium => &self.medium_url,
            Category::Large => &self.large_url,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn resolve_url(candidate: Option<String>, default: String) -> Result<String> {
    let Some(raw) = candidate else {
        return Ok(default);
    };

    let parsed = Url::parse(&raw)
        .map_err(|e| AppError::InvalidConfiguration(format!("invalid URL '{}': {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw),
        other => Err(AppError::InvalidConfiguration(format!(
            "unsupported URL scheme '{}' in '{}'",
            other, raw
        ))),
    }
}
