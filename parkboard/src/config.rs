use std::time::Duration;

use url::Url;

/// Default snapshot server URL.
/// Override at build time: PARKBOARD_URL=https://example.com cargo build
pub const DEFAULT_BASE_URL: &str = match option_env!("PARKBOARD_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

pub const DEFAULT_SNAPSHOT_PATH: &str = "data/slots.json";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL '{value}': {message}")]
    InvalidUrl { value: String, message: String },

    #[error("Invalid value for {name}: '{value}' is not a number of milliseconds")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Poll interval must be greater than zero")]
    ZeroInterval,

    #[error("Failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    /// Snapshot location relative to `base_url`.
    pub snapshot_path: String,
    pub interval: Duration,
    /// No timeout unless set; a hung request then holds its cycle open.
    pub timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

impl DashboardConfig {
    /// Defaults overlaid with PARKBOARD_URL, PARKBOARD_INTERVAL_MS and
    /// PARKBOARD_TIMEOUT_MS.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("PARKBOARD_URL") {
            config.base_url = url;
        }
        if let Some(ms) = lookup("PARKBOARD_INTERVAL_MS") {
            config.interval = parse_millis("PARKBOARD_INTERVAL_MS", &ms)?;
        }
        if let Some(ms) = lookup("PARKBOARD_TIMEOUT_MS") {
            config.timeout = Some(parse_millis("PARKBOARD_TIMEOUT_MS", &ms)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_url(&self.base_url)?;
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

pub fn parse_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })
}

fn parse_millis(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}
