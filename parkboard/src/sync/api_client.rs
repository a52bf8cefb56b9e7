use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::{self, ConfigError, DashboardConfig};
use crate::slots::SlotRecord;

use super::source::SnapshotSource;
use super::types::FetchError;

/// Epoch-millis values for the `cb` query parameter.
///
/// Strictly increasing within the process, even when two polls land in the
/// same millisecond or the wall clock steps backwards.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicI64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_millis: i64) -> i64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    snapshot_url: Url,
    cache_buster: Arc<CacheBuster>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        snapshot_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let mut base = config::parse_url(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let snapshot_url = base
            .join(snapshot_path.trim_start_matches('/'))
            .map_err(|e| ConfigError::InvalidUrl {
                value: snapshot_path.to_string(),
                message: e.to_string(),
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            snapshot_url,
            cache_buster: Arc::new(CacheBuster::new()),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url, &config.snapshot_path, config.timeout)
    }

    /// Snapshot location without the cache-buster.
    pub fn snapshot_url(&self) -> &Url {
        &self.snapshot_url
    }

    fn busted_url(&self, cache_buster: i64) -> Url {
        let mut url = self.snapshot_url.clone();
        url.query_pairs_mut()
            .append_pair("cb", &cache_buster.to_string());
        url
    }

    // ── Snapshot ────────────────────────────────────────────────────────

    pub async fn get_snapshot(&self) -> Result<Vec<SlotRecord>, FetchError> {
        let url = self.busted_url(self.cache_buster.next());
        log::debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = resp.status();
        if !status.is_success() {
            log::debug!("snapshot request returned {}", status);
            return Err(FetchError::NotReady {
                status: Some(status.as_u16()),
            });
        }

        let body = resp.bytes().await.map_err(FetchError::network)?;
        serde_json::from_slice(&body).map_err(FetchError::parse)
    }
}

impl SnapshotSource for ApiClient {
    fn load_snapshot(&self) -> impl Future<Output = Result<Vec<SlotRecord>, FetchError>> + Send {
        self.get_snapshot()
    }

    fn describe(&self) -> String {
        self.snapshot_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, "data/slots.json", None).unwrap()
    }

    #[test]
    fn snapshot_url_from_bare_host() {
        let api = client("http://localhost:8080");
        assert_eq!(
            api.snapshot_url().as_str(),
            "http://localhost:8080/data/slots.json"
        );
    }

    #[test]
    fn snapshot_url_keeps_base_path() {
        let api = client("http://example.com/parking");
        assert_eq!(
            api.snapshot_url().as_str(),
            "http://example.com/parking/data/slots.json"
        );
        let api = client("http://example.com/parking/");
        assert_eq!(
            api.snapshot_url().as_str(),
            "http://example.com/parking/data/slots.json"
        );
    }

    #[test]
    fn busted_url_carries_timestamp() {
        let api = client("http://localhost:8080");
        assert_eq!(
            api.busted_url(1_700_000_000_123).as_str(),
            "http://localhost:8080/data/slots.json?cb=1700000000123"
        );
    }

    #[test]
    fn cache_buster_follows_clock() {
        let cb = CacheBuster::new();
        assert_eq!(cb.next_at(1_000), 1_000);
        assert_eq!(cb.next_at(1_005), 1_005);
    }

    #[test]
    fn cache_buster_never_repeats() {
        let cb = CacheBuster::new();
        assert_eq!(cb.next_at(1_000), 1_000);
        assert_eq!(cb.next_at(1_000), 1_001);
        // Clock stepped backwards.
        assert_eq!(cb.next_at(900), 1_002);
    }

    #[test]
    fn cache_buster_increases_on_real_clock() {
        let cb = CacheBuster::new();
        let a = cb.next();
        let b = cb.next();
        assert!(b > a);
    }
}
