use std::future::Future;
use std::path::PathBuf;

use crate::slots::SlotRecord;

use super::types::FetchError;

/// Somewhere a slot snapshot can be loaded from.
pub trait SnapshotSource: Send + Sync + 'static {
    fn load_snapshot(&self) -> impl Future<Output = Result<Vec<SlotRecord>, FetchError>> + Send;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reads the snapshot file the parking app writes next to the dashboard.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    fn load_snapshot(&self) -> impl Future<Output = Result<Vec<SlotRecord>, FetchError>> + Send {
        let path = self.path.clone();
        async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(b) => b,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(FetchError::NotReady { status: None });
                }
                Err(e) => return Err(FetchError::network(e)),
            };
            serde_json::from_slice(&bytes).map_err(FetchError::parse)
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
