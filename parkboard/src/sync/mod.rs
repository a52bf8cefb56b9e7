pub mod api_client;
pub mod poller;
pub mod source;
pub mod types;

pub use api_client::ApiClient;
pub use poller::{poll_once, PollerHandle, SnapshotPoller};
pub use source::{FileSource, SnapshotSource};
pub use types::{CycleOutcome, FetchError, PollStatus};
