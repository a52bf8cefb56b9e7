use serde::Serialize;

use crate::slots::view::Summary;

pub const NOT_READY_MESSAGE: &str = "Snapshot not found yet. Run the parking app once to generate it.";

/// Why a poll cycle could not produce a snapshot. Every variant ends up on the
/// same "No data" card; only the message differs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Snapshot not found yet. Run the parking app once to generate it.")]
    NotReady { status: Option<u16> },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl FetchError {
    pub fn network(e: impl std::fmt::Display) -> Self {
        Self::Network {
            message: e.to_string(),
        }
    }

    pub fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse {
            message: e.to_string(),
        }
    }
}

// ── Poll status ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    Rendered { summary: Summary },
    Failed { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollStatus {
    /// Completed cycles, successful or not.
    pub cycles: u64,
    pub last: Option<CycleOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_message_is_user_facing() {
        let err = FetchError::NotReady { status: Some(404) };
        assert_eq!(err.to_string(), NOT_READY_MESSAGE);
    }

    #[test]
    fn wraps_underlying_messages() {
        assert_eq!(
            FetchError::network("connection refused").to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            FetchError::parse("expected value at line 1 column 1").to_string(),
            "Parse error: expected value at line 1 column 1"
        );
    }
}
