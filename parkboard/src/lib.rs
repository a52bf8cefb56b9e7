//! Parkboard: a live dashboard for parking slot occupancy.
//!
//! A [`sync::SnapshotPoller`] fetches the slot snapshot published by the
//! parking app and hands each result to a [`board::Board`], which redraws
//! its grid of slot cards and the total/free/occupied counters.

pub mod board;
pub mod config;
pub mod logging;
pub mod slots;
pub mod sync;

pub use board::{render, render_error, Board, BoardError, HtmlBoard, MemoryBoard, TerminalBoard};
pub use config::{ConfigError, DashboardConfig};
pub use slots::view::{CardStyle, DashboardView, SlotCard, Summary};
pub use slots::SlotRecord;
pub use sync::{
    poll_once, ApiClient, FetchError, FileSource, PollerHandle, SnapshotPoller, SnapshotSource,
};
