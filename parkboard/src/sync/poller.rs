//! Background polling loop: fetch the snapshot, then redraw the board.
//!
//! One cycle runs immediately on start, then one per interval. Cycles never
//! overlap: a tick that falls due while a fetch is still in flight is
//! skipped, so boards always receive renders in the order fetches were
//! issued.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::board::Board;
use crate::slots::view::DashboardView;
use crate::slots::SlotRecord;

use super::source::SnapshotSource;
use super::types::{CycleOutcome, FetchError, PollStatus};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Run exactly one fetch-then-render cycle.
pub async fn poll_once<S, B>(source: &S, board: &Mutex<B>) -> CycleOutcome
where
    S: SnapshotSource,
    B: Board + ?Sized,
{
    let fetched = source.load_snapshot().await;
    apply(board, fetched)
}

fn apply<B: Board + ?Sized>(
    board: &Mutex<B>,
    fetched: Result<Vec<SlotRecord>, FetchError>,
) -> CycleOutcome {
    let (view, outcome) = match fetched {
        Ok(slots) => {
            let view = DashboardView::from_snapshot(&slots);
            let summary = view.summary;
            log::debug!(
                "Rendering {} slots ({} free, {} occupied)",
                summary.total,
                summary.free,
                summary.occupied
            );
            (view, CycleOutcome::Rendered { summary })
        }
        Err(e) => {
            let message = e.to_string();
            log::warn!("Snapshot unavailable: {}", message);
            (DashboardView::error(&message), CycleOutcome::Failed { message })
        }
    };

    if let Err(e) = lock(board).present(&view) {
        log::error!("Failed to draw dashboard: {}", e);
    }
    outcome
}

/// A poisoned board still holds a complete view; keep drawing on it.
fn lock<B: ?Sized>(board: &Mutex<B>) -> MutexGuard<'_, B> {
    match board.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub struct SnapshotPoller;

impl SnapshotPoller {
    /// Spawn the polling task on the current tokio runtime.
    pub fn start<S, B>(source: S, board: Arc<Mutex<B>>, interval: Duration) -> PollerHandle
    where
        S: SnapshotSource,
        B: Board,
    {
        let cancel = CancellationToken::new();
        let (status_tx, status_rx) = watch::channel(PollStatus::default());
        let interval = interval.max(MIN_INTERVAL);

        log::info!(
            "Polling {} every {} ms",
            source.describe(),
            interval.as_millis()
        );

        let token = cancel.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                // Stopping mid-fetch drops the request; its result is never drawn.
                let fetched = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    fetched = source.load_snapshot() => fetched,
                };

                let outcome = apply(&board, fetched);
                status_tx.send_modify(|status| {
                    status.cycles += 1;
                    status.last = Some(outcome);
                });
            }

            log::info!("Polling stopped");
        });

        PollerHandle {
            cancel,
            task,
            status: status_rx,
        }
    }
}

pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    status: watch::Receiver<PollStatus>,
}

impl PollerHandle {
    pub fn status(&self) -> PollStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified after every completed cycle.
    pub fn subscribe(&self) -> watch::Receiver<PollStatus> {
        self.status.clone()
    }

    /// Token that stops the poller when cancelled, e.g. from a signal handler.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the loop and wait for the task to exit.
    pub async fn stop(self) -> PollStatus {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            log::error!("Polling task ended abnormally: {}", e);
        }
        let status = self.status.borrow().clone();
        status
    }

    /// Wait until the loop exits on its own, i.e. its token was cancelled elsewhere.
    pub async fn join(self) -> PollStatus {
        if let Err(e) = self.task.await {
            log::error!("Polling task ended abnormally: {}", e);
        }
        let status = self.status.borrow().clone();
        status
    }
}
