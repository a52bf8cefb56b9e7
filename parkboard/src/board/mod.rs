//! Presentation surfaces for the dashboard.
//!
//! A board owns four regions, named after the element ids of the web
//! dashboard page: the slot grid and the three counters. Every `present` call replaces
//! all four, so a board never shows a mix of two cycles.

pub mod html;
pub mod memory;
pub mod terminal;

pub use html::HtmlBoard;
pub use memory::MemoryBoard;
pub use terminal::TerminalBoard;

use crate::slots::view::DashboardView;
use crate::slots::SlotRecord;

pub const SLOT_GRID_ID: &str = "slotGrid";
pub const TOTAL_SLOTS_ID: &str = "totalSlots";
pub const FREE_SLOTS_ID: &str = "freeSlots";
pub const OCCUPIED_SLOTS_ID: &str = "occupiedSlots";

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Board write failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub trait Board: Send + 'static {
    /// Replace everything on the board with `view`.
    fn present(&mut self, view: &DashboardView) -> Result<(), BoardError>;
}

impl<B: Board + ?Sized> Board for Box<B> {
    fn present(&mut self, view: &DashboardView) -> Result<(), BoardError> {
        (**self).present(view)
    }
}

/// Draw a snapshot: one card per slot plus the three counters.
pub fn render<B: Board + ?Sized>(
    board: &mut B,
    slots: &[SlotRecord],
) -> Result<DashboardView, BoardError> {
    let view = DashboardView::from_snapshot(slots);
    board.present(&view)?;
    Ok(view)
}

/// Draw the "No data" card and zero every counter.
pub fn render_error<B: Board + ?Sized>(
    board: &mut B,
    message: &str,
) -> Result<DashboardView, BoardError> {
    let view = DashboardView::error(message);
    board.present(&view)?;
    Ok(view)
}
