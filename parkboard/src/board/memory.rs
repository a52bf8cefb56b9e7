use crate::slots::view::DashboardView;

use super::{Board, BoardError, FREE_SLOTS_ID, OCCUPIED_SLOTS_ID, TOTAL_SLOTS_ID};

/// Keeps the last presented view in memory. Used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryBoard {
    view: Option<DashboardView>,
    presented: u64,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// Number of `present` calls so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn card_headings(&self) -> Vec<String> {
        self.view
            .iter()
            .flat_map(|v| v.cards.iter().map(|c| c.heading.clone()))
            .collect()
    }

    /// Text of a counter by element id. `None` before the first present or for
    /// any other id.
    pub fn counter(&self, id: &str) -> Option<String> {
        let summary = &self.view.as_ref()?.summary;
        match id {
            TOTAL_SLOTS_ID => Some(summary.total_text()),
            FREE_SLOTS_ID => Some(summary.free_text()),
            OCCUPIED_SLOTS_ID => Some(summary.occupied_text()),
            _ => None,
        }
    }

    pub fn text_content(&self) -> Vec<String> {
        self.view
            .as_ref()
            .map(DashboardView::text_content)
            .unwrap_or_default()
    }
}

impl Board for MemoryBoard {
    fn present(&mut self, view: &DashboardView) -> Result<(), BoardError> {
        self.view = Some(view.clone());
        self.presented += 1;
        Ok(())
    }
}
