use std::io::Write;

use crate::slots::view::{DashboardView, SlotCard};

use super::{Board, BoardError};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const BADGE_WIDTH: usize = 12;

/// Redraws the dashboard as plain text on every cycle.
pub struct TerminalBoard<W: Write + Send + 'static> {
    out: W,
    clear_screen: bool,
}

impl<W: Write + Send + 'static> TerminalBoard<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> Board for TerminalBoard<W> {
    fn present(&mut self, view: &DashboardView) -> Result<(), BoardError> {
        let text = format_view(view);
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn format_view(view: &DashboardView) -> String {
    let summary = &view.summary;
    let mut out = format!(
        "{}   {}   {}\n",
        summary.total_text(),
        summary.free_text(),
        summary.occupied_text()
    );

    if !view.floor_load.is_empty() {
        let floors: Vec<String> = view
            .floor_load
            .iter()
            .map(|f| format!("F{} {}", f.floor, f.occupied))
            .collect();
        out.push_str(&format!("Occupied by floor: {}\n", floors.join(", ")));
    }

    for card in &view.cards {
        out.push('\n');
        push_card(&mut out, card);
    }
    out
}

fn push_card(out: &mut String, card: &SlotCard) {
    let badge = card.badge.map(|b| format!("[{}]", b)).unwrap_or_default();
    out.push_str(&format!("{:<width$}{}\n", badge, card.heading, width = BADGE_WIDTH));
    for line in &card.lines {
        out.push_str(&format!("{:width$}{}\n", "", line, width = BADGE_WIDTH));
    }
}
