use std::path::PathBuf;
use std::time::Duration;

use crate::slots::view::{DashboardView, SlotCard};

use super::{Board, BoardError, FREE_SLOTS_ID, OCCUPIED_SLOTS_ID, SLOT_GRID_ID, TOTAL_SLOTS_ID};

/// Writes the dashboard as a standalone HTML page.
///
/// The page is written next to the target and renamed into place, so a
/// browser reloading it never sees a half-written file.
pub struct HtmlBoard {
    path: PathBuf,
    reload_after: Option<Duration>,
}

impl HtmlBoard {
    pub fn new(path: impl Into<PathBuf>, reload_after: Option<Duration>) -> Self {
        Self {
            path: path.into(),
            reload_after,
        }
    }
}

impl Board for HtmlBoard {
    fn present(&mut self, view: &DashboardView) -> Result<(), BoardError> {
        let page = render_page(view, self.reload_after);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, page)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_page(view: &DashboardView, reload_after: Option<Duration>) -> String {
    let reload = reload_after
        .map(|d| {
            format!(
                "    <meta http-equiv=\"refresh\" content=\"{}\">\n",
                d.as_secs().max(1)
            )
        })
        .unwrap_or_default();

    let summary = &view.summary;
    let mut page = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"utf-8\">\n{reload}    <title>Parking slots</title>\n</head>\n<body>\n    <header class=\"summary\">\n        <span id=\"{TOTAL_SLOTS_ID}\">{}</span>\n        <span id=\"{FREE_SLOTS_ID}\">{}</span>\n        <span id=\"{OCCUPIED_SLOTS_ID}\">{}</span>\n    </header>\n",
        summary.total_text(),
        summary.free_text(),
        summary.occupied_text(),
    );

    if !view.floor_load.is_empty() {
        page.push_str("    <ul class=\"floor-load\">\n");
        for load in &view.floor_load {
            page.push_str(&format!(
                "        <li>Floor {}: {} occupied</li>\n",
                load.floor, load.occupied
            ));
        }
        page.push_str("    </ul>\n");
    }

    page.push_str(&format!("    <main id=\"{SLOT_GRID_ID}\">\n"));
    for card in &view.cards {
        page.push_str(&render_card(card));
    }
    page.push_str("    </main>\n</body>\n</html>\n");
    page
}

fn render_card(card: &SlotCard) -> String {
    let mut html = format!(
        "        <article class=\"slot-card {}\">\n",
        card.style.css_class()
    );
    if let Some(badge) = card.badge {
        html.push_str(&format!("            <div class=\"badge\">{}</div>\n", badge));
    }
    html.push_str(&format!(
        "            <h3>{}</h3>\n",
        escape_html(&card.heading)
    ));
    let class = if card.badge.is_some() { " class=\"meta\"" } else { "" };
    for line in &card.lines {
        html.push_str(&format!("            <p{}>{}</p>\n", class, escape_html(line)));
    }
    html.push_str("        </article>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotRecord;

    fn slot(id: &str, vehicle: Option<&str>) -> SlotRecord {
        SlotRecord {
            slot_id: id.to_string(),
            floor: 1,
            distance: 5.0,
            occupied: vehicle.is_some(),
            vehicle: vehicle.map(str::to_string),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A1"), "A1");
        assert_eq!(
            escape_html("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn cards_carry_style_and_badge() {
        let view = DashboardView::from_snapshot(&[slot("A1", None), slot("A2", Some("XY-123"))]);
        let page = render_page(&view, None);

        assert!(page.contains("<span id=\"totalSlots\">Total: 2</span>"));
        assert!(page.contains("<span id=\"freeSlots\">Free: 1</span>"));
        assert!(page.contains("<span id=\"occupiedSlots\">Occupied: 1</span>"));
        assert!(page.contains("<article class=\"slot-card free\">"));
        assert!(page.contains("<article class=\"slot-card occupied\">"));
        assert!(page.contains("<p class=\"meta\">Vehicle: XY-123</p>"));
        assert!(page.find("<h3>A1</h3>").unwrap() < page.find("<h3>A2</h3>").unwrap());
        assert!(!page.contains("http-equiv"));
    }

    #[test]
    fn record_text_is_escaped() {
        let view = DashboardView::from_snapshot(&[slot("<script>", Some("a&b"))]);
        let page = render_page(&view, None);
        assert!(page.contains("<h3>&lt;script&gt;</h3>"));
        assert!(page.contains("Vehicle: a&amp;b"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn error_page_has_single_card() {
        let view = DashboardView::error("Parse error: <eof>");
        let page = render_page(&view, Some(Duration::from_millis(5000)));
        assert_eq!(page.matches("<article").count(), 1);
        assert!(page.contains("<article class=\"slot-card occupied\">"));
        assert!(page.contains("<h3>No data</h3>"));
        assert!(page.contains("<p>Parse error: &lt;eof&gt;</p>"));
        assert!(page.contains("Total: 0"));
        assert!(page.contains("<meta http-equiv=\"refresh\" content=\"5\">"));
    }

    #[test]
    fn writes_page_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("dashboard.html");
        let mut board = HtmlBoard::new(&path, None);

        board.present(&DashboardView::from_snapshot(&[slot("A1", None)])).unwrap();
        board.present(&DashboardView::error("gone")).unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("<h3>No data</h3>"));
        assert!(!page.contains("<h3>A1</h3>"));
        assert!(!dir.path().join("out").join("dashboard.html.tmp").exists());
    }
}
