//! View-model for the dashboard.
//!
//! Everything a board shows is computed here from the snapshot alone, so the
//! same snapshot always produces the same view regardless of which board
//! draws it.

use std::collections::BTreeMap;

use serde::Serialize;

use super::SlotRecord;

pub const BADGE_OCCUPIED: &str = "Occupied";
pub const BADGE_FREE: &str = "Free";
pub const FREE_PLACEHOLDER: &str = "Ready for allocation";
pub const NO_DATA_HEADING: &str = "No data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Free,
    Occupied,
}

impl CardStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            CardStyle::Free => "free",
            CardStyle::Occupied => "occupied",
        }
    }
}

/// One card in the slot grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotCard {
    pub style: CardStyle,
    pub badge: Option<&'static str>,
    pub heading: String,
    pub lines: Vec<String>,
}

impl SlotCard {
    pub fn from_record(slot: &SlotRecord) -> Self {
        let (style, badge) = if slot.occupied {
            (CardStyle::Occupied, BADGE_OCCUPIED)
        } else {
            (CardStyle::Free, BADGE_FREE)
        };

        let detail = if slot.occupied {
            format!("Vehicle: {}", slot.vehicle().unwrap_or("unknown"))
        } else {
            FREE_PLACEHOLDER.to_string()
        };

        Self {
            style,
            badge: Some(badge),
            heading: slot.slot_id.clone(),
            lines: vec![
                format!("Floor {} • {} m from gate", slot.floor, slot.distance),
                detail,
            ],
        }
    }

    /// The card shown in place of the grid when no snapshot could be loaded.
    /// It borrows the occupied styling.
    pub fn no_data(message: &str) -> Self {
        Self {
            style: CardStyle::Occupied,
            badge: None,
            heading: NO_DATA_HEADING.to_string(),
            lines: vec![message.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub free: usize,
    pub occupied: usize,
}

impl Summary {
    pub fn total_text(&self) -> String {
        format!("Total: {}", self.total)
    }

    pub fn free_text(&self) -> String {
        format!("Free: {}", self.free)
    }

    pub fn occupied_text(&self) -> String {
        format!("Occupied: {}", self.occupied)
    }
}

/// Occupied slots on one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorLoad {
    pub floor: i32,
    pub occupied: usize,
}

/// Everything visible on the dashboard after one poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<SlotCard>,
    pub summary: Summary,
    pub floor_load: Vec<FloorLoad>,
    pub is_error: bool,
}

impl DashboardView {
    pub fn from_snapshot(slots: &[SlotRecord]) -> Self {
        let mut cards = Vec::with_capacity(slots.len());
        let mut free = 0;
        let mut occupied = 0;
        let mut by_floor: BTreeMap<i32, usize> = BTreeMap::new();

        for slot in slots {
            cards.push(SlotCard::from_record(slot));
            if slot.occupied {
                occupied += 1;
                *by_floor.entry(slot.floor).or_default() += 1;
            } else {
                free += 1;
            }
        }

        Self {
            cards,
            summary: Summary {
                total: slots.len(),
                free,
                occupied,
            },
            floor_load: by_floor
                .into_iter()
                .map(|(floor, occupied)| FloorLoad { floor, occupied })
                .collect(),
            is_error: false,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            cards: vec![SlotCard::no_data(message)],
            summary: Summary::default(),
            floor_load: Vec::new(),
            is_error: true,
        }
    }

    /// Visible text in document order: every card, then the three counters.
    pub fn text_content(&self) -> Vec<String> {
        let mut out = Vec::new();
        for card in &self.cards {
            if let Some(badge) = card.badge {
                out.push(badge.to_string());
            }
            out.push(card.heading.clone());
            out.extend(card.lines.iter().cloned());
        }
        out.push(self.summary.total_text());
        out.push(self.summary.free_text());
        out.push(self.summary.occupied_text());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, floor: i32, distance: f64, vehicle: Option<&str>) -> SlotRecord {
        SlotRecord {
            slot_id: id.to_string(),
            floor,
            distance,
            occupied: vehicle.is_some(),
            vehicle: vehicle.map(str::to_string),
        }
    }

    #[test]
    fn two_slot_example() {
        let slots = vec![slot("A1", 1, 5.0, None), slot("A2", 1, 8.0, Some("XY-123"))];
        let view = DashboardView::from_snapshot(&slots);

        assert_eq!(view.summary.total_text(), "Total: 2");
        assert_eq!(view.summary.free_text(), "Free: 1");
        assert_eq!(view.summary.occupied_text(), "Occupied: 1");
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].heading, "A1");
        assert_eq!(view.cards[1].heading, "A2");
        assert!(!view.is_error);
    }

    #[test]
    fn occupied_card_shows_vehicle() {
        let card = SlotCard::from_record(&slot("A2", 1, 8.0, Some("XY-123")));
        assert_eq!(card.style, CardStyle::Occupied);
        assert_eq!(card.badge, Some("Occupied"));
        assert_eq!(card.lines[0], "Floor 1 • 8 m from gate");
        assert_eq!(card.lines[1], "Vehicle: XY-123");
    }

    #[test]
    fn free_card_shows_placeholder_not_vehicle() {
        let mut record = slot("A1", 2, 4.5, None);
        record.vehicle = Some("GHOST-9".to_string());
        let card = SlotCard::from_record(&record);

        assert_eq!(card.style, CardStyle::Free);
        assert_eq!(card.badge, Some("Free"));
        assert_eq!(card.lines[0], "Floor 2 • 4.5 m from gate");
        assert_eq!(card.lines[1], "Ready for allocation");
        assert!(card.lines.iter().all(|l| !l.contains("GHOST-9")));
    }

    #[test]
    fn occupied_without_plate() {
        let mut record = slot("A3", 0, 1.0, Some(""));
        record.occupied = true;
        let card = SlotCard::from_record(&record);
        assert_eq!(card.lines[1], "Vehicle: unknown");
    }

    #[test]
    fn empty_snapshot_is_not_an_error() {
        let view = DashboardView::from_snapshot(&[]);
        assert!(view.cards.is_empty());
        assert_eq!(view.summary, Summary::default());
        assert!(!view.is_error);
    }

    #[test]
    fn counts_always_add_up() {
        let slots: Vec<SlotRecord> = (0..17)
            .map(|i| {
                let plate = format!("P-{i}");
                slot(
                    &format!("S{i}"),
                    i % 3,
                    i as f64,
                    (i % 4 == 0).then_some(plate.as_str()),
                )
            })
            .collect();
        let view = DashboardView::from_snapshot(&slots);
        assert_eq!(view.summary.free + view.summary.occupied, view.summary.total);
        assert_eq!(view.summary.total, 17);
        assert_eq!(view.summary.occupied, 5);
    }

    #[test]
    fn floor_load_lists_occupied_floors_in_order() {
        let slots = vec![
            slot("C1", 3, 1.0, Some("C-1")),
            slot("A1", 1, 1.0, Some("A-1")),
            slot("B1", 2, 1.0, None),
            slot("A2", 1, 2.0, Some("A-2")),
        ];
        let view = DashboardView::from_snapshot(&slots);
        assert_eq!(
            view.floor_load,
            vec![
                FloorLoad { floor: 1, occupied: 2 },
                FloorLoad { floor: 3, occupied: 1 },
            ]
        );
    }

    #[test]
    fn error_view_resets_counters() {
        let view = DashboardView::error("Snapshot not found yet.");
        assert!(view.is_error);
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].heading, "No data");
        assert_eq!(view.cards[0].style, CardStyle::Occupied);
        assert_eq!(view.cards[0].badge, None);
        assert_eq!(view.cards[0].lines, vec!["Snapshot not found yet.".to_string()]);
        assert_eq!(
            view.text_content()[2..],
            ["Total: 0", "Free: 0", "Occupied: 0"]
        );
    }

    #[test]
    fn same_snapshot_same_text() {
        let slots = vec![slot("A1", 1, 5.0, None), slot("A2", 1, 8.0, Some("XY-123"))];
        let first = DashboardView::from_snapshot(&slots).text_content();
        let second = DashboardView::from_snapshot(&slots).text_content();
        assert_eq!(first, second);
    }
}
