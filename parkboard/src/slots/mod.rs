pub mod view;

use serde::{Deserialize, Serialize};

/// One parking space as published in the slot snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub slot_id: String,
    pub floor: i32,
    /// Metres from the entry gate.
    pub distance: f64,
    pub occupied: bool,
    /// Plate number. The producer writes an empty string for free slots.
    #[serde(default)]
    pub vehicle: Option<String>,
}

impl SlotRecord {
    /// Vehicle identifier, only when the slot is occupied and one was given.
    pub fn vehicle(&self) -> Option<&str> {
        if !self.occupied {
            return None;
        }
        self.vehicle.as_deref().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_producer_output() {
        let json = r#"[
  {"slotId":"A1","floor":1,"distance":5,"occupied":false,"vehicle":""},
  {"slotId":"A2","floor":1,"distance":8,"occupied":true,"vehicle":"XY-123"}
]"#;
        let slots: Vec<SlotRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot_id, "A1");
        assert_eq!(slots[0].vehicle(), None);
        assert_eq!(slots[1].vehicle(), Some("XY-123"));
        assert_eq!(slots[1].distance, 8.0);
    }

    #[test]
    fn vehicle_is_optional_and_extra_fields_ignored() {
        let json = r#"{"slotId":"B4","floor":2,"distance":12.5,"occupied":false,"zone":"north"}"#;
        let slot: SlotRecord = serde_json::from_str(json).unwrap();
        assert_eq!(slot.vehicle, None);
        assert_eq!(slot.distance, 12.5);
    }

    #[test]
    fn free_slot_never_reports_a_vehicle() {
        let slot = SlotRecord {
            slot_id: "C1".into(),
            floor: 0,
            distance: 3.0,
            occupied: false,
            vehicle: Some("STALE-1".into()),
        };
        assert_eq!(slot.vehicle(), None);
    }

    #[test]
    fn rejects_missing_occupancy() {
        let json = r#"{"slotId":"B4","floor":2,"distance":12}"#;
        assert!(serde_json::from_str::<SlotRecord>(json).is_err());
    }
}
