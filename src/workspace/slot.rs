use serde::{Deserialize, Serialize};

/// Number of slots in every workspace.
pub const SLOT_COUNT: usize = 5;

/// A named saved program. `data` is the serialized block tree; blank means empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default)]
    pub data: String,
}

impl Slot {
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: String::new(),
        }
    }
}

/// The slot list a fresh server hands out.
pub fn default_slots() -> Vec<Slot> {
    (1..=SLOT_COUNT)
        .map(|n| Slot::empty(&format!("Slot {}", n)))
        .collect()
}

/// Pads or truncates a fetched list to exactly `SLOT_COUNT` slots.
pub fn normalize_slots(mut slots: Vec<Slot>) -> Vec<Slot> {
    if slots.len() > SLOT_COUNT {
        tracing::warn!(
            fetched = slots.len(),
            "slot store returned more slots than supported, dropping the extras"
        );
        slots.truncate(SLOT_COUNT);
    }
    for n in slots.len()..SLOT_COUNT {
        slots.push(Slot::empty(&format!("Slot {}", n + 1)));
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_numbered_from_one() {
        let slots = default_slots();
        assert_eq!(slots.len(), SLOT_COUNT);
        assert_eq!(slots[0].name, "Slot 1");
        assert_eq!(slots[4].name, "Slot 5");
        assert!(slots.iter().all(|s| s.data.is_empty()));
    }

    #[test]
    fn short_lists_are_padded() {
        let slots = normalize_slots(vec![Slot::empty("Dance")]);
        assert_eq!(slots.len(), SLOT_COUNT);
        assert_eq!(slots[0].name, "Dance");
        assert_eq!(slots[1].name, "Slot 2");
    }

    #[test]
    fn long_lists_are_truncated() {
        let slots = normalize_slots((0..8).map(|i| Slot::empty(&i.to_string())).collect());
        assert_eq!(slots.len(), SLOT_COUNT);
        assert_eq!(slots[4].name, "4");
    }

    #[test]
    fn missing_data_deserializes_as_blank() {
        let slot: Slot = serde_json::from_str(r#"{"name":"Slot 1"}"#).unwrap();
        assert_eq!(slot, Slot::empty("Slot 1"));
    }
}
