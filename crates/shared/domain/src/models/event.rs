use crate::de;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry. `name` is the case-sensitive key registrations refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub name: String,
    #[serde(default = "de::enabled_by_default")]
    pub enabled: bool,
    /// Display metadata (description, dates, images) kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    #[must_use]
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self { name: name.into(), enabled, extra: Map::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_enabled_means_enabled() {
        let event: Event = serde_json::from_value(json!({ "name": "Chess" })).unwrap();
        assert!(event.enabled);
    }

    #[test]
    fn numeric_names_load_as_text() {
        let events: Vec<Event> = serde_json::from_value(json!([
            { "name": 5, "enabled": false },
            { "name": null },
            { "name": "Chess" }
        ]))
        .unwrap();

        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["5", "", "Chess"]);
        assert!(!events[0].enabled);
    }

    #[test]
    fn metadata_survives_a_round_trip() {
        let raw = json!({ "name": "Hackathon", "enabled": false, "venue": "Hall B", "slots": 40 });
        let event: Event = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(event.extra.get("venue"), Some(&json!("Hall B")));
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }
}
