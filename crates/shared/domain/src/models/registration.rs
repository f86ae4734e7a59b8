use crate::de;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One participant sign-up.
///
/// Deserialization normalizes what older clients wrote: `events` may be a single
/// string, `studentId` may be a number, scalar contact fields may be non-strings.
/// Fields this type does not know are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub student_id: String,
    #[serde(default, deserialize_with = "de::lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub events: Vec<String>,
    #[serde(default, deserialize_with = "de::lenient_string", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string", skip_serializing_if = "Option::is_none")]
    pub other_activity: Option<String>,
    /// Free-form sports selection, a scalar or a list depending on the form version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sports: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Registration {
    /// Exact, case-sensitive membership used by the consistency rules.
    #[must_use]
    pub fn attends(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }

    /// Case-insensitive membership used by report filters.
    #[must_use]
    pub fn attends_ignore_case(&self, event: &str) -> bool {
        let needle = event.to_lowercase();
        self.events.iter().any(|e| e.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: Value) -> Registration {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn legacy_scalar_event_becomes_a_list() {
        let reg = parse(json!({ "studentId": "202300000001", "events": "Chess" }));
        assert_eq!(reg.events, vec!["Chess".to_owned()]);
    }

    #[test]
    fn empty_or_missing_events_are_empty() {
        assert!(parse(json!({ "studentId": "1", "events": "" })).events.is_empty());
        assert!(parse(json!({ "studentId": "1", "events": null })).events.is_empty());
        assert!(parse(json!({ "studentId": "1" })).events.is_empty());
    }

    #[test]
    fn non_string_event_entries_are_stringified() {
        let reg = parse(json!({ "events": ["Chess", 42, null] }));
        assert_eq!(reg.events, vec!["Chess".to_owned(), "42".to_owned()]);
    }

    #[test]
    fn numeric_student_id_is_kept_as_text() {
        assert_eq!(parse(json!({ "studentId": 202_300_000_001_u64 })).student_id, "202300000001");
        assert_eq!(parse(json!({ "studentId": null })).student_id, "");
        assert_eq!(parse(json!({})).student_id, "");
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let raw = json!({
            "studentId": "202300000001",
            "name": "Ada",
            "events": ["Chess"],
            "sports": ["Football", "Chess"],
            "tshirtSize": "M"
        });
        let reg = parse(raw.clone());

        assert_eq!(reg.extra.get("tshirtSize"), Some(&json!("M")));
        assert_eq!(serde_json::to_value(&reg).unwrap(), raw);
    }

    #[test]
    fn membership_checks() {
        let reg = parse(json!({ "events": ["Chess", "Sports"] }));
        assert!(reg.attends("Chess"));
        assert!(!reg.attends("chess"));
        assert!(reg.attends_ignore_case("sPoRtS"));
    }
}
