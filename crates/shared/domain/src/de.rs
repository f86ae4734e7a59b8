//! Lenient deserializers for records written by older frontends.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Renders a scalar the way a spreadsheet cell or form field would show it.
pub(crate) fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// `"abc"`, `12`, `true` become strings; `null` becomes `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

/// Ids and names arrive as strings or bare numbers; `null` is the empty string.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Accepts a sequence or a single legacy scalar.
///
/// `null` and `""` are the empty sequence, non-string elements are stringified and
/// `null` elements are dropped.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = match Option::<Value>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(scalar) => scalar_to_string(scalar).into_iter().collect(),
    };
    Ok(names)
}

pub(crate) const fn enabled_by_default() -> bool {
    true
}
