//! Field deserializers for remote documents whose value types drift.
//!
//! Capture sends `null` for unset fields and sometimes a number where a
//! string is documented (or the reverse). These helpers coerce such values
//! to the field's default instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text, with scalars stringified and `null` read as empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`text`], keeping `null` as `None`.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// A non-negative count. Numeric strings are parsed; anything else is 0.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.as_str(), "true" | "1"),
        _ => false,
    })
}

/// A list of texts. `null` entries are dropped; a non-array is empty.
pub(crate) fn texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_text).collect(),
        _ => Vec::new(),
    })
}

/// A list of records. Entries that do not decode are dropped.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Any value that does not fit `T` (including `null`) becomes `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "text")]
        label: String,
        #[serde(deserialize_with = "count")]
        total: u64,
        #[serde(deserialize_with = "flag")]
        enabled: bool,
        #[serde(deserialize_with = "texts")]
        tags: Vec<String>,
    }

    #[test]
    fn nulls_fall_back_to_defaults() {
        let sample: Sample = serde_json::from_value(json!({
            "label": null, "total": null, "enabled": null, "tags": null
        }))
        .unwrap();
        assert_eq!(sample.label, "");
        assert_eq!(sample.total, 0);
        assert!(!sample.enabled);
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn scalars_are_coerced() {
        let sample: Sample = serde_json::from_value(json!({
            "label": 42, "total": "3600", "enabled": "true", "tags": ["a", null, 7]
        }))
        .unwrap();
        assert_eq!(sample.label, "42");
        assert_eq!(sample.total, 3600);
        assert!(sample.enabled);
        assert_eq!(sample.tags, vec!["a".to_string(), "7".to_string()]);
    }

    #[test]
    fn negative_or_garbage_counts_are_zero() {
        let sample: Sample = serde_json::from_value(json!({"total": -5})).unwrap();
        assert_eq!(sample.total, 0);
        let sample: Sample = serde_json::from_value(json!({"total": "soon"})).unwrap();
        assert_eq!(sample.total, 0);
    }
}
