//! Field Formatters
//!
//! Per-field stringification overrides used when building the search text of
//! an item (dates rendered the way the table shows them, enum codes as labels).

use ahash::AHashMap;
use chrono::DateTime;
use serde_json::Value;
use std::sync::Arc;

/// Turns one field value into the text that filtering matches against
pub type FieldFormatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Default stringification of a single field value
///
/// Strings are used as-is, `null` is empty, nested values are compact JSON.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Formatter rendering RFC 3339 timestamps with a chrono format string
///
/// Values that are not parseable timestamps fall back to [`stringify_value`].
pub fn date(format: &str) -> FieldFormatter {
    let format = format.to_string();
    Arc::new(move |value: &Value| match value.as_str().map(DateTime::parse_from_rfc3339) {
        Some(Ok(ts)) => ts.format(&format).to_string(),
        _ => stringify_value(value),
    })
}

/// Formatter mapping raw enum codes to display labels
///
/// Codes missing from the table keep their default text.
pub fn labels<I, K, V>(table: I) -> FieldFormatter
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let table: AHashMap<String, String> = table
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Arc::new(move |value: &Value| {
        let raw = stringify_value(value);
        table.get(&raw).cloned().unwrap_or(raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_value() {
        assert_eq!(stringify_value(&json!(null)), "");
        assert_eq!(stringify_value(&json!("Reno")), "Reno");
        assert_eq!(stringify_value(&json!(42)), "42");
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_date_formatter() {
        let fmt = date("%d.%m.%Y");
        assert_eq!(fmt(&json!("2026-03-14T08:30:00Z")), "14.03.2026");
        assert_eq!(fmt(&json!("yesterday")), "yesterday");
    }

    #[test]
    fn test_labels_formatter() {
        let fmt = labels([("0", "Good"), ("1", "Bad")]);
        assert_eq!(fmt(&json!(0)), "Good");
        assert_eq!(fmt(&json!(1)), "Bad");
        assert_eq!(fmt(&json!(7)), "7");
    }
}
