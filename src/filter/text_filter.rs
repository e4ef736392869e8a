//! TextFilter - Client-Side Substring Filtering
//!
//! Matches a case-insensitive, trimmed query against the search text of each
//! item. The search text is every field value stringified and joined with a
//! delimiter that never shows up in real data, so a query cannot match across
//! the boundary of two fields.

use ahash::AHashMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::formatters::{FieldFormatter, stringify_value};

/// Separator placed between field values (ASCII unit separator)
pub const FIELD_DELIMITER: char = '\u{1F}';

/// Local text filter configuration
#[derive(Clone)]
pub struct TextFilter {
    enabled: bool,
    formatters: AHashMap<String, FieldFormatter>,
}

impl TextFilter {
    /// Create an enabled filter with default field stringification
    pub fn new() -> Self {
        Self {
            enabled: true,
            formatters: AHashMap::new(),
        }
    }

    /// Create a filter that lets every item through
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Enable or disable local filtering
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override stringification for one field key
    pub fn format_field(mut self, key: impl Into<String>, formatter: FieldFormatter) -> Self {
        self.formatters.insert(key.into(), formatter);
        self
    }

    /// Whether local filtering is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Normalized query, or `None` when the filter would keep every item
    ///
    /// The field delimiter is stripped so a query never spans two fields.
    pub fn query(&self, text: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let query = text.replace(FIELD_DELIMITER, "");
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(query.to_lowercase())
    }

    /// Lowercased search text of one item
    pub fn haystack<T: Serialize>(&self, item: &T) -> serde_json::Result<String> {
        let value = serde_json::to_value(item)?;
        let text = match &value {
            Value::Object(fields) => {
                let mut out = String::new();
                for (i, (key, field)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push(FIELD_DELIMITER);
                    }
                    match self.formatters.get(key) {
                        Some(format) => out.push_str(&format(field)),
                        None => out.push_str(&stringify_value(field)),
                    }
                }
                out
            }
            other => stringify_value(other),
        };
        Ok(text.to_lowercase())
    }

    /// Whether `item` matches an already normalized query
    pub fn matches<T: Serialize>(&self, item: &T, query: &str) -> bool {
        match self.haystack(item) {
            Ok(haystack) => haystack.contains(query),
            Err(e) => {
                tracing::warn!("Excluding item from filtered view, not serializable: {}", e);
                false
            }
        }
    }

    /// Filtered view of `items` for `text`
    ///
    /// Returns the same `Arc` when the filter is inactive.
    pub fn apply<T>(&self, items: &Arc<Vec<T>>, text: &str) -> Arc<Vec<T>>
    where
        T: Serialize + Clone,
    {
        let Some(query) = self.query(text) else {
            return Arc::clone(items);
        };
        let filtered: Vec<T> = items
            .iter()
            .filter(|item| self.matches(*item, &query))
            .cloned()
            .collect();
        Arc::new(filtered)
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFilter")
            .field("enabled", &self.enabled)
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}
