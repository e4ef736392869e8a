//! DataSourceState - Point-in-Time Snapshot of a List Data Source

use serde::Serialize;
use std::sync::Arc;

use crate::filter::TextFilter;

/// Snapshot of a data source's observable attributes
#[derive(Debug, Clone)]
pub struct DataSourceState<T> {
    /// Items from the last successful retrieval, in server order
    pub items: Arc<Vec<T>>,
    /// Total count (may exceed items.len() when paginated)
    pub total_count: usize,
    /// Whether a retrieval cycle is in progress
    pub is_loading: bool,
    /// Current filter text
    pub filter_text: String,
    /// Whether initialize() has been called
    pub initialized: bool,
}

impl<T> DataSourceState<T> {
    /// Check if there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filtered view of this snapshot
    pub fn filtered_items(&self, filter: &TextFilter) -> Arc<Vec<T>>
    where
        T: Serialize + Clone,
    {
        filter.apply(&self.items, &self.filter_text)
    }
}

impl<T> Default for DataSourceState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            total_count: 0,
            is_loading: false,
            filter_text: String::new(),
            initialized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let state = DataSourceState::<u32>::default();
        assert!(state.is_empty());
        assert_eq!(state.total_count, 0);
        assert!(!state.is_loading);
        assert!(!state.initialized);
    }

    #[test]
    fn test_filtered_items_uses_filter_text() {
        let state = DataSourceState {
            items: Arc::new(vec!["alpha".to_string(), "beta".to_string()]),
            total_count: 2,
            is_loading: false,
            filter_text: "ET".into(),
            initialized: true,
        };
        let filtered = state.filtered_items(&TextFilter::new());
        assert_eq!(*filtered, vec!["beta".to_string()]);
    }
}
