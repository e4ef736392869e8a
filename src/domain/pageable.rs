//! PageableResult - One Retrieval Outcome

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Open key-value parameters passed to a retriever (offsets, sort keys, search terms)
pub type QueryParams = BTreeMap<String, Value>;

/// Merge `overrides` over `base`; overriding keys win
pub fn merge_params(base: &QueryParams, overrides: Option<QueryParams>) -> QueryParams {
    let mut merged = base.clone();
    if let Some(overrides) = overrides {
        merged.extend(overrides);
    }
    merged
}

/// The result of one retrieval, paginated or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageableResult<T> {
    /// Items in server order
    pub results: Vec<T>,
    /// Total number of items on the server, when the source reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> PageableResult<T> {
    /// Create a result with an explicit total count
    pub fn new(results: Vec<T>, count: Option<usize>) -> Self {
        Self { results, count }
    }

    /// Create a result that carries no total count
    pub fn from_results(results: Vec<T>) -> Self {
        Self {
            results,
            count: None,
        }
    }

    /// Total item count, falling back to the number of results
    pub fn total_count(&self) -> usize {
        self.count.unwrap_or(self.results.len())
    }

    /// Check if the result holds no items
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Reshape every result, keeping the count
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageableResult<U> {
        PageableResult {
            results: self.results.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}

impl<T> Default for PageableResult<T> {
    fn default() -> Self {
        Self::from_results(Vec::new())
    }
}

impl<T> From<Vec<T>> for PageableResult<T> {
    fn from(results: Vec<T>) -> Self {
        Self::from_results(results)
    }
}
