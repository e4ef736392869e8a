//! Pagination - Page Requests
//!
//! Turns a 1-based page number into retrieval parameters and back.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::pageable::QueryParams;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A request for one page of items
///
/// Always holds a page of at least 1 and a page size of at least 1, including
/// when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    /// 1-based page number
    page: usize,
    /// Rows per page
    page_size: usize,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: usize,
    page_size: usize,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page, raw.page_size)
    }
}

impl PageRequest {
    /// Create a page request; page 0 is treated as page 1 and a zero size as 1
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// First page with the given size
    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first row on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Row range covered by this page, capped at `total_count`
    pub fn range(&self, total_count: usize) -> std::ops::Range<usize> {
        let start = self.offset().min(total_count);
        let end = start.saturating_add(self.page_size).min(total_count);
        start..end
    }

    /// Number of pages needed for `total_count` rows (never less than 1)
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Move the page back inside the valid range for `total_count` rows
    pub fn clamp(self, total_count: usize) -> Self {
        Self {
            page: self.page.min(self.total_pages(total_count)),
            page_size: self.page_size,
        }
    }

    /// The following page
    pub fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self
        }
    }

    /// The preceding page, staying on page 1
    pub fn previous(self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..self
        }
    }

    /// Retrieval parameters for this page (`offset` / `limit`)
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("offset".into(), json!(self.offset()));
        params.insert("limit".into(), json!(self.page_size));
        params
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_params() {
        let page = PageRequest::new(3, 20);
        assert_eq!(page.offset(), 40);

        let params = page.to_params();
        assert_eq!(params["offset"], json!(40));
        assert_eq!(params["limit"], json!(20));
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::first(10);
        assert_eq!(page.total_pages(0), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(page.total_pages(95), 10);
    }

    #[test]
    fn test_clamp_and_range() {
        let page = PageRequest::new(7, 10).clamp(25);
        assert_eq!(page.page(), 3);
        assert_eq!(page.range(25), 20..25);
        assert_eq!(PageRequest::new(9, 10).range(25), 25..25);
    }

    #[test]
    fn test_zero_inputs_are_normalized() {
        let page = PageRequest::new(0, 0);
        assert_eq!((page.page(), page.page_size()), (1, 1));
        assert_eq!(page.previous().page(), 1);
        assert_eq!(page.next().page(), 2);
    }

    #[test]
    fn test_deserialize_zero_values_normalized() {
        let zero_size: PageRequest =
            serde_json::from_value(json!({ "page": 1, "page_size": 0 })).expect("deserialize");
        assert_eq!(zero_size.page_size(), 1);
        assert_eq!(zero_size.total_pages(5), 5);
        assert_eq!(zero_size.clamp(5).page(), 1);

        let zero_page: PageRequest =
            serde_json::from_value(json!({ "page": 0, "page_size": 10 })).expect("deserialize");
        assert_eq!(zero_page.page(), 1);
        assert_eq!(zero_page.offset(), 0);
        assert_eq!(zero_page.range(25), 0..10);
    }

    #[test]
    fn test_serialize_round_trip() {
        let page = PageRequest::new(4, 20);
        let value = serde_json::to_value(page).expect("serialize");
        assert_eq!(value, json!({ "page": 4, "page_size": 20 }));
        let back: PageRequest = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, page);
    }
}
