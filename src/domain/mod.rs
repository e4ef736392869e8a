//! Domain - Pure Data Structures
//!
//! Retrieval results, query parameters and page requests.

pub mod pageable;
pub mod pagination;

pub use pageable::{PageableResult, QueryParams, merge_params};
pub use pagination::{DEFAULT_PAGE_SIZE, PageRequest};
