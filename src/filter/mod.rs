//! Filter - Local Text Filtering
//!
//! Derives the filtered view of a data source from its items and filter text.

pub mod formatters;
mod text_filter;

pub use formatters::{FieldFormatter, stringify_value};
pub use text_filter::*;
