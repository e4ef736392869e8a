//! Table Support
//!
//! Adapters between data source snapshots and table widgets.

pub mod data_provider;

pub use data_provider::{DataProvider, VecDataProvider};
