//! DFC DataSource Library
//!
//! An observable-backed data source for paginated and filterable list and
//! table views. A [`ListDataSource`] retrieves items through a consumer
//! supplied [`Retriever`], optionally reshapes them with a [`Transformer`],
//! and publishes items, a filtered view, the total count and a loading flag
//! as streams.

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod logging;
pub mod source;
pub mod state;
pub mod stream;
pub mod table;

pub use config::{DataSourceConfig, Settings};
pub use domain::{PageRequest, PageableResult, QueryParams};
pub use error::{Error, Result};
pub use filter::TextFilter;
pub use source::{
    FnRetriever, FnTransformer, Identity, ListDataSource, Retriever, Transformer, retriever_fn,
    transformer_fn,
};
pub use state::DataSourceState;
pub use stream::StateStream;
pub use table::{DataProvider, VecDataProvider};
