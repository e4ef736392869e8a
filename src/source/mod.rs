//! Data Source Layer
//!
//! The list data source and the retrieval boundary it is built on.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   raw    ┌───────────────┐  final   ┌─────────────────────┐
//! │  Retriever   │ ───────▶ │  Transformer  │ ───────▶ │   ListDataSource    │
//! │ (consumer)   │          │ (Identity)    │          │ items / filtered /  │
//! └──────────────┘          └───────────────┘          │ total / loading     │
//!                                                      └─────────────────────┘
//!                                                                │ streams
//!                                                                ▼
//!                                                        table / list widget
//! ```

mod data_source;
mod retriever;

pub use data_source::*;
pub use retriever::*;
