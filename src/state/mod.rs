//! State - Data Source Snapshots

pub mod list_state;

pub use list_state::DataSourceState;
