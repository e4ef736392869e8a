//! DataProvider Trait
//!
//! Row access for table and list widgets consuming a data source snapshot.

use std::ops::Range;
use std::sync::Arc;

use crate::domain::PageRequest;

/// Trait for providing rows to a table widget
pub trait DataProvider: Send + Sync + 'static {
    type Row: Clone + Send + Sync + 'static;

    /// Get the total number of rows
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index
    fn row(&self, index: usize) -> Option<Self::Row>;

    /// Get multiple rows in a range
    fn rows(&self, range: Range<usize>) -> Vec<Self::Row> {
        range.filter_map(|i| self.row(i)).collect()
    }

    /// Get the rows of one client-side page
    fn page(&self, request: &PageRequest) -> Vec<Self::Row> {
        self.rows(request.range(self.len()))
    }
}

/// In-memory provider over a shared snapshot
#[derive(Debug)]
pub struct VecDataProvider<R> {
    rows: Arc<Vec<R>>,
}

impl<R: Clone + Send + Sync + 'static> VecDataProvider<R> {
    /// Create a new VecDataProvider
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Create from a shared snapshot without copying
    pub fn from_arc(rows: Arc<Vec<R>>) -> Self {
        Self { rows }
    }

    /// Get all rows
    pub fn all(&self) -> &[R] {
        &self.rows
    }
}

impl<R> Clone for VecDataProvider<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R: Clone + Send + Sync + 'static> DataProvider for VecDataProvider<R> {
    type Row = R;

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<Self::Row> {
        self.rows.get(index).cloned()
    }
}
