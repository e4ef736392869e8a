//! ListDataSource - Observable List State
//!
//! Owns the retrieval lifecycle of one list or table. Each cycle retrieves raw
//! items, transforms them and publishes the result into `watch` cells that
//! consumers observe as streams.
//!
//! ## Cycle
//!
//! ```text
//! initialize() / refresh()
//!       │  is_loading = true
//!       ▼
//! Retriever::retrieve_items(params)
//!       │
//!       ▼
//! Transformer::transform_items(raw)
//!       │  publish items / total_count, recompute filtered view
//!       ▼
//! is_loading = false   (also on error or drop)
//! ```
//!
//! Overlapping cycles are not sequenced: whichever resolves last publishes last.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::watch;

use super::retriever::{Identity, Retriever, Transformer};
use crate::config::DataSourceConfig;
use crate::domain::{PageRequest, PageableResult, QueryParams, merge_params};
use crate::error::Result;
use crate::filter::TextFilter;
use crate::state::DataSourceState;
use crate::stream::{StateStream, watch_stream};
use crate::table::VecDataProvider;

/// Items as published to consumers
pub type Items<T> = Arc<Vec<T>>;

/// Keeps `is_loading` true while at least one cycle is running
struct LoadingGuard<'a> {
    in_flight: &'a AtomicUsize,
    flag: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize, flag: &'a watch::Sender<bool>) -> Self {
        if in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            tracing::debug!("Retrieval started while another is in flight");
        }
        flag.send_if_modified(|loading| !std::mem::replace(loading, true));
        Self { in_flight, flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.flag
                .send_if_modified(|loading| std::mem::replace(loading, false));
        }
    }
}

/// Reactive container over a retrieved list
pub struct ListDataSource<R, X = Identity>
where
    R: Retriever,
    X: Transformer<R::Item>,
{
    retriever: R,
    transformer: X,
    filter: TextFilter,
    base_params: QueryParams,
    items: watch::Sender<Items<X::Output>>,
    filtered: watch::Sender<Items<X::Output>>,
    total_count: watch::Sender<usize>,
    is_loading: watch::Sender<bool>,
    filter_text: watch::Sender<String>,
    initialized: AtomicBool,
    in_flight: AtomicUsize,
    /// Serializes state writes with the filtered view recompute that follows them
    write_lock: Mutex<()>,
}

impl<R> ListDataSource<R, Identity>
where
    R: Retriever,
    R::Item: Serialize + Clone + Sync,
{
    /// Create a data source that publishes retrieved items unchanged
    pub fn new(retriever: R) -> Self {
        Self::with_transformer(retriever, Identity)
    }
}

impl<R, X> ListDataSource<R, X>
where
    R: Retriever,
    X: Transformer<R::Item>,
    X::Output: Serialize + Clone,
{
    /// Create a data source with a transform hook between retrieval and publication
    pub fn with_transformer(retriever: R, transformer: X) -> Self {
        Self {
            retriever,
            transformer,
            filter: TextFilter::new(),
            base_params: QueryParams::new(),
            items: watch::channel(Arc::new(Vec::new())).0,
            filtered: watch::channel(Arc::new(Vec::new())).0,
            total_count: watch::channel(0).0,
            is_loading: watch::channel(false).0,
            filter_text: watch::channel(String::new()).0,
            initialized: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the local text filter
    pub fn filter(mut self, filter: TextFilter) -> Self {
        self.filter = filter;
        self.recompute_filtered();
        self
    }

    /// Set the parameters sent with every retrieval
    pub fn base_params(mut self, params: QueryParams) -> Self {
        self.base_params = params;
        self
    }

    /// Apply configured defaults (local filtering, base parameters)
    ///
    /// The configured page size becomes a first-page `offset` / `limit`
    /// underneath the configured parameters.
    pub fn configure(self, config: &DataSourceConfig) -> Self {
        let filter = self.filter.clone().enabled(config.local_filter);
        let paging = PageRequest::first(config.page_size).to_params();
        let params = merge_params(&paging, Some(config.params.clone()));
        self.base_params(params).filter(filter)
    }

    // ==================== Lifecycle ====================

    /// Mark the source initialized and run the first retrieval
    ///
    /// Errors from the retriever or transformer are returned after the
    /// loading flag has been reset.
    pub async fn initialize(&self) -> Result<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("Data source initialized twice, treating as refresh");
        }
        self.run_cycle(None).await.map(|_| ())
    }

    /// Retrieve, transform and publish again
    pub async fn refresh(&self) -> Result<PageableResult<X::Output>> {
        self.run_cycle(None).await
    }

    /// Refresh with per-call parameters merged over the base parameters
    pub async fn refresh_with(&self, overrides: QueryParams) -> Result<PageableResult<X::Output>> {
        self.run_cycle(Some(overrides)).await
    }

    /// Clear items and total count without retrieving
    pub fn reset(&self) {
        let _write = self.lock_writes();
        self.items.send_replace(Arc::new(Vec::new()));
        self.total_count.send_replace(0);
        self.recompute_filtered();
    }

    /// Update the filter text and the filtered view; `items` is untouched
    pub fn set_filter_text(&self, text: impl Into<String>) {
        let text = text.into();
        let _write = self.lock_writes();
        let changed = self.filter_text.send_if_modified(|current| {
            if *current == text {
                return false;
            }
            *current = text;
            true
        });
        if changed {
            self.recompute_filtered();
        }
    }

    /// Tear down the source, completing every exposed stream
    pub fn dispose(self) {
        tracing::info!(
            "Disposing data source ({} items, {} subscribers)",
            self.items.borrow().len(),
            self.items.receiver_count()
                + self.filtered.receiver_count()
                + self.total_count.receiver_count()
                + self.is_loading.receiver_count()
                + self.filter_text.receiver_count()
        );
    }

    async fn run_cycle(&self, overrides: Option<QueryParams>) -> Result<PageableResult<X::Output>> {
        let params = merge_params(&self.base_params, overrides);
        let _loading = LoadingGuard::enter(&self.in_flight, &self.is_loading);
        let started = Instant::now();
        tracing::debug!("Retrieving items with {} params", params.len());

        let raw = self
            .retriever
            .retrieve_items(&params)
            .await
            .inspect_err(|e| tracing::warn!("Retrieval failed: {}", e))?;

        let result = self
            .transformer
            .transform_items(raw)
            .await
            .inspect_err(|e| tracing::warn!("Transform failed: {}", e))?;

        self.publish(&result);
        tracing::debug!(
            "Published {} items (total {}) in {:?}",
            result.results.len(),
            result.total_count(),
            started.elapsed()
        );
        Ok(result)
    }

    fn publish(&self, result: &PageableResult<X::Output>) {
        let _write = self.lock_writes();
        self.items.send_replace(Arc::new(result.results.clone()));
        self.total_count.send_replace(result.total_count());
        self.recompute_filtered();
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Must run with the write lock held, or on an exclusively owned source
    fn recompute_filtered(&self) {
        let items = self.items.borrow().clone();
        let text = self.filter_text.borrow().clone();
        self.filtered.send_replace(self.filter.apply(&items, &text));
    }

    // ==================== Snapshots ====================

    /// Current items
    pub fn items(&self) -> Items<X::Output> {
        self.items.borrow().clone()
    }

    /// Current filtered view
    pub fn filtered_items(&self) -> Items<X::Output> {
        self.filtered.borrow().clone()
    }

    /// Current total count
    pub fn total_count(&self) -> usize {
        *self.total_count.borrow()
    }

    /// Whether a retrieval cycle is running
    pub fn is_loading(&self) -> bool {
        *self.is_loading.borrow()
    }

    /// Current filter text
    pub fn filter_text(&self) -> String {
        self.filter_text.borrow().clone()
    }

    /// Whether initialize() has been called
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Base parameters sent with every retrieval
    pub fn params(&self) -> &QueryParams {
        &self.base_params
    }

    /// The local text filter
    pub fn text_filter(&self) -> &TextFilter {
        &self.filter
    }

    /// Snapshot of all observable attributes
    pub fn state(&self) -> DataSourceState<X::Output> {
        DataSourceState {
            items: self.items(),
            total_count: self.total_count(),
            is_loading: self.is_loading(),
            filter_text: self.filter_text(),
            initialized: self.is_initialized(),
        }
    }

    /// Row provider over the current filtered view
    pub fn provider(&self) -> VecDataProvider<X::Output> {
        VecDataProvider::from_arc(self.filtered_items())
    }

    // ==================== Streams ====================

    /// Items, then every published change
    pub fn items_stream(&self) -> StateStream<Items<X::Output>> {
        watch_stream(self.items.subscribe())
    }

    /// Filtered view, then every recomputation
    pub fn filtered_items_stream(&self) -> StateStream<Items<X::Output>> {
        watch_stream(self.filtered.subscribe())
    }

    /// Total count, then every change
    pub fn total_count_stream(&self) -> StateStream<usize> {
        watch_stream(self.total_count.subscribe())
    }

    /// Loading flag, then every transition
    pub fn loading_stream(&self) -> StateStream<bool> {
        watch_stream(self.is_loading.subscribe())
    }

    /// Filter text, then every change
    pub fn filter_text_stream(&self) -> StateStream<String> {
        watch_stream(self.filter_text.subscribe())
    }
}

impl<R, X> std::fmt::Debug for ListDataSource<R, X>
where
    R: Retriever,
    X: Transformer<R::Item>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListDataSource")
            .field("items", &self.items.borrow().len())
            .field("total_count", &*self.total_count.borrow())
            .field("is_loading", &*self.is_loading.borrow())
            .field("filter_text", &*self.filter_text.borrow())
            .field("filter", &self.filter)
            .finish()
    }
}
