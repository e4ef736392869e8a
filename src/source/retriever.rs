//! Retrieval Boundary
//!
//! Traits supplied by each concrete consumer: a [`Retriever`] that fetches raw
//! items and an optional [`Transformer`] that reshapes them before publication.

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;

use crate::domain::{PageableResult, QueryParams};
use crate::error::Result;

/// Fetches one page (or the whole list) of raw items
///
/// Implementations are pure data access: they never see the data source's state.
pub trait Retriever: Send + Sync + 'static {
    type Item: Send + 'static;

    /// Fetch raw items using the merged query parameters
    fn retrieve_items(
        &self,
        params: &QueryParams,
    ) -> BoxFuture<'_, Result<PageableResult<Self::Item>>>;
}

/// Reshapes or enriches retrieved items before they are published
pub trait Transformer<Raw>: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    fn transform_items(
        &self,
        raw: PageableResult<Raw>,
    ) -> BoxFuture<'_, Result<PageableResult<Self::Output>>>;
}

/// Transform that publishes retrieved items unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Send + Sync + 'static> Transformer<T> for Identity {
    type Output = T;

    fn transform_items(&self, raw: PageableResult<T>) -> BoxFuture<'_, Result<PageableResult<T>>> {
        futures::future::ready(Ok(raw)).boxed()
    }
}

/// Retriever backed by an async closure
#[derive(Clone)]
pub struct FnRetriever<F>(F);

/// Wrap an async closure `Fn(QueryParams) -> Future<Output = Result<PageableResult<T>>>`
pub fn retriever_fn<F>(f: F) -> FnRetriever<F> {
    FnRetriever(f)
}

impl<F, Fut, T> Retriever for FnRetriever<F>
where
    F: Fn(QueryParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PageableResult<T>>> + Send + 'static,
    T: Send + 'static,
{
    type Item = T;

    fn retrieve_items(&self, params: &QueryParams) -> BoxFuture<'_, Result<PageableResult<T>>> {
        (self.0)(params.clone()).boxed()
    }
}

impl<F> std::fmt::Debug for FnRetriever<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnRetriever")
    }
}

/// Transformer backed by an async closure
#[derive(Clone)]
pub struct FnTransformer<F>(F);

/// Wrap an async closure `Fn(PageableResult<Raw>) -> Future<Output = Result<PageableResult<Out>>>`
pub fn transformer_fn<F>(f: F) -> FnTransformer<F> {
    FnTransformer(f)
}

impl<F, Fut, Raw, Out> Transformer<Raw> for FnTransformer<F>
where
    F: Fn(PageableResult<Raw>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PageableResult<Out>>> + Send + 'static,
    Out: Send + Sync + 'static,
{
    type Output = Out;

    fn transform_items(
        &self,
        raw: PageableResult<Raw>,
    ) -> BoxFuture<'_, Result<PageableResult<Out>>> {
        (self.0)(raw).boxed()
    }
}

impl<F> std::fmt::Debug for FnTransformer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnTransformer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_retriever_receives_params() {
        let retriever = retriever_fn(|params: QueryParams| async move {
            let limit = params
                .get("limit")
                .and_then(|v| v.as_u64())
                .unwrap_or_default() as u32;
            Ok::<_, Error>(PageableResult::new(
                (1..=limit).collect::<Vec<u32>>(),
                Some(100),
            ))
        });

        let mut params = QueryParams::new();
        params.insert("limit".into(), json!(3));
        let result = retriever.retrieve_items(&params).await.expect("retrieve");
        assert_eq!(result.results, vec![1, 2, 3]);
        assert_eq!(result.count, Some(100));
    }

    #[tokio::test]
    async fn test_identity_passes_through() {
        let raw = PageableResult::new(vec!["a", "b"], Some(2));
        let out = Identity.transform_items(raw.clone()).await.expect("transform");
        assert_eq!(out, raw);
    }

    #[tokio::test]
    async fn test_fn_transformer_error_propagates() {
        let transformer = transformer_fn(|_raw: PageableResult<u32>| async move {
            Err::<PageableResult<String>, _>(Error::transform("lookup table missing"))
        });
        let err = transformer
            .transform_items(PageableResult::from_results(vec![1]))
            .await
            .expect_err("should fail");
        assert!(err.is_transform());
    }
}
