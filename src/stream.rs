//! Watch Streams
//!
//! Read-only [`Stream`] views over the data source's `watch` cells. A stream
//! yields the current value first and then every change; it ends once the
//! owning data source is disposed and all pending changes are drained.

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

/// Stream of values published through a `watch` channel
pub type StateStream<T> = BoxStream<'static, T>;

/// Turn a watch receiver into a stream of snapshots
pub fn watch_stream<T>(rx: watch::Receiver<T>) -> StateStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_yields_current_then_changes() {
        let (tx, rx) = watch::channel(1);
        let mut stream = watch_stream(rx);

        assert_eq!(stream.next().await, Some(1));
        tx.send_replace(2);
        assert_eq!(stream.next().await, Some(2));
    }

    #[tokio::test]
    async fn test_ends_when_sender_dropped() {
        let (tx, rx) = watch::channel("idle");
        let mut stream = watch_stream(rx);

        assert_eq!(stream.next().await, Some("idle"));
        drop(tx);
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_intermediate_values_coalesce() {
        let (tx, rx) = watch::channel(0);
        let mut stream = watch_stream(rx);
        assert_eq!(stream.next().await, Some(0));

        tx.send_replace(1);
        tx.send_replace(2);
        tx.send_replace(3);
        assert_eq!(stream.next().await, Some(3));
    }
}
