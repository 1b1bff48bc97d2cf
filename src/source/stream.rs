//! # Async bridge: `Source` → `futures::Stream`.
//!
//! [`SourceStream`] subscribes a channel-backed consumer and exposes the pushed
//! signals as a pull-based stream of `Result<T, E>`.
//!
//! ## Rules
//! - Values are queued in an **unbounded** channel (no backpressure).
//! - An error is yielded as `Err(e)`, then the stream ends.
//! - Completion ends the stream.
//! - Dropping the stream closes the subscription.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::consumer::{Consumer, Subscriber};
use crate::subscription::{Subscription, SubscriptionGuard};

use super::source::Source;

struct ChannelConsumer<T, E> {
    tx: Option<mpsc::UnboundedSender<Result<T, E>>>,
}

impl<T, E> Consumer<T, E> for ChannelConsumer<T, E> {
    fn on_value(&mut self, value: T) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Ok(value));
        }
    }

    fn on_error(&mut self, error: E) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Err(error));
        }
    }

    fn on_complete(&mut self) {
        self.tx = None;
    }
}

/// Pull-based view of a push source.
pub struct SourceStream<T, E> {
    rx: mpsc::UnboundedReceiver<Result<T, E>>,
    guard: SubscriptionGuard,
}

impl<T: 'static, E: 'static> SourceStream<T, E> {
    pub(crate) fn subscribe<S: Source<T, E> + ?Sized>(source: &S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber = Subscriber::new(ChannelConsumer { tx: Some(tx) });
        let guard = subscriber.subscription().clone().drop_guard();
        source.subscribe_with(subscriber);
        Self { rx, guard }
    }
}

impl<T, E> SourceStream<T, E> {
    /// Detaches the stream from its subscription, returning the subscription.
    ///
    /// The stream keeps yielding until the source terminates; dropping it no
    /// longer cancels the source.
    pub fn into_parts(self) -> (mpsc::UnboundedReceiver<Result<T, E>>, Subscription) {
        (self.rx, self.guard.disarm())
    }
}

impl<T, E> Stream for SourceStream<T, E> {
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use tokio::task::LocalSet;

    use crate::error::StreamError;
    use crate::source::{Subject, SourceExt, from_iter, interval};

    #[tokio::test(flavor = "current_thread")]
    async fn test_collects_values_until_completion() {
        let items: Vec<_> = from_iter(vec![1, 2, 3])
            .into_stream()
            .collect::<Vec<Result<i32, StreamError>>>()
            .await;
        assert_eq!(items, vec![Ok(1), Ok(2), Ok(3)]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_error_ends_stream() {
        let subject = Subject::<i32, StreamError>::new();
        let mut stream = subject.into_stream();
        subject.next(1);
        subject.error(StreamError::fail("x"));

        assert_eq!(stream.next().await, Some(Ok(1)));
        assert_eq!(stream.next().await, Some(Err(StreamError::fail("x"))));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_drop_closes_subscription() {
        LocalSet::new()
            .run_until(async {
                let subject = Subject::<u64, ()>::new();
                let stream = subject.into_stream();
                assert_eq!(subject.observer_count(), 1);
                drop(stream);
                assert_eq!(subject.observer_count(), 0);

                let mut ticks = interval(Duration::from_millis(10)).into_stream();
                let first: Option<Result<u64, ()>> = ticks.next().await;
                assert_eq!(first, Some(Ok(0)));
            })
            .await;
    }
}
