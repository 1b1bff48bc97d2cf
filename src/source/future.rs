//! # Future- and stream-backed sources.
//!
//! Adapters that turn async producers into push sources. Both run on the
//! current [`tokio::task::LocalSet`] and stop as soon as the subscription closes.
//!
//! ## Rules
//! - [`from_future`] behaves like a promise: the future runs at most once and
//!   every subscriber receives the same outcome (`T: Clone`, `E: Clone`).
//! - [`from_stream`] is single-pass: the first subscriber drives the stream; any
//!   later subscriber receives [`StreamError::Closed`].
//! - A panic inside the producer is caught and delivered as
//!   [`StreamError::Panicked`] (the error type must implement `From<StreamError>`).
//!
//! ## Example
//! ```rust
//! use streamvisor::{SourceExt, StreamError, consumer, from_future};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let local = tokio::task::LocalSet::new();
//! local
//!     .run_until(async {
//!         let answer = from_future(async { Ok::<_, StreamError>(42) });
//!         answer.subscribe(consumer::from_fn(|v: i32| assert_eq!(v, 42)));
//!         tokio::time::sleep(std::time::Duration::from_millis(1)).await;
//!     })
//!     .await;
//! # }
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{LocalBoxFuture, Shared};
use futures::{FutureExt, Stream, StreamExt};

use crate::consumer::Subscriber;
use crate::error::StreamError;

use super::source::Source;
use super::task::spawn_producer;

/// Promise-like source over a single future.
pub struct FromFuture<T, E> {
    shared: Shared<LocalBoxFuture<'static, Result<T, E>>>,
}

/// Adapts a future into a [`Source`] that emits its `Ok` value then completes,
/// or fails with its `Err`.
pub fn from_future<T, E, Fut>(fut: Fut) -> FromFuture<T, E>
where
    Fut: Future<Output = Result<T, E>> + 'static,
    T: Clone + 'static,
    E: Clone + From<StreamError> + 'static,
{
    let shared = AssertUnwindSafe(fut)
        .catch_unwind()
        .map(|outcome| match outcome {
            Ok(result) => result,
            Err(panic) => Err(E::from(StreamError::from_panic(panic))),
        })
        .boxed_local()
        .shared();
    FromFuture { shared }
}

impl<T, E> Source<T, E> for FromFuture<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        let fut = self.shared.clone();
        let sub = subscriber.clone();
        spawn_producer(&subscriber, "from_future", async move {
            match fut.await {
                Ok(value) => {
                    sub.next(value);
                    sub.complete();
                }
                Err(error) => sub.error(error),
            }
        });
    }
}

/// Single-pass source over an async stream of results.
pub struct FromStream<S> {
    stream: RefCell<Option<S>>,
}

/// Adapts a `futures::Stream` of `Result<T, E>` into a [`Source`].
///
/// `Ok` items are emitted, the first `Err` fails the subscription, the end of
/// the stream completes it.
pub fn from_stream<S>(stream: S) -> FromStream<S> {
    FromStream {
        stream: RefCell::new(Some(stream)),
    }
}

impl<S, T, E> Source<T, E> for FromStream<S>
where
    S: Stream<Item = Result<T, E>> + 'static,
    T: 'static,
    E: From<StreamError> + 'static,
{
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        let Some(stream) = self.stream.borrow_mut().take() else {
            subscriber.error(E::from(StreamError::Closed));
            return;
        };

        let sub = subscriber.clone();
        spawn_producer(&subscriber, "from_stream", async move {
            let mut stream = std::pin::pin!(stream);
            loop {
                match AssertUnwindSafe(stream.next()).catch_unwind().await {
                    Ok(Some(Ok(value))) => sub.next(value),
                    Ok(Some(Err(error))) => return sub.error(error),
                    Ok(None) => return sub.complete(),
                    Err(panic) => return sub.error(E::from(StreamError::from_panic(panic))),
                }
                if sub.is_closed() {
                    return;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::task::LocalSet;

    use crate::consumer::Notification;
    use crate::consumer::testing::Recorder;
    use crate::source::SourceExt;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_from_future_multicasts_single_outcome() {
        LocalSet::new()
            .run_until(async {
                let runs = std::rc::Rc::new(std::cell::Cell::new(0));
                let r = runs.clone();
                let src = from_future(async move {
                    r.set(r.get() + 1);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok::<_, StreamError>("done")
                });

                let a = Recorder::new();
                let b = Recorder::new();
                src.subscribe(a.clone());
                src.subscribe(b.clone());
                tokio::time::sleep(Duration::from_millis(20)).await;

                let expected = vec![Notification::Value("done"), Notification::Complete];
                assert_eq!(a.log(), expected);
                assert_eq!(b.log(), expected);
                assert_eq!(runs.get(), 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_from_future_error_and_panic() {
        LocalSet::new()
            .run_until(async {
                let failing = from_future(async { Err::<u8, _>(StreamError::fail("nope")) });
                let a = Recorder::new();
                failing.subscribe(a.clone());

                let panicking = from_future(async {
                    if true {
                        panic!("kaboom");
                    }
                    Ok::<u8, StreamError>(0)
                });
                let b = Recorder::new();
                panicking.subscribe(b.clone());

                tokio::time::sleep(Duration::from_millis(1)).await;
                assert_eq!(a.log(), vec![Notification::Error(StreamError::fail("nope"))]);
                assert_eq!(
                    b.log(),
                    vec![Notification::Error(StreamError::Panicked {
                        info: "kaboom".into()
                    })]
                );
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_from_future_cancelled_before_resolution() {
        LocalSet::new()
            .run_until(async {
                let src = from_future(async {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok::<_, StreamError>(1)
                });
                let rec = Recorder::new();
                let sub = src.subscribe(rec.clone());
                sub.close();

                tokio::time::sleep(Duration::from_millis(20)).await;
                assert!(rec.log().is_empty());
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_from_stream_is_single_pass() {
        LocalSet::new()
            .run_until(async {
                let items = futures::stream::iter(vec![
                    Ok(1),
                    Ok(2),
                    Err(StreamError::fail("x")),
                    Ok(3),
                ]);
                let src = from_stream(items);

                let first = Recorder::new();
                let second = Recorder::new();
                src.subscribe(first.clone());
                src.subscribe(second.clone());
                tokio::time::sleep(Duration::from_millis(1)).await;

                assert_eq!(
                    first.log(),
                    vec![
                        Notification::Value(1),
                        Notification::Value(2),
                        Notification::Error(StreamError::fail("x"))
                    ]
                );
                assert_eq!(second.log(), vec![Notification::Error(StreamError::Closed)]);
            })
            .await;
    }
}
