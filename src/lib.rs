//! # streamvisor
//!
//! **Streamvisor** is a small single-threaded push-stream library for Rust.
//!
//! It provides push sources, consumers with once-terminal guarantees, a
//! cancellation tree, and the **windowed buffer** operator: values of a main
//! source are collected into buffers that an openings source starts and a
//! per-buffer closing source flushes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌─────────────────────────┐
//!     │ main source  │   │   openings   │   │ closing_selector(open)  │
//!     │ Source<T, E> │   │ Source<O, E> │   │ IntoSource<X, E>        │
//!     └──────┬───────┘   └──────┬───────┘   └────────────┬────────────┘
//!            ▼                  ▼                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  WindowedBuffer (operator)                                        │
//! │  - LiveBuffers (ordered by creation)                              │
//! │  - one closing Subscription per live buffer                       │
//! │  - OperatorSubscriber glue for each upstream                      │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │  Subscriber<Vec<T>, E> │
//!                       │ (once-terminal guard)  │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                      Consumer::on_value / on_error / on_complete
//! ```
//!
//! ### Cancellation tree
//! ```text
//! overall Subscription (returned by subscribe)
//!   ├─► openings subscriber
//!   ├─► main subscriber
//!   └─► closing token #n ──► closing subscriber #n
//!
//! close(overall) ──► closes every child ──► upstream teardowns run
//! close(closing #n) ──► detaches from overall
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                            |
//! |-------------------|-----------------------------------------------------------|-----------------------------------------------|
//! | **Operator**      | Buffers opened and closed by other sources.              | [`WindowedBuffer`], [`BufferConfig`]          |
//! | **Sources**       | Push producers and adapters.                              | [`Source`], [`SourceExt`], [`Subject`]        |
//! | **Consumers**     | Receiving side with a guarded subscriber.                 | [`Consumer`], [`Subscriber`]                  |
//! | **Cancellation**  | Idempotent, hierarchical teardown.                        | [`Subscription`], [`SubscriptionGuard`]       |
//! | **Async bridge**  | Pull a push source as a `futures::Stream`.                | [`SourceStream`]                              |
//! | **Errors**        | Built-in error type for adapters.                         | [`StreamError`]                               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use streamvisor::{SourceExt, StreamError, consumer, interval, timer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     tokio::task::LocalSet::new()
//!         .run_until(async {
//!             let ticks = interval(Duration::from_millis(10));
//!             let opens = interval(Duration::from_millis(25));
//!
//!             let sub = ticks
//!                 .windowed_buffer(opens, |_: u64| timer(Duration::from_millis(15)))
//!                 .subscribe(consumer::from_fn::<Vec<u64>, StreamError>(|buf| {
//!                     println!("buffer: {buf:?}");
//!                 }));
//!
//!             tokio::time::sleep(Duration::from_millis(100)).await;
//!             sub.close();
//!         })
//!         .await;
//! }
//! ```
pub mod consumer;
mod error;
mod operators;
mod source;
mod subscription;

// ---- Public re-exports ----

pub use consumer::{Consumer, FnConsumer, Notification, OperatorSubscriber, Subscriber};
pub use error::StreamError;
pub use operators::{BufferConfig, WindowedBuffer, windowed_buffer};
pub use source::{
    BoxSource, Empty, FromFuture, FromIter, FromStream, Interval, IntoSource, Never, Source,
    SourceExt, SourceStream, Subject, ThrowError, Timer, empty, from_future, from_iter,
    from_stream, interval, never, of, throw_error, timer,
};
pub use subscription::{Subscription, SubscriptionGuard};

// Optional: expose a simple built-in logger consumer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use consumer::LogWriter;
