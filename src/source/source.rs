//! # Push source trait and extension methods.
//!
//! A [`Source`] is a producer that pushes into a [`Subscriber`]. Sources are
//! **cold by default**: each `subscribe_with` call starts an independent run.
//!
//! ## Contract for implementors
//! - Register teardown for any producer state via `subscriber.add_teardown(..)`
//!   **before** producing anything.
//! - Check [`Subscriber::is_closed`] between emissions and stop once it is `true`.
//! - Never call the subscriber after it was closed (the subscriber drops such
//!   calls anyway, but producers should not rely on that to stop work).
//!
//! ## Example
//! ```rust
//! use streamvisor::{Source, SourceExt, StreamError, Subscriber, consumer};
//!
//! /// Emits `0..n`, then completes.
//! struct Range(u32);
//!
//! impl<E> Source<u32, E> for Range {
//!     fn subscribe_with(&self, subscriber: Subscriber<u32, E>) {
//!         for i in 0..self.0 {
//!             if subscriber.is_closed() {
//!                 return;
//!             }
//!             subscriber.next(i);
//!         }
//!         subscriber.complete();
//!     }
//! }
//!
//! let sub = Range(3).subscribe(consumer::from_fn::<u32, StreamError>(|v| println!("{v}")));
//! assert!(sub.is_closed());
//! ```

use std::rc::Rc;

use crate::consumer::{Consumer, Subscriber};
use crate::operators::WindowedBuffer;
use crate::subscription::Subscription;

use super::stream::SourceStream;

/// Producer of values of type `T` that may fail with `E`.
pub trait Source<T, E> {
    /// Starts pushing into `subscriber`.
    ///
    /// The subscription observed by the caller is `subscriber.subscription()`.
    fn subscribe_with(&self, subscriber: Subscriber<T, E>);
}

/// Shared, type-erased source.
pub type BoxSource<T, E> = Rc<dyn Source<T, E>>;

impl<T, E, S: Source<T, E> + ?Sized> Source<T, E> for Rc<S> {
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        (**self).subscribe_with(subscriber);
    }
}

impl<T, E, S: Source<T, E> + ?Sized> Source<T, E> for Box<S> {
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        (**self).subscribe_with(subscriber);
    }
}

/// Conversion into a shared [`BoxSource`].
///
/// Anything that is already a [`Source`] converts as-is. Iterables, futures and
/// async streams are adapted with [`from_iter`](crate::from_iter),
/// [`from_future`](crate::from_future) and [`from_stream`](crate::from_stream).
pub trait IntoSource<T, E> {
    /// Performs the conversion.
    fn into_source(self) -> BoxSource<T, E>;
}

impl<T, E, S: Source<T, E> + 'static> IntoSource<T, E> for S {
    fn into_source(self) -> BoxSource<T, E> {
        Rc::new(self)
    }
}

/// Convenience methods available on every [`Source`].
pub trait SourceExt<T, E>: Source<T, E> {
    /// Subscribes a plain consumer and returns the subscription.
    ///
    /// Closing the returned subscription cancels the run; the consumer receives
    /// nothing afterwards.
    fn subscribe(&self, consumer: impl Consumer<T, E> + 'static) -> Subscription
    where
        T: 'static,
        E: 'static,
    {
        let subscriber = Subscriber::new(consumer);
        let subscription = subscriber.subscription().clone();
        self.subscribe_with(subscriber);
        subscription
    }

    /// Collects values into buffers opened by `openings` and closed by the
    /// source returned from `closing_selector`.
    ///
    /// See [`WindowedBuffer`].
    ///
    /// # Panics
    /// Subscribing the result panics outside a [`tokio::task::LocalSet`] if the
    /// main, openings or closing source is task-backed (`timer`, `interval`,
    /// `from_future`, `from_stream`).
    fn windowed_buffer<O, X, P, F, C>(
        self,
        openings: P,
        closing_selector: F,
    ) -> WindowedBuffer<T, E, O, X, F>
    where
        Self: Sized + 'static,
        P: IntoSource<O, E>,
        F: Fn(O) -> C + 'static,
        C: IntoSource<X, E>,
    {
        WindowedBuffer::new(self, openings, closing_selector)
    }

    /// Bridges this source into a `futures::Stream` of `Result<T, E>`.
    ///
    /// Dropping the stream closes the subscription.
    fn into_stream(&self) -> SourceStream<T, E>
    where
        T: 'static,
        E: 'static,
    {
        SourceStream::subscribe(self)
    }

    /// Erases the concrete type.
    fn boxed(self) -> BoxSource<T, E>
    where
        Self: Sized + 'static,
    {
        Rc::new(self)
    }
}

impl<T, E, S: Source<T, E> + ?Sized> SourceExt<T, E> for S {}
