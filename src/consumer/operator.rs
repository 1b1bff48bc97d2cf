//! # OperatorSubscriber: consumer glue for building operators.
//!
//! An operator sits between an upstream source of `T` and a downstream
//! [`Subscriber`] of `U`. [`OperatorSubscriber`] is the upstream-facing consumer:
//! it runs a custom value handler and, unless overridden, forwards error and
//! completion straight to the downstream.
//!
//! ## Rules
//! - Value handler: always custom.
//! - Error: forwarded to downstream unless `with_error` is set.
//! - Completion: forwarded to downstream unless `with_complete` is set.
//! - [`OperatorSubscriber::into_subscriber`] registers the new subscription under a
//!   parent **before** the caller subscribes anywhere, so an upstream that signals
//!   synchronously can already tear it down.
//!
//! ## Example
//! ```rust
//! use streamvisor::{OperatorSubscriber, Subscriber, consumer};
//!
//! let downstream: Subscriber<i32, ()> = Subscriber::new(consumer::from_fn(|_| {}));
//! let parent = downstream.subscription().clone();
//!
//! // A "doubling" operator that swallows upstream completion.
//! let upstream: Subscriber<i32, ()> =
//!     OperatorSubscriber::new(downstream, |v: i32, d: &Subscriber<i32, ()>| d.next(v * 2))
//!         .with_complete(|_| {})
//!         .into_subscriber(&parent);
//!
//! upstream.next(21);
//! upstream.complete();
//! assert!(!parent.is_closed());
//! ```

use crate::subscription::Subscription;

use super::consumer::Consumer;
use super::subscriber::Subscriber;

type ValueFn<T, U, E> = Box<dyn FnMut(T, &Subscriber<U, E>)>;
type ErrorFn<U, E> = Box<dyn FnMut(E, &Subscriber<U, E>)>;
type CompleteFn<U, E> = Box<dyn FnMut(&Subscriber<U, E>)>;

/// Upstream-facing consumer that wraps a downstream [`Subscriber`].
pub struct OperatorSubscriber<T, U, E> {
    downstream: Subscriber<U, E>,
    on_value: ValueFn<T, U, E>,
    on_error: Option<ErrorFn<U, E>>,
    on_complete: Option<CompleteFn<U, E>>,
}

impl<T, U, E> OperatorSubscriber<T, U, E> {
    /// Creates an operator consumer with a custom value handler.
    pub fn new(
        downstream: Subscriber<U, E>,
        on_value: impl FnMut(T, &Subscriber<U, E>) + 'static,
    ) -> Self {
        Self {
            downstream,
            on_value: Box::new(on_value),
            on_error: None,
            on_complete: None,
        }
    }

    /// Overrides the error handler (default: forward to downstream).
    #[must_use]
    pub fn with_error(mut self, on_error: impl FnMut(E, &Subscriber<U, E>) + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Overrides the completion handler (default: forward to downstream).
    #[must_use]
    pub fn with_complete(mut self, on_complete: impl FnMut(&Subscriber<U, E>) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// The wrapped downstream subscriber.
    pub fn downstream(&self) -> &Subscriber<U, E> {
        &self.downstream
    }
}

impl<T: 'static, U: 'static, E: 'static> OperatorSubscriber<T, U, E> {
    /// Wraps `self` in a [`Subscriber`] whose subscription is a child of `parent`.
    ///
    /// If `parent` is already closed, the returned subscriber is closed too.
    pub fn into_subscriber(self, parent: &Subscription) -> Subscriber<T, E> {
        let subscriber = Subscriber::new(self);
        parent.add(subscriber.subscription());
        subscriber
    }
}

impl<T, U, E> Consumer<T, E> for OperatorSubscriber<T, U, E> {
    fn on_value(&mut self, value: T) {
        (self.on_value)(value, &self.downstream);
    }

    fn on_error(&mut self, error: E) {
        match self.on_error.as_mut() {
            Some(f) => f(error, &self.downstream),
            None => self.downstream.error(error),
        }
    }

    fn on_complete(&mut self) {
        match self.on_complete.as_mut() {
            Some(f) => f(&self.downstream),
            None => self.downstream.complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::notification::Notification;
    use crate::consumer::notification::testing::Recorder;

    fn downstream() -> (Recorder<i32, &'static str>, Subscriber<i32, &'static str>) {
        let rec = Recorder::new();
        let sub = Subscriber::new(rec.clone());
        (rec, sub)
    }

    #[test]
    fn test_forwards_error_and_complete_by_default() {
        let (rec, down) = downstream();
        let parent = down.subscription().clone();
        let up = OperatorSubscriber::new(down, |v: i32, d| d.next(v + 1))
            .into_subscriber(&parent);

        up.next(1);
        up.error("boom");
        assert_eq!(
            rec.log(),
            vec![Notification::Value(2), Notification::Error("boom")]
        );
        assert!(parent.is_closed());
    }

    #[test]
    fn test_overrides_replace_forwarding() {
        let (rec, down) = downstream();
        let parent = down.subscription().clone();
        let up = OperatorSubscriber::new(down, |_: i32, _| {})
            .with_error(|_, d| d.next(-1))
            .with_complete(|_| {})
            .into_subscriber(&parent);

        up.error("ignored");
        assert_eq!(rec.log(), vec![Notification::Value(-1)]);
        assert!(!parent.is_closed());
        assert!(up.is_closed());
    }

    #[test]
    fn test_child_of_closed_parent_is_closed() {
        let (rec, down) = downstream();
        let parent = down.subscription().clone();
        parent.close();

        let up = OperatorSubscriber::new(down, |v: i32, d| d.next(v))
            .into_subscriber(&parent);
        assert!(up.is_closed());
        up.next(1);
        assert!(rec.log().is_empty());
    }

    #[test]
    fn test_closing_upstream_detaches_from_parent() {
        let (_rec, down) = downstream();
        let parent = down.subscription().clone();
        let up = OperatorSubscriber::new(down, |_: i32, _| {})
            .with_complete(|_| {})
            .into_subscriber(&parent);
        assert_eq!(parent.child_count(), 1);

        up.complete();
        assert_eq!(parent.child_count(), 0);
    }
}
