//! # Subscriber: the guarded handle a source pushes into.
//!
//! A [`Subscriber`] pairs a [`Consumer`] with the [`Subscription`] that represents
//! this particular subscription. Sources only ever talk to subscribers, never to
//! raw consumers.
//!
//! ## What it guarantees
//! - Values are dropped once the subscription is closed or a terminal signal was seen.
//! - At most one terminal signal reaches the consumer (first wins).
//! - Delivering a terminal signal closes the subscription, tearing down everything
//!   registered under it.
//! - Reentrant deliveries (a callback that causes the same subscriber to be
//!   signalled again) are queued and delivered FIFO once the running callback
//!   returns.
//! - A terminal queued that way stops further values at once, but the
//!   subscription closes only after the values queued ahead of it are delivered.
//!
//! ## Diagram
//! ```text
//! source ──► next/error/complete ──► [stopped? closed?] ──► consumer.on_*()
//!                                        │ busy
//!                                        └──► [pending queue] ──► drained FIFO
//! error/complete ──► stopped = true ──► consumer ──► subscription.close()
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::subscription::Subscription;

use super::consumer::Consumer;
use super::notification::Notification;

struct Inner<T, E> {
    consumer: RefCell<Box<dyn Consumer<T, E>>>,
    pending: RefCell<VecDeque<Notification<T, E>>>,
    subscription: Subscription,
    stopped: Cell<bool>,
}

/// Guarded consumer handle with its own [`Subscription`].
///
/// Cheap to clone: clones share the consumer and the subscription.
pub struct Subscriber<T, E> {
    inner: Rc<Inner<T, E>>,
}

impl<T, E> Clone for Subscriber<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static, E: 'static> Subscriber<T, E> {
    /// Wraps `consumer` with a fresh, open subscription.
    #[must_use]
    pub fn new(consumer: impl Consumer<T, E> + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                consumer: RefCell::new(Box::new(consumer)),
                pending: RefCell::new(VecDeque::new()),
                subscription: Subscription::new(),
                stopped: Cell::new(false),
            }),
        }
    }
}

impl<T, E> Subscriber<T, E> {
    /// The subscription owned by this subscriber.
    #[inline]
    pub fn subscription(&self) -> &Subscription {
        &self.inner.subscription
    }

    /// True once a terminal signal was delivered or the subscription was closed.
    ///
    /// Sources should stop producing as soon as this returns `true`.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.inner.stopped.get() || self.inner.subscription.is_closed()
    }

    /// Registers `child` under this subscriber's subscription.
    pub fn add(&self, child: &Subscription) {
        self.inner.subscription.add(child);
    }

    /// Registers a teardown that runs when this subscriber is closed.
    pub fn add_teardown(&self, teardown: impl FnOnce() + 'static) -> Subscription {
        self.inner.subscription.add_teardown(teardown)
    }

    /// Pushes a value unless the subscriber is closed.
    pub fn next(&self, value: T) {
        if self.is_closed() {
            return;
        }
        self.deliver(Notification::Value(value));
    }

    /// Delivers the terminal error (first terminal wins), then closes.
    pub fn error(&self, error: E) {
        if self.is_closed() {
            return;
        }
        self.inner.stopped.set(true);
        self.deliver(Notification::Error(error));
    }

    /// Delivers the terminal completion (first terminal wins), then closes.
    pub fn complete(&self) {
        if self.is_closed() {
            return;
        }
        self.inner.stopped.set(true);
        self.deliver(Notification::Complete);
    }

    /// Closes the subscription without notifying the consumer.
    pub fn unsubscribe(&self) {
        self.inner.subscription.close();
    }

    /// Dispatches `notification`, or queues it when the consumer is already
    /// running. The outermost call drains the queue and, once a terminal was
    /// accepted, closes the subscription after everything queued ahead of it
    /// was delivered.
    fn deliver(&self, notification: Notification<T, E>) {
        let Ok(mut consumer) = self.inner.consumer.try_borrow_mut() else {
            // Called from inside our own consumer; the outer call drains the queue.
            self.inner.pending.borrow_mut().push_back(notification);
            return;
        };

        notification.dispatch(&mut *consumer);
        loop {
            let queued = self.inner.pending.borrow_mut().pop_front();
            match queued {
                // Only an external unsubscribe closes the token mid-drain.
                Some(Notification::Value(_)) if self.inner.subscription.is_closed() => {}
                Some(n) => n.dispatch(&mut *consumer),
                None => break,
            }
        }
        drop(consumer);

        if self.inner.stopped.get() {
            self.inner.subscription.close();
        }
    }
}

impl<T, E> fmt::Debug for Subscriber<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("subscription", &self.inner.subscription)
            .field("stopped", &self.inner.stopped.get())
            .finish()
    }
}
