//! # Subject: hand-driven multicast source
//!
//! [`Subject`] is both a [`Source`] and a push handle: calling
//! [`next`](Subject::next) fans the value out to every live subscriber.
//!
//! ## What it guarantees
//! - `next` returns after every subscriber has been called (synchronous fan-out).
//! - Subscribers are called in subscription order.
//! - A subscriber added during a fan-out does not see the value being fanned out.
//! - A subscriber removed during a fan-out is skipped if not reached yet.
//! - After `error`/`complete`, late subscribers receive the same terminal
//!   signal immediately.
//!
//! ## Diagram
//! ```text
//!    next(v)
//!       │            (clone per subscriber, snapshot of the current set)
//!       ├──────────► subscriber #1 ─► consumer.on_value()
//!       ├──────────► subscriber #2 ─► consumer.on_value()
//!       └──────────► subscriber #N ─► consumer.on_value()
//! ```
//!
//! ## Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use streamvisor::{SourceExt, Subject, consumer};
//!
//! let subject = Subject::<i32, ()>::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let s = seen.clone();
//! let sub = subject.subscribe(consumer::from_fn(move |v| s.borrow_mut().push(v)));
//!
//! subject.next(1);
//! sub.close();
//! subject.next(2);
//! assert_eq!(*seen.borrow(), vec![1]);
//! assert_eq!(subject.observer_count(), 0);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::consumer::Subscriber;

use super::source::Source;

enum Terminal<E> {
    Error(E),
    Complete,
}

struct Inner<T, E> {
    observers: RefCell<BTreeMap<u64, Subscriber<T, E>>>,
    next_id: Cell<u64>,
    terminal: RefCell<Option<Terminal<E>>>,
}

/// Multicast push source driven by hand.
///
/// Cheap to clone: clones share the same subscriber set.
pub struct Subject<T, E> {
    inner: Rc<Inner<T, E>>,
}

impl<T, E> Clone for Subject<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, E> Default for Subject<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Subject<T, E> {
    /// Creates a subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                observers: RefCell::new(BTreeMap::new()),
                next_id: Cell::new(0),
                terminal: RefCell::new(None),
            }),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// True once `error` or `complete` was called.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.terminal.borrow().is_some()
    }

    /// Completes every subscriber; later subscribers complete immediately.
    pub fn complete(&self) {
        if self.is_terminated() {
            return;
        }
        *self.inner.terminal.borrow_mut() = Some(Terminal::Complete);
        for subscriber in self.drain() {
            subscriber.complete();
        }
    }

    fn snapshot(&self) -> Vec<(u64, Subscriber<T, E>)> {
        self.inner
            .observers
            .borrow()
            .iter()
            .map(|(id, s)| (*id, s.clone()))
            .collect()
    }

    fn drain(&self) -> Vec<Subscriber<T, E>> {
        std::mem::take(&mut *self.inner.observers.borrow_mut())
            .into_values()
            .collect()
    }

    fn is_live(&self, id: u64) -> bool {
        self.inner.observers.borrow().contains_key(&id)
    }
}

impl<T: Clone, E> Subject<T, E> {
    /// Fans `value` out to every live subscriber.
    ///
    /// Ignored after the subject terminated.
    pub fn next(&self, value: T) {
        if self.is_terminated() {
            return;
        }
        for (id, subscriber) in self.snapshot() {
            if self.is_live(id) {
                subscriber.next(value.clone());
            }
        }
    }
}

impl<T, E: Clone> Subject<T, E> {
    /// Fails every subscriber; later subscribers fail immediately.
    pub fn error(&self, error: E) {
        if self.is_terminated() {
            return;
        }
        *self.inner.terminal.borrow_mut() = Some(Terminal::Error(error.clone()));
        for subscriber in self.drain() {
            subscriber.error(error.clone());
        }
    }
}

impl<T: 'static, E: Clone + 'static> Source<T, E> for Subject<T, E> {
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        let terminal = match self.inner.terminal.borrow().as_ref() {
            Some(Terminal::Error(e)) => Some(Some(e.clone())),
            Some(Terminal::Complete) => Some(None),
            None => None,
        };
        match terminal {
            Some(Some(e)) => return subscriber.error(e),
            Some(None) => return subscriber.complete(),
            None => {}
        }
        if subscriber.is_closed() {
            return;
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .insert(id, subscriber.clone());

        let weak: Weak<Inner<T, E>> = Rc::downgrade(&self.inner);
        subscriber.add_teardown(move || {
            if let Some(inner) = weak.upgrade() {
                inner.observers.borrow_mut().remove(&id);
            }
        });
    }
}

impl<T, E> fmt::Debug for Subject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.observer_count())
            .field("terminated", &self.is_terminated())
            .finish()
    }
}
