//! # Consumer trait and closure-backed consumers.
//!
//! [`Consumer`] is the receiving end of a push source: it is handed values one at a
//! time, then exactly one terminal signal.
//!
//! ## Rules
//! - `on_value` is called zero or more times.
//! - Then exactly one of `on_error` / `on_complete`, or nothing if cancelled.
//! - Nothing follows a terminal call.
//!
//! The rules are enforced by [`Subscriber`](crate::Subscriber), which wraps every
//! consumer before a source sees it; implementations do not need to guard
//! themselves.
//!
//! ## Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use streamvisor::{StreamError, SourceExt, consumer, from_iter};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let s = seen.clone();
//! from_iter(vec![1, 2, 3]).subscribe(
//!     consumer::from_fn::<i32, StreamError>(move |v| s.borrow_mut().push(v)),
//! );
//! assert_eq!(*seen.borrow(), vec![1, 2, 3]);
//! ```

/// Receiver of push notifications.
///
/// Callbacks run synchronously on the producer's call stack; keep them short and
/// never block.
pub trait Consumer<T, E> {
    /// Receives the next value.
    fn on_value(&mut self, value: T);

    /// Receives the terminal error.
    fn on_error(&mut self, error: E);

    /// Receives the terminal completion.
    fn on_complete(&mut self);
}

impl<T, E, C: Consumer<T, E> + ?Sized> Consumer<T, E> for Box<C> {
    fn on_value(&mut self, value: T) {
        (**self).on_value(value);
    }

    fn on_error(&mut self, error: E) {
        (**self).on_error(error);
    }

    fn on_complete(&mut self) {
        (**self).on_complete();
    }
}

/// Consumer assembled from closures.
///
/// Missing handlers ignore their signal.
pub struct FnConsumer<T, E> {
    on_value: Box<dyn FnMut(T)>,
    on_error: Box<dyn FnMut(E)>,
    on_complete: Box<dyn FnMut()>,
}

/// Builds a [`FnConsumer`] from a value handler.
pub fn from_fn<T, E>(on_value: impl FnMut(T) + 'static) -> FnConsumer<T, E> {
    FnConsumer {
        on_value: Box::new(on_value),
        on_error: Box::new(|_| {}),
        on_complete: Box::new(|| {}),
    }
}

impl<T, E> FnConsumer<T, E> {
    /// Sets the error handler.
    #[must_use]
    pub fn with_error(mut self, on_error: impl FnMut(E) + 'static) -> Self {
        self.on_error = Box::new(on_error);
        self
    }

    /// Sets the completion handler.
    #[must_use]
    pub fn with_complete(mut self, on_complete: impl FnMut() + 'static) -> Self {
        self.on_complete = Box::new(on_complete);
        self
    }
}

impl<T, E> Consumer<T, E> for FnConsumer<T, E> {
    fn on_value(&mut self, value: T) {
        (self.on_value)(value);
    }

    fn on_error(&mut self, error: E) {
        (self.on_error)(error);
    }

    fn on_complete(&mut self) {
        (self.on_complete)();
    }
}
