//! # Windowed buffer: buffers opened by one source, closed by another.
//!
//! [`WindowedBuffer`] collects values of a main source into zero or more
//! independently-lived buffers. Each value of the **openings** source starts a
//! new buffer; the **closing selector** maps that opening value to a source whose
//! first value (or completion) flushes exactly that buffer downstream.
//!
//! ## Architecture
//! ```text
//! openings ──► open(o) ─┬─► LiveBuffers.open(Vec::new())         (creation order)
//!                       ├─► closing token ──► child of overall
//!                       └─► closing_selector(o) ──► first value / complete
//!                                                   └─► flush this buffer
//!
//! main ──► value v ──► push v.clone() into every live buffer
//!      └─► complete ──► flush every live buffer (oldest first) ──► complete
//!
//! error from main / openings / any closing source ──► downstream error (first wins)
//! ```
//!
//! ## Rules
//! - A value reaches exactly the buffers that are live when it arrives.
//! - Each buffer is emitted at most once.
//! - On main completion, remaining buffers are emitted in creation order, then
//!   downstream completes.
//! - Openings completing only stops new buffers from opening.
//! - Closing completion flushes like a closing value.
//! - Cancelling the returned subscription discards open buffers silently and
//!   tears down every closing subscription.
//!
//! ## Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use streamvisor::{SourceExt, StreamError, Subject, consumer};
//!
//! let main = Subject::<char, StreamError>::new();
//! let opens = Subject::<(), StreamError>::new();
//! let close = Subject::<(), StreamError>::new();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let s = seen.clone();
//! let c = close.clone();
//! main.clone()
//!     .windowed_buffer(opens.clone(), move |_: ()| c.clone())
//!     .subscribe(consumer::from_fn(move |buf: Vec<char>| s.borrow_mut().push(buf)));
//!
//! main.next('x');          // no buffer open yet
//! opens.next(());
//! main.next('a');
//! main.next('b');
//! close.next(());          // flushes ['a', 'b']
//! assert_eq!(*seen.borrow(), vec![vec!['a', 'b']]);
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::consumer::{OperatorSubscriber, Subscriber};
use crate::source::{BoxSource, IntoSource, Source};
use crate::subscription::Subscription;

use super::config::BufferConfig;
use super::live::LiveBuffers;

/// Source of buffers delimited by an openings source and per-buffer closing
/// sources.
///
/// Built with [`windowed_buffer`] or
/// [`SourceExt::windowed_buffer`](crate::SourceExt::windowed_buffer).
///
/// # Panics
/// Subscribing panics outside a [`tokio::task::LocalSet`] when any input is a
/// task-backed source ([`timer`](crate::timer), [`interval`](crate::interval),
/// [`from_future`](crate::from_future), [`from_stream`](crate::from_stream)),
/// including a closing source returned by the selector. Synchronous inputs
/// such as [`Subject`](crate::Subject) or [`from_iter`](crate::from_iter) need
/// no runtime.
pub struct WindowedBuffer<T, E, O, X, F> {
    source: BoxSource<T, E>,
    openings: BoxSource<O, E>,
    closing_selector: Rc<F>,
    config: BufferConfig,
    _closing: PhantomData<fn() -> X>,
}

/// Buffers values of `source` between each value of `openings` and the first
/// signal of `closing_selector(opening)`.
pub fn windowed_buffer<T, E, O, X, S, P, F, C>(
    source: S,
    openings: P,
    closing_selector: F,
) -> WindowedBuffer<T, E, O, X, F>
where
    S: Source<T, E> + 'static,
    P: IntoSource<O, E>,
    F: Fn(O) -> C + 'static,
    C: IntoSource<X, E>,
{
    WindowedBuffer::new(source, openings, closing_selector)
}

impl<T, E, O, X, F> WindowedBuffer<T, E, O, X, F> {
    /// Creates the operator with [`BufferConfig::default`].
    pub fn new<S, P, C>(source: S, openings: P, closing_selector: F) -> Self
    where
        S: Source<T, E> + 'static,
        P: IntoSource<O, E>,
        F: Fn(O) -> C + 'static,
        C: IntoSource<X, E>,
    {
        Self {
            source: Rc::new(source),
            openings: openings.into_source(),
            closing_selector: Rc::new(closing_selector),
            config: BufferConfig::default(),
            _closing: PhantomData,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BufferConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }
}

impl<T, E, O, X, F, C> Source<Vec<T>, E> for WindowedBuffer<T, E, O, X, F>
where
    T: Clone + 'static,
    E: 'static,
    O: 'static,
    X: 'static,
    F: Fn(O) -> C + 'static,
    C: IntoSource<X, E>,
{
    fn subscribe_with(&self, downstream: Subscriber<Vec<T>, E>) {
        let overall = downstream.subscription().clone();
        let buffers = Rc::new(RefCell::new(LiveBuffers::new()));
        log::debug!("[{}] subscribed", self.config.label);

        let opening = {
            let buffers = Rc::clone(&buffers);
            let selector = Rc::clone(&self.closing_selector);
            let config = self.config.clone();
            OperatorSubscriber::new(downstream.clone(), move |open: O, downstream| {
                open_buffer(&buffers, &config, &*selector, open, downstream);
            })
            .with_complete(|_| {})
            .into_subscriber(&overall)
        };
        self.openings.subscribe_with(opening);

        let main = {
            let pushed = Rc::clone(&buffers);
            let label = self.config.label;
            OperatorSubscriber::new(downstream, move |value: T, _| {
                pushed.borrow_mut().push_all(&value);
            })
            .with_complete(move |downstream| drain(&buffers, label, downstream))
            .into_subscriber(&overall)
        };
        self.source.subscribe_with(main);
    }
}

/// Opens one buffer and subscribes its closing source.
fn open_buffer<T, E, O, X, F, C>(
    buffers: &Rc<RefCell<LiveBuffers<T>>>,
    config: &BufferConfig,
    selector: &F,
    open: O,
    downstream: &Subscriber<Vec<T>, E>,
) where
    T: 'static,
    E: 'static,
    X: 'static,
    F: Fn(O) -> C,
    C: IntoSource<X, E>,
{
    let closing = Subscription::new();
    let id = buffers
        .borrow_mut()
        .open(config.new_buffer(), closing.clone());
    downstream.add(&closing);

    let label = config.label;
    log::trace!(
        "[{label}] buffer #{id} opened; live={}",
        buffers.borrow().len()
    );

    let flush = {
        let buffers = Rc::clone(buffers);
        let closing = closing.clone();
        move |downstream: &Subscriber<Vec<T>, E>| {
            let removed = buffers.borrow_mut().remove(id);
            if let Some(buffer) = removed {
                log::trace!(
                    "[{label}] buffer #{id} closed with {} values",
                    buffer.values.len()
                );
                downstream.next(buffer.values);
            }
            closing.close();
        }
    };
    let flush_on_complete = flush.clone();

    let closer = OperatorSubscriber::new(downstream.clone(), move |_: X, downstream| flush(downstream))
        .with_complete(move |downstream| flush_on_complete(downstream))
        .into_subscriber(&closing);
    selector(open).into_source().subscribe_with(closer);
}

/// Emits every live buffer oldest-first, then completes downstream.
fn drain<T, E>(
    buffers: &RefCell<LiveBuffers<T>>,
    label: &'static str,
    downstream: &Subscriber<Vec<T>, E>,
) {
    log::debug!(
        "[{label}] source completed; flushing {} buffers",
        buffers.borrow().len()
    );
    loop {
        let oldest = buffers.borrow_mut().pop_oldest();
        let Some(buffer) = oldest else { break };
        downstream.next(buffer.values);
        buffer.closing.close();
    }
    downstream.complete();
}
