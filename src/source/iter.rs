//! # Synchronous sources.
//!
//! Sources that emit everything from inside `subscribe_with` and return with the
//! subscription already closed (except [`never`]).
//!
//! | Constructor       | Emits                                  |
//! |-------------------|----------------------------------------|
//! | [`from_iter`]     | every item of a finite iterable, then completes |
//! | [`of`]            | one value, then completes              |
//! | [`empty`]         | completes immediately                  |
//! | [`never`]         | nothing, ever                          |
//! | [`throw_error`]   | the given error immediately            |

use std::marker::PhantomData;

use crate::consumer::Subscriber;

use super::source::Source;

/// Source over a finite, re-iterable collection.
///
/// Every subscription walks a fresh clone of the iterable.
#[derive(Debug, Clone)]
pub struct FromIter<I> {
    iter: I,
}

/// Adapts a finite iterable into a [`Source`].
pub fn from_iter<I>(iter: I) -> FromIter<I>
where
    I: IntoIterator + Clone,
{
    FromIter { iter }
}

/// A source that emits `value` once, then completes.
pub fn of<T: Clone>(value: T) -> FromIter<Option<T>> {
    from_iter(Some(value))
}

impl<I, E> Source<I::Item, E> for FromIter<I>
where
    I: IntoIterator + Clone,
{
    fn subscribe_with(&self, subscriber: Subscriber<I::Item, E>) {
        for item in self.iter.clone() {
            if subscriber.is_closed() {
                return;
            }
            subscriber.next(item);
        }
        subscriber.complete();
    }
}

/// Source that completes without emitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// A source that completes immediately.
pub fn empty() -> Empty {
    Empty
}

impl<T, E> Source<T, E> for Empty {
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        subscriber.complete();
    }
}

/// Source that never signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

/// A source that never emits and never terminates.
pub fn never() -> Never {
    Never
}

impl<T, E> Source<T, E> for Never {
    fn subscribe_with(&self, _subscriber: Subscriber<T, E>) {}
}

/// Source that fails immediately.
#[derive(Debug, Clone)]
pub struct ThrowError<T, E> {
    error: E,
    _values: PhantomData<fn() -> T>,
}

/// A source that signals `error` immediately.
pub fn throw_error<T, E: Clone>(error: E) -> ThrowError<T, E> {
    ThrowError {
        error,
        _values: PhantomData,
    }
}

impl<T, E: Clone> Source<T, E> for ThrowError<T, E> {
    fn subscribe_with(&self, subscriber: Subscriber<T, E>) {
        subscriber.error(self.error.clone());
    }
}
