//! # Push sources and the adapters that build them.
//!
//! ## Architecture
//! ```text
//!  iterable ──► from_iter ──┐
//!  future   ──► from_future ┤
//!  stream   ──► from_stream ┼──► Source<T, E> ──► subscribe_with(Subscriber)
//!  clock    ──► timer/interval                        │
//!  by hand  ──► Subject ────┘                        ▼
//!                                             SourceExt::subscribe / into_stream
//! ```
//!
//! Synchronous sources (`from_iter`, `of`, `empty`, `throw_error`, `Subject`) work
//! anywhere. Task-backed sources (`from_future`, `from_stream`, `timer`,
//! `interval`) spawn onto the current [`tokio::task::LocalSet`] and panic if
//! subscribed outside one.
//!
//! ## Contents
//! - [`Source`] / [`SourceExt`] / [`IntoSource`] / [`BoxSource`]
//! - [`Subject`] multicast hand-driven source
//! - [`SourceStream`] async bridge to `futures::Stream`

mod future;
mod iter;
#[allow(clippy::module_inception)]
mod source;
mod stream;
mod subject;
mod task;
mod time;

pub use future::{FromFuture, FromStream, from_future, from_stream};
pub use iter::{Empty, FromIter, Never, ThrowError, empty, from_iter, never, of, throw_error};
pub use source::{BoxSource, IntoSource, Source, SourceExt};
pub use stream::SourceStream;
pub use subject::Subject;
pub use time::{Interval, Timer, interval, timer};
