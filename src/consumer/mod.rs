//! # Consumers: the receiving side of push sources.
//!
//! ## Architecture
//! ```text
//! Source ── subscribe_with(Subscriber) ──► Subscriber (guards + subscription)
//!                                              │
//!                                              ▼
//!                                   Consumer::on_value / on_error / on_complete
//!                                              │
//!                              ┌───────────────┼───────────────┐
//!                              ▼               ▼               ▼
//!                          FnConsumer   OperatorSubscriber   LogWriter
//!                                         (wraps downstream)
//! ```
//!
//! ## Contents
//! - [`Consumer`] the three-callback contract
//! - [`Subscriber`] guarded handle sources push into (once-terminal, closable)
//! - [`OperatorSubscriber`] upstream-facing glue for operators
//! - [`FnConsumer`] / [`from_fn`] closure-backed consumers
//! - [`Notification`] a push signal as a value
//! - `LogWriter` (feature `logging`) prints every notification

#[allow(clippy::module_inception)]
mod consumer;
#[cfg(feature = "logging")]
mod log;
mod notification;
mod operator;
mod subscriber;

pub use consumer::{Consumer, FnConsumer, from_fn};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use notification::Notification;
pub use operator::OperatorSubscriber;
pub use subscriber::Subscriber;

#[cfg(test)]
pub(crate) use notification::testing;
