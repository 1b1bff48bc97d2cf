//! Cancellation tokens.
//!
//! ## Contents
//! - [`Subscription`] composable, idempotent teardown handle (the cancellation tree)
//! - [`SubscriptionGuard`] closes a subscription when dropped

mod guard;
mod token;

pub use guard::SubscriptionGuard;
pub use token::Subscription;
