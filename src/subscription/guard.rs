//! # SubscriptionGuard: close-on-drop wrapper
//!
//! Ties the lifetime of a [`Subscription`] to a lexical scope, the way
//! `tokio_util::sync::DropGuard` does for cancellation tokens.
//!
//! ## Example
//! ```rust
//! use streamvisor::Subscription;
//!
//! let sub = Subscription::new();
//! {
//!     let _guard = sub.clone().drop_guard();
//! }
//! assert!(sub.is_closed());
//! ```

use super::token::Subscription;

/// Closes the wrapped [`Subscription`] when dropped.
#[derive(Debug)]
#[must_use = "dropping the guard closes the subscription immediately"]
pub struct SubscriptionGuard {
    inner: Option<Subscription>,
}

impl SubscriptionGuard {
    pub(crate) fn new(inner: Subscription) -> Self {
        Self { inner: Some(inner) }
    }

    /// Returns the subscription without closing it.
    pub fn disarm(mut self) -> Subscription {
        self.inner.take().unwrap_or_default()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(sub) = self.inner.take() {
            sub.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarm_keeps_subscription_open() {
        let sub = Subscription::new();
        let guard = sub.clone().drop_guard();
        let back = guard.disarm();
        assert!(!back.is_closed());
        assert_eq!(back, sub);
    }
}
