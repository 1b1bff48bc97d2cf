//! Local producer tasks.
//!
//! Time- and future-driven sources run their producer as a `spawn_local` task.
//! The task races the producer against a [`CancellationToken`] that the
//! subscription's teardown cancels, so closing the subscription stops the task at
//! its next suspension point.
//!
//! ```text
//! subscribe_with(sub) ──► token = CancellationToken::new()
//!                    ├──► sub.add_teardown(token.cancel)
//!                    └──► spawn_local(select! { token.cancelled(), producer })
//! ```
//!
//! Must be called from inside a [`tokio::task::LocalSet`].

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::consumer::Subscriber;

/// Spawns `producer` on the local set, bound to the lifetime of `subscriber`.
pub(crate) fn spawn_producer<T, E, Fut>(
    subscriber: &Subscriber<T, E>,
    name: &'static str,
    producer: Fut,
) where
    Fut: Future<Output = ()> + 'static,
{
    let token = CancellationToken::new();
    let on_close = token.clone();
    subscriber.add_teardown(move || on_close.cancel());
    if token.is_cancelled() {
        return;
    }

    tokio::task::spawn_local(async move {
        log::trace!("[{name}] producer started");
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::trace!("[{name}] producer cancelled");
            }
            _ = producer => {
                log::trace!("[{name}] producer finished");
            }
        }
    });
}
