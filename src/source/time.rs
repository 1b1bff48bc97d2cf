//! # Time-driven sources.
//!
//! | Constructor  | Emits                                                    |
//! |--------------|----------------------------------------------------------|
//! | [`timer`]    | `()` once after `delay`, then completes                  |
//! | [`interval`] | `0, 1, 2, ...` every `period` (first tick after `period`) |
//!
//! Both run on the current [`tokio::task::LocalSet`] and use tokio's clock, so
//! tests can drive them with `start_paused = true`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use streamvisor::{SourceExt, StreamError, consumer, interval};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! tokio::task::LocalSet::new()
//!     .run_until(async {
//!         let ticks = interval(Duration::from_millis(5))
//!             .subscribe(consumer::from_fn::<u64, StreamError>(|n| println!("tick {n}")));
//!         tokio::time::sleep(Duration::from_millis(12)).await;
//!         ticks.close();
//!     })
//!     .await;
//! # }
//! ```

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::consumer::Subscriber;

use super::source::Source;
use super::task::spawn_producer;

/// One-shot timer source.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    delay: Duration,
}

/// Emits `()` once after `delay`, then completes.
pub fn timer(delay: Duration) -> Timer {
    Timer { delay }
}

impl<E: 'static> Source<(), E> for Timer {
    fn subscribe_with(&self, subscriber: Subscriber<(), E>) {
        let delay = self.delay;
        let sub = subscriber.clone();
        spawn_producer(&subscriber, "timer", async move {
            tokio::time::sleep(delay).await;
            sub.next(());
            sub.complete();
        });
    }
}

/// Periodic counter source.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
}

/// Emits an increasing counter every `period`; never completes.
///
/// A zero `period` is clamped to 1ms.
pub fn interval(period: Duration) -> Interval {
    Interval {
        period: period.max(Duration::from_millis(1)),
    }
}

impl<E: 'static> Source<u64, E> for Interval {
    fn subscribe_with(&self, subscriber: Subscriber<u64, E>) {
        let period = self.period;
        let sub = subscriber.clone();
        spawn_producer(&subscriber, "interval", async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut n: u64 = 0;
            loop {
                ticker.tick().await;
                sub.next(n);
                if sub.is_closed() {
                    return;
                }
                n = n.wrapping_add(1);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;

    use crate::consumer::Notification;
    use crate::consumer::testing::Recorder;
    use crate::source::SourceExt;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_timer_fires_once_after_delay() {
        LocalSet::new()
            .run_until(async {
                let rec = Recorder::<(), ()>::new();
                timer(Duration::from_secs(1)).subscribe(rec.clone());

                tokio::time::sleep(Duration::from_millis(999)).await;
                assert!(rec.log().is_empty());

                tokio::time::sleep(Duration::from_millis(2)).await;
                assert_eq!(rec.log(), vec![Notification::Value(()), Notification::Complete]);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_interval_counts_until_closed() {
        LocalSet::new()
            .run_until(async {
                let rec = Recorder::<u64, ()>::new();
                let sub = interval(Duration::from_millis(10)).subscribe(rec.clone());

                tokio::time::sleep(Duration::from_millis(35)).await;
                sub.close();
                tokio::time::sleep(Duration::from_millis(50)).await;

                assert_eq!(rec.values(), vec![0, 1, 2]);
                assert_eq!(rec.terminals(), 0);
            })
            .await;
    }

    #[test]
    fn test_zero_period_is_clamped() {
        assert_eq!(interval(Duration::ZERO).period, Duration::from_millis(1));
    }
}
