//! # Example: toggle
//!
//! Buffers keystroke-like values that arrive while a toggle is "on".
//!
//! Demonstrates how to:
//! - Open a buffer on every tick of an [`interval`].
//! - Close each buffer with a one-shot [`timer`] chosen per opening.
//! - Drive the main source by hand through a [`Subject`].
//! - Print every emitted buffer with [`LogWriter`].
//!
//! ## Flow
//! ```text
//! interval(2s) ──► open buffer ──► timer(1s) ──► flush buffer
//! Subject<char> ──► push into every open buffer
//! Subject::complete() ──► flush what is left ──► complete
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example toggle --features logging
//! ```

use std::time::Duration;

use streamvisor::{LogWriter, SourceExt, StreamError, Subject, interval, timer};
use tokio::task::LocalSet;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    LocalSet::new()
        .run_until(async {
            // 1. Hand-driven main source
            let keys = Subject::<char, StreamError>::new();

            // 2. A buffer opens every 2s and closes 1s later
            let sub = keys
                .clone()
                .windowed_buffer(interval(Duration::from_secs(2)), |_: u64| {
                    timer(Duration::from_secs(1))
                })
                .subscribe(LogWriter::new("toggle"));

            // 3. Type a key every 400ms
            for key in "streamvisor".chars() {
                tokio::time::sleep(Duration::from_millis(400)).await;
                println!("[key] {key}");
                keys.next(key);
            }

            // 4. Completing the keys flushes any open buffer
            keys.complete();
            assert!(sub.is_closed());
        })
        .await;
}
