//! # LogWriter: simple notification printer
//!
//! A minimal consumer that prints every notification it receives to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [value] source="buffers" value=['a']
//! [value] source="buffers" value=[]
//! [error] source="buffers" err=source failed: boom
//! [complete] source="buffers"
//! ```

use std::fmt::{Debug, Display};

use super::consumer::Consumer;

/// Notification writer consumer.
#[derive(Debug, Clone, Copy)]
pub struct LogWriter {
    source: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] tagged with `source`.
    #[must_use]
    pub fn new(source: &'static str) -> Self {
        Self { source }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("source")
    }
}

impl<T: Debug, E: Display> Consumer<T, E> for LogWriter {
    fn on_value(&mut self, value: T) {
        println!("[value] source={:?} value={:?}", self.source, value);
    }

    fn on_error(&mut self, error: E) {
        println!("[error] source={:?} err={}", self.source, error);
    }

    fn on_complete(&mut self) {
        println!("[complete] source={:?}", self.source);
    }
}
