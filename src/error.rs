//! Error types used by the built-in sources.
//!
//! The operators in this crate are generic over the error type `E` and never
//! inspect it: an error is forwarded verbatim to the downstream consumer.
//! [`StreamError`] is the error produced by the adapters that drive a future or
//! a stream on the local executor, and is the recommended default `E`.
//!
//! Like the rest of the crate, it provides `as_label` / `as_message` helpers
//! for logs and metrics.

use thiserror::Error;

/// # Errors produced by push sources.
///
/// These represent failures that a source reports through `on_error`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The producer failed with an application-level error.
    #[error("source failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The producer panicked while computing the next value.
    #[error("source panicked: {info}")]
    Panicked {
        /// Panic payload, if it was a string.
        info: String,
    },

    /// The producer was dropped before it produced a terminal signal.
    #[error("source closed before completion")]
    Closed,
}

impl StreamError {
    /// Shorthand for [`StreamError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        StreamError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use streamvisor::StreamError;
    ///
    /// let err = StreamError::fail("boom");
    /// assert_eq!(err.as_label(), "source_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::Fail { .. } => "source_failed",
            StreamError::Panicked { .. } => "source_panicked",
            StreamError::Closed => "source_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StreamError::Fail { error } => format!("error: {error}"),
            StreamError::Panicked { info } => format!("panic: {info}"),
            StreamError::Closed => "closed before completion".to_string(),
        }
    }

    /// Builds [`StreamError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let info = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown".to_string()
        };
        StreamError::Panicked { info }
    }
}
