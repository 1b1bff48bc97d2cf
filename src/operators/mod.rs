//! # Operators over push sources.
//!
//! - [`WindowedBuffer`] collects values into buffers that an openings source
//!   starts and a per-buffer closing source flushes.
//! - [`BufferConfig`] tunes buffer allocation and the diagnostic label.
//!
//! Buffer bookkeeping ([`live`]) is internal: live buffers are keyed by a
//! monotonically increasing id so removal by closing signal and oldest-first
//! draining on completion both follow creation order.

mod config;
mod live;
mod windowed_buffer;

pub use config::BufferConfig;
pub use windowed_buffer::{WindowedBuffer, windowed_buffer};
