//! # Windowed-buffer configuration.
//!
//! Provides [`BufferConfig`], the settings applied to every buffer a
//! [`WindowedBuffer`](crate::WindowedBuffer) opens.
//!
//! ## Sentinel values
//! - `buffer_capacity = 0` → buffers start empty and grow on demand

/// Settings for a windowed-buffer operator.
///
/// ## Field semantics
/// - `buffer_capacity`: initial capacity of each buffer (`0` = grow on demand)
/// - `label`: name used in diagnostic log records
#[derive(Clone, Debug)]
pub struct BufferConfig {
    /// Initial capacity reserved for each newly opened buffer.
    ///
    /// Useful when the expected window size is known, to avoid reallocations
    /// while values are fanned out.
    pub buffer_capacity: usize,

    /// Name used in `log` records emitted by the operator.
    pub label: &'static str,
}

impl BufferConfig {
    /// Returns the initial buffer capacity as an `Option`.
    ///
    /// - `None` → grow on demand
    /// - `Some(n)` → reserve `n` slots up front
    #[inline]
    pub fn initial_capacity(&self) -> Option<usize> {
        if self.buffer_capacity == 0 {
            None
        } else {
            Some(self.buffer_capacity)
        }
    }

    /// Allocates an empty buffer honoring [`Self::initial_capacity`].
    pub(crate) fn new_buffer<T>(&self) -> Vec<T> {
        match self.initial_capacity() {
            Some(n) => Vec::with_capacity(n),
            None => Vec::new(),
        }
    }
}

impl Default for BufferConfig {
    /// Default configuration:
    ///
    /// - `buffer_capacity = 0` (grow on demand)
    /// - `label = "windowed_buffer"`
    fn default() -> Self {
        Self {
            buffer_capacity: 0,
            label: "windowed_buffer",
        }
    }
}
