//! Knobs for encoding and decoding [`Value`](crate::Value)s.

/// Settings for [`dump`](crate::encoding::dump) and [`load`](crate::encoding::load).
///
/// # Example
///
/// ```
/// use mpack::Options;
///
/// let opts = Options::default().with_max_depth(8).with_initial_buffer_size(1024);
///
/// assert_eq!(opts.max_depth, Some(8));
/// assert_eq!(opts.initial_buffer_size, 1024);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// How many levels of nesting are allowed. The outermost value is level 0, so with
    /// `Some(n)` a value at level `n` is rejected. `None` means no limit.
    pub max_depth: Option<usize>,
    /// Starting size of the output buffer used by `dump`.
    pub initial_buffer_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: None,
            initial_buffer_size: 32,
        }
    }
}

impl Options {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn with_initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }
}
