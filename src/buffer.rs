//! An owned, doubling-growth memory region.
//!
//! [`ResizableBuffer`] is the only place the crate allocates space for encoder output.
//! Growth preserves the bytes already written and never shrinks the allocation.

use crate::errors::{Error, Result};
use tracing::trace;

/// Smallest non-zero capacity.
const MIN_CAPACITY: usize = 16;

#[derive(Debug, Default)]
/// A growable byte region handing out writable windows at arbitrary offsets.
///
/// # Example
///
/// ```
/// use mpack::buffer::ResizableBuffer;
///
/// let mut buf = ResizableBuffer::new();
/// buf.ptr_at(0, 3).unwrap().copy_from_slice(b"abc");
///
/// assert_eq!(buf.capacity(), 16);
/// assert_eq!(&buf.data()[..3], b"abc");
/// ```
pub struct ResizableBuffer {
    // `len() == capacity` at all times, the tail is zero-filled
    data: Vec<u8>,
}

impl ResizableBuffer {
    /// Creates an empty buffer without allocating.
    pub fn new() -> Self { ResizableBuffer { data: Vec::new() } }

    /// Creates a buffer able to hold at least `req` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocation fails.
    pub fn with_capacity(req: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.resize(req)?;
        Ok(buf)
    }

    /// Number of bytes currently allocated.
    pub fn capacity(&self) -> usize { self.data.len() }

    /// The whole allocated region. Empty (but never dangling) while nothing has been
    /// allocated.
    pub fn data(&self) -> &[u8] { &self.data }

    /// The whole allocated region, mutably.
    pub fn data_mut(&mut self) -> &mut [u8] { &mut self.data }

    /// Returns the writable window `[offs, offs + len)`, growing the allocation first
    /// if it does not cover the window yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if growing fails.
    pub fn ptr_at(&mut self, offs: usize, len: usize) -> Result<&mut [u8]> {
        let end = offs.checked_add(len).ok_or(Error::OutOfMemory)?;
        self.resize(end)?;
        Ok(&mut self.data[offs..end])
    }

    /// Makes sure at least `req` bytes are allocated.
    ///
    /// The new capacity is the current one doubled (at least 16), doubled again until it
    /// reaches `req`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocation fails or the capacity would
    /// overflow.
    pub fn resize(&mut self, req: usize) -> Result<()> {
        let cap = self.capacity();
        if req <= cap {
            return Ok(());
        }

        let mut new_size = cap.checked_mul(2).ok_or(Error::OutOfMemory)?;
        if new_size < MIN_CAPACITY {
            new_size = MIN_CAPACITY;
        }
        while req > new_size {
            new_size = new_size.checked_mul(2).ok_or(Error::OutOfMemory)?;
        }

        self.data
            .try_reserve_exact(new_size - cap)
            .map_err(|_| Error::OutOfMemory)?;
        self.data.resize(new_size, 0);

        trace!(from = cap, to = new_size, "grew buffer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let buf = ResizableBuffer::new();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.data().is_empty());
    }

    #[test]
    fn floor_is_sixteen() {
        let mut buf = ResizableBuffer::new();
        buf.resize(1).unwrap();
        assert_eq!(buf.capacity(), 16);

        let buf = ResizableBuffer::with_capacity(0).unwrap();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn doubles_until_large_enough() {
        let mut buf = ResizableBuffer::with_capacity(16).unwrap();
        assert_eq!(buf.capacity(), 16);

        buf.ptr_at(16, 1).unwrap();
        assert_eq!(buf.capacity(), 32);

        buf.resize(100).unwrap();
        assert_eq!(buf.capacity(), 128);

        // exactly full does not grow
        buf.resize(128).unwrap();
        assert_eq!(buf.capacity(), 128);
    }

    #[test]
    fn never_shrinks() {
        let mut buf = ResizableBuffer::with_capacity(64).unwrap();
        buf.resize(3).unwrap();
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn growth_preserves_contents() {
        let mut buf = ResizableBuffer::new();
        buf.ptr_at(0, 4).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        buf.ptr_at(1000, 2).unwrap().copy_from_slice(&[9, 9]);

        assert_eq!(buf.capacity(), 1024);
        assert_eq!(&buf.data()[..4], &[1, 2, 3, 4]);
        assert_eq!(&buf.data()[1000..1002], &[9, 9]);
    }

    #[test]
    fn overflow_is_out_of_memory() {
        let mut buf = ResizableBuffer::new();
        match buf.ptr_at(usize::max_value(), 2) {
            Err(Error::OutOfMemory) => {}
            other => panic!("expected out of memory, got {:?}", other),
        }
        match buf.resize(usize::max_value()) {
            Err(Error::OutOfMemory) => {}
            other => panic!("expected out of memory, got {:?}", other),
        }
        assert_eq!(buf.capacity(), 0);
    }
}
