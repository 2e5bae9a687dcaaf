//! The read side of a connection buffer, as seen by stages.
//!
//! Stages never own the buffer. The I/O layer (usually `FramedRead`) appends
//! bytes at the back, stages inspect and consume from the front. The front of
//! the buffer is the read position, so consuming a prefix is the only way the
//! read position moves, and it only moves forward.

use bytes::{Bytes, BytesMut};

/// Cursor operations a stage may perform on the connection buffer.
///
/// All offsets are relative to the current read position.
pub trait Cursor {
    /// Number of bytes appended but not yet consumed.
    fn available(&self) -> usize;

    /// Returns the byte at `offset` without consuming it, or `None` if fewer
    /// than `offset + 1` bytes are available.
    fn peek_byte(&self, offset: usize) -> Option<u8>;

    /// Returns the offset of the first occurrence of `target`.
    fn find_byte(&self, target: u8) -> Option<usize>;

    /// Consumes exactly `n` bytes, advancing the read position by `n`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes are available. Callers gate on
    /// [`Cursor::available`] first.
    fn read_bytes(&mut self, n: usize) -> Bytes;
}

impl Cursor for BytesMut {
    #[inline]
    fn available(&self) -> usize {
        self.len()
    }

    #[inline]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.get(offset).copied()
    }

    #[inline]
    fn find_byte(&self, target: u8) -> Option<usize> {
        self.iter().position(|&b| b == target)
    }

    #[inline]
    fn read_bytes(&mut self, n: usize) -> Bytes {
        self.split_to(n).freeze()
    }
}
