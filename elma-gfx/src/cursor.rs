//! Little-endian views over fixed byte buffers.
//!
//! Reads and writes happen at explicit offsets. Indexing outside the buffer panics, so codecs
//! call [`ByteView::require`] before touching a region that depends on untrusted input.

use crate::error::{Result, TruncatedSnafu};
use byteorder::{ByteOrder, LittleEndian};
use snafu::ensure;

#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fails with [`Error::Truncated`](crate::Error::Truncated) unless the buffer holds at least
    /// `end` bytes.
    #[inline]
    pub fn require(&self, end: usize) -> Result<()> {
        ensure!(
            end <= self.data.len(),
            TruncatedSnafu {
                needed: end,
                available: self.data.len(),
            }
        );
        Ok(())
    }

    #[inline]
    pub fn u8(&self, offset: usize) -> u8 {
        self.data[offset]
    }

    #[inline]
    pub fn u16(&self, offset: usize) -> u16 {
        LittleEndian::read_u16(&self.data[offset..offset + 2])
    }

    #[inline]
    pub fn i16(&self, offset: usize) -> i16 {
        LittleEndian::read_i16(&self.data[offset..offset + 2])
    }

    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> &'a [u8] {
        &self.data[offset..offset + len]
    }

    /// Everything from `offset` to the end of the buffer.
    #[inline]
    pub fn tail(&self, offset: usize) -> &'a [u8] {
        &self.data[offset..]
    }
}

#[derive(Debug)]
pub struct ByteViewMut<'a> {
    data: &'a mut [u8],
}

impl<'a> ByteViewMut<'a> {
    #[inline]
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn set_u8(&mut self, offset: usize, value: u8) {
        self.data[offset] = value;
    }

    #[inline]
    pub fn set_u16(&mut self, offset: usize, value: u16) {
        LittleEndian::write_u16(&mut self.data[offset..offset + 2], value);
    }

    #[inline]
    pub fn set_i16(&mut self, offset: usize, value: i16) {
        LittleEndian::write_i16(&mut self.data[offset..offset + 2], value);
    }

    #[inline]
    pub fn set_slice(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}
