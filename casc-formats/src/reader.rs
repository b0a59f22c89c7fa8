//! Positioned reads over an immutable in-memory byte buffer.

use thiserror::Error;

/// Errors a [`BinaryReader`] can raise.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("read past end of stream: position {position}, requested {requested} bytes, buffer is {len} bytes")]
    EndOfStream {
        position: usize,
        requested: usize,
        len: usize,
    },

    #[error("relative seek underflowed: position {position}, delta {delta}")]
    SeekUnderflow { position: usize, delta: i64 },
}

/// Result alias for this module's fallible operations.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// A cursor over a borrowed byte slice.
///
/// All reads are bounds-checked; a read that would run past the end of the
/// buffer fails with [`ReaderError::EndOfStream`] rather than returning a
/// short read.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    /// Wrap a byte slice, cursor starting at 0.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Absolute length of the underlying buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn tell(&self) -> usize {
        self.pos
    }

    /// Whether at least `n` bytes remain unread.
    #[must_use]
    pub fn has_available(&self, n: usize) -> bool {
        self.data.len().saturating_sub(self.pos) >= n
    }

    /// Move the cursor to an absolute position. Does not validate that the
    /// position is in bounds; the next read will fail if it is not.
    pub fn seek(&mut self, abs: usize) {
        self.pos = abs;
    }

    /// Move the cursor by a signed offset. Fails if the result would be
    /// negative, reproducing the source's underflow check on an unsigned
    /// position.
    pub fn seek_rel(&mut self, delta: i64) -> Result<()> {
        let next = i64::try_from(self.pos).unwrap_or(i64::MAX) + delta;
        if next < 0 {
            return Err(ReaderError::SeekUnderflow {
                position: self.pos,
                delta,
            });
        }
        self.pos = next as usize;
        Ok(())
    }

    /// Borrow the next `n` bytes without copying, advancing the cursor.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if !self.has_available(n) {
            return Err(ReaderError::EndOfStream {
                position: self.pos,
                requested: n,
                len: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Copy the next `n` bytes into an owned buffer, advancing the cursor.
    pub fn read_bytes_owned(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.read_bytes(n)?.to_vec())
    }

    /// Read a fixed-size array, little-endian scalars use this under the
    /// hood via [`Self::read_u32_le`] etc.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_be(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian 24-bit quantity, widened into a `u32`.
    pub fn read_u24_be(&mut self) -> Result<u32> {
        let bytes = self.read_array::<3>()?;
        Ok(u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]))
    }
}
