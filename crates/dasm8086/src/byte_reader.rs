/*
    dasm8086
    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/
use crate::error::DecodeError;

/// A bounds-checked reader over a caller-owned byte slice.
///
/// Reads are little-endian. A read that would run past the end of the slice fails with
/// [DecodeError::TruncatedStream] before touching any byte.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    start: usize,
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at `offset`. `offset` is also recorded as the start of the
    /// instruction for error reporting.
    pub fn new(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, start: offset, pos: offset }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Offset of the instruction this reader was created for.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of bytes left between the cursor and the end of the slice.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// The bytes consumed since the reader was created.
    pub fn consumed(&self) -> &'a [u8] {
        let end = self.pos.min(self.bytes.len());
        let start = self.start.min(end);
        &self.bytes[start..end]
    }

    fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        let available = self.remaining();
        if available < needed {
            return Err(DecodeError::TruncatedStream {
                offset: self.start,
                needed,
                available,
            });
        }
        Ok(())
    }

    // --- reading (advances the cursor) ---

    /// Reads a single u8.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        let b = self.bytes[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Reads a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.ensure(2)?;
        let lo = self.bytes[self.pos];
        let hi = self.bytes[self.pos + 1];
        self.pos += 2;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    // --- peeking (does NOT advance the cursor) ---

    /// Peeks a single u8.
    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        Ok(self.bytes[self.pos])
    }
}
