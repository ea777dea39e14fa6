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
use crate::{error::DecodeError, i8086::Intel8086, instruction::Instruction};

/// Decode the instruction at `offset` in `buffer`, returning it along with the number of
/// bytes it occupies.
pub fn decode_one(buffer: &[u8], offset: usize) -> Result<(Instruction, usize), DecodeError> {
    let instruction = Intel8086::decode(buffer, offset)?;
    let size = instruction.size();
    Ok((instruction, size))
}

/// A sequential decoder over a borrowed byte buffer.
///
/// A successful [Decoder::decode_next] advances past the decoded instruction. A failed one
/// leaves the offset on the offending instruction; the caller may [Decoder::skip] forward to
/// resynchronize or stop.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    offset: usize,
    halted: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0, halted: false }
    }

    /// Create a decoder starting at `offset`.
    pub fn with_offset(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, offset, halted: false }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Advance the offset by `n` bytes without decoding. Clears a halt caused by an error
    /// in iteration.
    pub fn skip(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.bytes.len());
        self.halted = false;
    }

    /// Decode the next instruction.
    pub fn decode_next(&mut self) -> Result<Instruction, DecodeError> {
        let (instruction, size) = decode_one(self.bytes, self.offset)?;
        self.offset += size;
        Ok(instruction)
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<(usize, Instruction), DecodeError>;

    /// Yields `(offset, instruction)` pairs until the buffer is exhausted. The first error is
    /// yielded once, after which iteration ends.
    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || self.is_exhausted() {
            return None;
        }
        let offset = self.offset;
        match self.decode_next() {
            Ok(instruction) => Some(Ok((offset, instruction))),
            Err(e) => {
                self.halted = true;
                Some(Err(e))
            }
        }
    }
}
