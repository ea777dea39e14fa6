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
use std::io;

use thiserror::Error;

/// Errors produced while decoding a single instruction.
///
/// Every variant carries `offset`, the position of the first byte of the instruction that
/// failed to decode, so a caller can resynchronize.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported opcode {opcode:#04X} at offset {offset:#06X}")]
    UnsupportedOpcode { opcode: u8, offset: usize },
    #[error("truncated instruction at offset {offset:#06X}: needed {needed} byte(s), {available} available")]
    TruncatedStream { offset: usize, needed: usize, available: usize },
    /// Not produced by the table decoder: every ModRM byte value has a defined meaning. Kept
    /// so callers matching on decode failures handle a rejected ModRM byte uniformly.
    #[error("malformed modrm byte {byte:#04X} in instruction at offset {offset:#06X}")]
    MalformedModRm { byte: u8, offset: usize },
}

impl DecodeError {
    /// Offset of the instruction that failed to decode.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::UnsupportedOpcode { offset, .. }
            | DecodeError::TruncatedStream { offset, .. }
            | DecodeError::MalformedModRm { offset, .. } => offset,
        }
    }

    /// A short description without the offset, used for listing comments.
    pub fn reason(&self) -> String {
        match *self {
            DecodeError::UnsupportedOpcode { opcode, .. } => format!("unsupported opcode {:#04X}", opcode),
            DecodeError::TruncatedStream { needed, available, .. } => {
                format!("truncated instruction ({needed} byte(s) needed, {available} available)")
            }
            DecodeError::MalformedModRm { byte, .. } => format!("malformed modrm {:#04X}", byte),
        }
    }
}

#[derive(Error, Debug)]
pub enum ListingError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to write listing: {0}")]
    Io(#[from] io::Error),
}
