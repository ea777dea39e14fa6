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
use std::fmt::{Display, UpperHex};

/// The first byte of an instruction.
///
/// Bit fields used by the supported instruction shapes:
///
/// ```text
///   7 6 5 4 3 2 1 0
///               d w    ALU / MOV r/m forms: d = direction, w = width
///         w r r r      MOV reg, imm (0xB0-0xBF): w = width, rrr = register
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Opcode(u8);

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Opcode(value)
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl UpperHex for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        UpperHex::fmt(&self.0, f)
    }
}

impl Opcode {
    const WIDTH_MASK: u8 = 0b0000_0001;
    const DIRECTION_MASK: u8 = 0b0000_0010;
    const IMM_WIDTH_MASK: u8 = 0b0000_1000;
    const IMM_REG_MASK: u8 = 0b0000_0111;

    #[inline(always)]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// The 'w' bit (bit 0): set for 16-bit operands.
    #[inline(always)]
    pub const fn is_wide(&self) -> bool {
        self.0 & Self::WIDTH_MASK != 0
    }

    /// The 'd' bit (bit 1): set when the REG field names the destination.
    #[inline(always)]
    pub const fn reg_is_destination(&self) -> bool {
        self.0 & Self::DIRECTION_MASK != 0
    }

    /// Width bit of the register-immediate MOV family (bit 3).
    #[inline(always)]
    pub const fn imm_is_wide(&self) -> bool {
        self.0 & Self::IMM_WIDTH_MASK != 0
    }

    /// Register encoded in the low three bits of the register-immediate MOV family.
    #[inline(always)]
    pub const fn imm_register(&self) -> u8 {
        self.0 & Self::IMM_REG_MASK
    }
}
