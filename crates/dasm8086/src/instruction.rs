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
use crate::{
    cpu_common::{register_name, Operand},
    mnemonic::Mnemonic,
    opcode::Opcode,
};

/// A single decoded instruction.
///
/// `operands` is in the order the instruction's shape dictates, which is also the order
/// they are rendered in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub mnemonic: Mnemonic,
    pub is_wide: bool,
    pub instruction_bytes: Vec<u8>,
    pub operands: [Operand; 2],
}

impl Instruction {
    /// Number of bytes the instruction occupies in the stream.
    #[inline]
    pub fn size(&self) -> usize {
        self.instruction_bytes.len()
    }

    /// Name of the register in operand slot `n`, if that slot holds a register.
    pub fn register_name(&self, n: usize) -> Option<&'static str> {
        match self.operands.get(n) {
            Some(Operand::Register(index)) => Some(register_name(*index, self.is_wide)),
            _ => None,
        }
    }

    pub fn has_memory_operand(&self) -> bool {
        self.operands.iter().any(|o| o.is_memory())
    }

    pub fn has_register_operand(&self) -> bool {
        self.operands.iter().any(|o| o.is_register())
    }
}
