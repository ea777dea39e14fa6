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
/*
    i8086::decode.rs

    Opcode table and instruction decoding routines.

    Each populated opcode maps to a mnemonic and one of a small, closed set of
    instruction shapes. The shape alone decides how many bytes follow the opcode
    and in which order the operands appear.
*/

use tracing::trace;

use crate::{
    byte_reader::ByteReader,
    cpu_common::Operand,
    error::DecodeError,
    i8086::Intel8086,
    instruction::Instruction,
    mnemonic::Mnemonic,
    modrm::ModRmByte,
    opcode::Opcode,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// r/m, reg: ModRM follows; R/M operand first. Width = opcode bit 0.
    RmR,
    /// reg, r/m: ModRM follows; REG operand first. Width = opcode bit 0.
    RRm,
    /// reg, imm: register in opcode bits 2-0, width = opcode bit 3.
    MovRegImm,
    /// AL/AX, imm. Width = opcode bit 0.
    AccImm,
    /// AL/AX, [addr16]. Width = opcode bit 0.
    MovAccMem,
    /// [addr16], AL/AX. Width = opcode bit 0.
    MovMemAcc,
}

impl Shape {
    /// Operand width selected by `opcode` for this shape.
    #[inline]
    pub fn is_wide(&self, opcode: Opcode) -> bool {
        match self {
            Shape::MovRegImm => opcode.imm_is_wide(),
            _ => opcode.is_wide(),
        }
    }

    /// True if a ModRM byte follows the opcode.
    #[inline]
    pub fn has_modrm(&self) -> bool {
        matches!(self, Shape::RmR | Shape::RRm)
    }

    /// Number of immediate or direct address bytes following the opcode (and ModRM, if any).
    pub fn operand_bytes(&self, opcode: Opcode) -> usize {
        match self {
            Shape::RmR | Shape::RRm => 0,
            Shape::MovRegImm | Shape::AccImm => {
                if self.is_wide(opcode) {
                    2
                }
                else {
                    1
                }
            }
            Shape::MovAccMem | Shape::MovMemAcc => 2,
        }
    }

    /// Decode the operands that follow `opcode`. `bytes` must be positioned just past the
    /// opcode byte.
    pub fn decode(&self, opcode: Opcode, bytes: &mut ByteReader<'_>) -> Result<[Operand; 2], DecodeError> {
        let is_wide = self.is_wide(opcode);
        let operands = match self {
            Shape::RmR => {
                let modrm = ModRmByte::read(bytes)?;
                [modrm.resolve(bytes)?, Operand::Register(modrm.reg_value())]
            }
            Shape::RRm => {
                let modrm = ModRmByte::read(bytes)?;
                [Operand::Register(modrm.reg_value()), modrm.resolve(bytes)?]
            }
            Shape::MovRegImm => [
                Operand::Register(opcode.imm_register()),
                read_immediate(bytes, is_wide)?,
            ],
            Shape::AccImm => [Operand::ACCUMULATOR, read_immediate(bytes, is_wide)?],
            Shape::MovAccMem => [Operand::ACCUMULATOR, Operand::DirectAddress(bytes.read_u16()?)],
            Shape::MovMemAcc => [Operand::DirectAddress(bytes.read_u16()?), Operand::ACCUMULATOR],
        };
        Ok(operands)
    }
}

#[inline]
fn read_immediate(bytes: &mut ByteReader<'_>, is_wide: bool) -> Result<Operand, DecodeError> {
    let imm = if is_wide {
        bytes.read_u16()?
    }
    else {
        bytes.read_u8()? as u16
    };
    Ok(Operand::Immediate(imm))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub mnemonic: Mnemonic,
    pub shape: Shape,
}

/// The 256-slot opcode dispatch table. Unpopulated slots are unsupported opcodes.
pub struct OpcodeTable {
    entries: [Option<OpcodeEntry>; 256],
}

impl OpcodeTable {
    #[inline(always)]
    pub fn lookup(&self, opcode: Opcode) -> Option<&OpcodeEntry> {
        self.entries[opcode.byte() as usize].as_ref()
    }

    /// Iterate over every populated slot in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, &OpcodeEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(op, entry)| entry.as_ref().map(|e| (Opcode::from(op as u8), e)))
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! inst {
    ($opcode:literal, $table:ident, $m:ident, $shape:ident) => {
        $table[$opcode] = Some(OpcodeEntry {
            mnemonic: Mnemonic::$m,
            shape: Shape::$shape,
        });
    };
}

#[rustfmt::skip]
pub static OPCODE_TABLE: OpcodeTable = {
    let mut t: [Option<OpcodeEntry>; 256] = [None; 256];
    inst!(0x00, t, ADD, RmR);
    inst!(0x01, t, ADD, RmR);
    inst!(0x02, t, ADD, RRm);
    inst!(0x03, t, ADD, RRm);
    inst!(0x04, t, ADD, AccImm);
    inst!(0x05, t, ADD, AccImm);
    inst!(0x08, t, OR,  RmR);
    inst!(0x09, t, OR,  RmR);
    inst!(0x0A, t, OR,  RRm);
    inst!(0x0B, t, OR,  RRm);
    inst!(0x10, t, ADC, RmR);
    inst!(0x11, t, ADC, RmR);
    inst!(0x12, t, ADC, RRm);
    inst!(0x13, t, ADC, RRm);
    inst!(0x18, t, SBB, RmR);
    inst!(0x19, t, SBB, RmR);
    inst!(0x1A, t, SBB, RRm);
    inst!(0x1B, t, SBB, RRm);
    inst!(0x20, t, AND, RmR);
    inst!(0x21, t, AND, RmR);
    inst!(0x22, t, AND, RRm);
    inst!(0x23, t, AND, RRm);
    inst!(0x28, t, SUB, RmR);
    inst!(0x29, t, SUB, RmR);
    inst!(0x2A, t, SUB, RRm);
    inst!(0x2B, t, SUB, RRm);
    inst!(0x2C, t, SUB, AccImm);
    inst!(0x2D, t, SUB, AccImm);
    inst!(0x30, t, XOR, RmR);
    inst!(0x31, t, XOR, RmR);
    inst!(0x32, t, XOR, RRm);
    inst!(0x33, t, XOR, RRm);
    inst!(0x38, t, CMP, RmR);
    inst!(0x39, t, CMP, RmR);
    inst!(0x3A, t, CMP, RRm);
    inst!(0x3B, t, CMP, RRm);
    inst!(0x3C, t, CMP, AccImm);
    inst!(0x3D, t, CMP, AccImm);
    inst!(0x88, t, MOV, RmR);
    inst!(0x89, t, MOV, RmR);
    inst!(0x8A, t, MOV, RRm);
    inst!(0x8B, t, MOV, RRm);
    inst!(0xA0, t, MOV, MovAccMem);
    inst!(0xA1, t, MOV, MovAccMem);
    inst!(0xA2, t, MOV, MovMemAcc);
    inst!(0xA3, t, MOV, MovMemAcc);
    inst!(0xB0, t, MOV, MovRegImm);
    inst!(0xB1, t, MOV, MovRegImm);
    inst!(0xB2, t, MOV, MovRegImm);
    inst!(0xB3, t, MOV, MovRegImm);
    inst!(0xB4, t, MOV, MovRegImm);
    inst!(0xB5, t, MOV, MovRegImm);
    inst!(0xB6, t, MOV, MovRegImm);
    inst!(0xB7, t, MOV, MovRegImm);
    inst!(0xB8, t, MOV, MovRegImm);
    inst!(0xB9, t, MOV, MovRegImm);
    inst!(0xBA, t, MOV, MovRegImm);
    inst!(0xBB, t, MOV, MovRegImm);
    // 0xBC-0xBF (MOV SP/BP/SI/DI, imm16) are not mapped.
    OpcodeTable { entries: t }
};

impl Intel8086 {
    /// Decode the instruction starting at `offset`.
    pub fn decode(buffer: &[u8], offset: usize) -> Result<Instruction, DecodeError> {
        let mut bytes = ByteReader::new(buffer, offset);

        let opcode = Opcode::from(bytes.read_u8()?);
        let entry = OPCODE_TABLE.lookup(opcode).ok_or(DecodeError::UnsupportedOpcode {
            opcode: opcode.byte(),
            offset,
        })?;

        let operands = entry.shape.decode(opcode, &mut bytes)?;

        let instruction = Instruction {
            opcode,
            mnemonic: entry.mnemonic,
            is_wide: entry.shape.is_wide(opcode),
            instruction_bytes: bytes.consumed().to_vec(),
            operands,
        };

        trace!(
            offset,
            opcode = %opcode,
            mnemonic = %instruction.mnemonic,
            size = instruction.size(),
            "decoded instruction"
        );

        Ok(instruction)
    }
}
