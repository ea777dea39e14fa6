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
//! ModRM byte decoding and the 16-bit addressing resolver.
//!
//! ```text
//!   7 6 | 5 4 3 | 2 1 0
//!   mod |  reg  |  rm
//! ```
//!
//! | mod | meaning                                                        |
//! |-----|----------------------------------------------------------------|
//! | 00  | memory, no displacement; rm = 110 is a direct 16-bit address   |
//! | 01  | memory + 8-bit displacement                                    |
//! | 10  | memory + 16-bit little-endian displacement                     |
//! | 11  | register named by rm                                           |

use crate::{
    byte_reader::ByteReader,
    cpu_common::{Displacement, MemoryBase, MemoryOperand, Operand},
    error::DecodeError,
};

/// The 'mod' field (bits 7-6).
#[inline(always)]
pub const fn mod_field(byte: u8) -> u8 {
    byte >> 6
}

/// The 'reg' field (bits 5-3).
#[inline(always)]
pub const fn reg_field(byte: u8) -> u8 {
    (byte >> 3) & 0x07
}

/// The 'rm' field (bits 2-0).
#[inline(always)]
pub const fn rm_field(byte: u8) -> u8 {
    byte & 0x07
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// mod = 00, rm != 110
    Memory,
    /// mod = 00, rm = 110
    DirectAddress,
    /// mod = 01
    MemoryDisp8,
    /// mod = 10
    MemoryDisp16,
    /// mod = 11
    Register,
}

impl AddressingMode {
    /// Bytes following the ModRM byte that this mode consumes.
    pub const fn extra_bytes(&self) -> usize {
        match self {
            AddressingMode::Memory | AddressingMode::Register => 0,
            AddressingMode::MemoryDisp8 => 1,
            AddressingMode::MemoryDisp16 | AddressingMode::DirectAddress => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModRmByte {
    byte: u8,
    b_mod: u8,
    b_reg: u8,
    b_rm: u8,
    mode: AddressingMode,
}

const MODRM_TABLE: [ModRmByte; 256] = {
    let mut table: [ModRmByte; 256] = [ModRmByte {
        byte: 0,
        b_mod: 0,
        b_reg: 0,
        b_rm: 0,
        mode: AddressingMode::Memory,
    }; 256];
    let mut byte = 0;

    loop {
        table[byte as usize] = ModRmByte::decode_fields(byte);

        if byte < 255 {
            byte += 1;
        }
        else {
            break;
        }
    }

    table
};

impl ModRmByte {
    const MODRM_ADDR_MASK: u8 = 0b11_000_111;
    const MODRM_ADDR_DISP16: u8 = 0b00_000_110;

    const fn decode_fields(byte: u8) -> ModRmByte {
        let b_mod = mod_field(byte);
        let mode = match b_mod {
            0b00 => {
                // [disp16] replaces [bp] in mod 00
                if byte & Self::MODRM_ADDR_MASK == Self::MODRM_ADDR_DISP16 {
                    AddressingMode::DirectAddress
                }
                else {
                    AddressingMode::Memory
                }
            }
            0b01 => AddressingMode::MemoryDisp8,
            0b10 => AddressingMode::MemoryDisp16,
            _ => AddressingMode::Register,
        };

        ModRmByte {
            byte,
            b_mod,
            b_reg: reg_field(byte),
            b_rm: rm_field(byte),
            mode,
        }
    }

    #[inline(always)]
    pub fn from_byte(byte: u8) -> ModRmByte {
        MODRM_TABLE[byte as usize]
    }

    /// Read the modrm byte and look up its fields. Displacement bytes are left for
    /// [ModRmByte::resolve]. Every byte value has a table entry, so only a short read fails.
    pub fn read(bytes: &mut ByteReader<'_>) -> Result<ModRmByte, DecodeError> {
        Ok(ModRmByte::from_byte(bytes.read_u8()?))
    }

    /// Resolve the 'R/M' side of the byte into an operand, consuming any displacement or
    /// direct address bytes that follow.
    pub fn resolve(&self, bytes: &mut ByteReader<'_>) -> Result<Operand, DecodeError> {
        let memory = |disp| {
            Operand::Memory(MemoryOperand {
                base: MemoryBase::from_rm(self.b_rm),
                disp,
            })
        };

        match self.mode {
            AddressingMode::Register => Ok(Operand::Register(self.b_rm)),
            AddressingMode::DirectAddress => Ok(Operand::DirectAddress(bytes.read_u16()?)),
            AddressingMode::Memory => Ok(memory(Displacement::NoDisp)),
            AddressingMode::MemoryDisp8 => Ok(memory(Displacement::Disp8(bytes.read_u8()?))),
            AddressingMode::MemoryDisp16 => Ok(memory(Displacement::Disp16(bytes.read_u16()?))),
        }
    }

    /// Return the 'mod' field (top two bits) of the modrm byte.
    #[inline(always)]
    pub fn mod_value(&self) -> u8 {
        self.b_mod
    }

    #[inline(always)]
    pub fn reg_value(&self) -> u8 {
        self.b_reg
    }

    #[inline(always)]
    pub fn rm_value(&self) -> u8 {
        self.b_rm
    }

    #[inline(always)]
    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Set the 'mod' field. The argument is assumed to be an un-shifted 2 bit value (0-3).
    pub fn set_mod(&mut self, r#mod: u8) {
        *self = ModRmByte::from_byte((self.byte & 0b0011_1111) | ((r#mod & 0x03) << 6));
    }

    /// Set the 'reg' field (middle three bits) of the modrm byte. The argument is assumed to be
    /// an un-shifted 3 bit value (0-7).
    pub fn set_reg(&mut self, reg: u8) {
        *self = ModRmByte::from_byte((self.byte & 0b1100_0111) | ((reg & 0x07) << 3));
    }

    /// Set the 'rm' field (low three bits).
    pub fn set_rm(&mut self, rm: u8) {
        *self = ModRmByte::from_byte((self.byte & 0b1111_1000) | (rm & 0x07));
    }

    // Return whether the modrm byte specifies a memory addressing mode
    #[inline(always)]
    pub fn is_addressing_mode(&self) -> bool {
        self.b_mod != 0b11
    }

    #[inline(always)]
    pub fn raw_byte(&self) -> u8 {
        self.byte
    }
}

/// Resolve the ModRM byte at `modrm_offset`, returning the R/M operand and the number of bytes
/// consumed after the ModRM byte itself.
pub fn resolve_rm(bytes: &[u8], modrm_offset: usize) -> Result<(Operand, usize), DecodeError> {
    let mut reader = ByteReader::new(bytes, modrm_offset);
    let modrm = ModRmByte::read(&mut reader)?;
    let operand = modrm.resolve(&mut reader)?;
    Ok((operand, reader.position() - modrm_offset - 1))
}
