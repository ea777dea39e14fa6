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
use std::fmt::{Display, Formatter};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register8 {
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
}

impl Register8 {
    pub fn to_str(&self) -> &'static str {
        match self {
            Register8::AL => "AL",
            Register8::CL => "CL",
            Register8::DL => "DL",
            Register8::BL => "BL",
            Register8::AH => "AH",
            Register8::CH => "CH",
            Register8::DH => "DH",
            Register8::BH => "BH",
        }
    }
}

impl Display for Register8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

pub const REGISTER8_LUT: [Register8; 8] = [
    Register8::AL,
    Register8::CL,
    Register8::DL,
    Register8::BL,
    Register8::AH,
    Register8::CH,
    Register8::DH,
    Register8::BH,
];

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Register16 {
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
}

impl Register16 {
    pub fn to_str(&self) -> &'static str {
        match self {
            Register16::AX => "AX",
            Register16::CX => "CX",
            Register16::DX => "DX",
            Register16::BX => "BX",
            Register16::SP => "SP",
            Register16::BP => "BP",
            Register16::SI => "SI",
            Register16::DI => "DI",
        }
    }
}

impl Display for Register16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

pub const REGISTER16_LUT: [Register16; 8] = [
    Register16::AX,
    Register16::CX,
    Register16::DX,
    Register16::BX,
    Register16::SP,
    Register16::BP,
    Register16::SI,
    Register16::DI,
];

/// Name of the register selected by a 3-bit REG/RM field (or the low bits of a
/// MOV reg, imm opcode). Only the low three bits of `index` are significant.
#[inline]
pub fn register_name(index: u8, is_wide: bool) -> &'static str {
    let index = (index & 0x07) as usize;
    if is_wide {
        REGISTER16_LUT[index].to_str()
    }
    else {
        REGISTER8_LUT[index].to_str()
    }
}

/// The eight base expressions of 16-bit memory addressing, indexed by the RM field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemoryBase {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

pub const MEMORY_BASE_LUT: [MemoryBase; 8] = [
    MemoryBase::BxSi,
    MemoryBase::BxDi,
    MemoryBase::BpSi,
    MemoryBase::BpDi,
    MemoryBase::Si,
    MemoryBase::Di,
    MemoryBase::Bp,
    MemoryBase::Bx,
];

impl MemoryBase {
    #[inline(always)]
    pub fn from_rm(rm: u8) -> MemoryBase {
        MEMORY_BASE_LUT[(rm & 0x07) as usize]
    }

    #[inline(always)]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// The registers making up the expression, as (base, optional index).
    pub fn registers(&self) -> (Register16, Option<Register16>) {
        match self {
            MemoryBase::BxSi => (Register16::BX, Some(Register16::SI)),
            MemoryBase::BxDi => (Register16::BX, Some(Register16::DI)),
            MemoryBase::BpSi => (Register16::BP, Some(Register16::SI)),
            MemoryBase::BpDi => (Register16::BP, Some(Register16::DI)),
            MemoryBase::Si => (Register16::SI, None),
            MemoryBase::Di => (Register16::DI, None),
            MemoryBase::Bp => (Register16::BP, None),
            MemoryBase::Bx => (Register16::BX, None),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            MemoryBase::BxSi => "BX + SI",
            MemoryBase::BxDi => "BX + DI",
            MemoryBase::BpSi => "BP + SI",
            MemoryBase::BpDi => "BP + DI",
            MemoryBase::Si => "SI",
            MemoryBase::Di => "DI",
            MemoryBase::Bp => "BP",
            MemoryBase::Bx => "BX",
        }
    }
}

impl Display for MemoryBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Textual base expression for an RM field value. Only the low three bits are significant.
#[inline]
pub fn memory_base_expression(index: u8) -> &'static str {
    MemoryBase::from_rm(index).to_str()
}

/// A memory displacement, kept as the raw little-endian bit pattern read from the stream.
/// An 8-bit displacement is not sign-extended.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Displacement {
    NoDisp,
    Disp8(u8),
    Disp16(u16),
}

impl Displacement {
    pub fn is_some(&self) -> bool {
        !matches!(self, Displacement::NoDisp)
    }

    /// Number of displacement bytes in the encoding.
    pub fn len(&self) -> usize {
        match self {
            Displacement::NoDisp => 0,
            Displacement::Disp8(_) => 1,
            Displacement::Disp16(_) => 2,
        }
    }

    pub fn value(&self) -> u16 {
        match *self {
            Displacement::NoDisp => 0,
            Displacement::Disp8(v) => v as u16,
            Displacement::Disp16(v) => v,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoryOperand {
    pub base: MemoryBase,
    pub disp: Displacement,
}

impl MemoryOperand {
    #[inline]
    pub fn has_displacement(&self) -> bool {
        self.disp.is_some()
    }
}

/// A decoded operand.
///
/// `Register` holds a 3-bit register index; whether it names a byte or word register is a
/// property of the owning instruction's width.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Register(u8),
    Memory(MemoryOperand),
    Immediate(u16),
    DirectAddress(u16),
}

impl Operand {
    /// The accumulator (AL or AX depending on width).
    pub const ACCUMULATOR: Operand = Operand::Register(0);

    #[inline(always)]
    pub fn is_register(&self) -> bool {
        matches!(self, Operand::Register(_))
    }

    #[inline(always)]
    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Memory(_) | Operand::DirectAddress(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn byte_and_word_names_differ() {
        let mut names = HashSet::new();
        for i in 0..8u8 {
            assert_ne!(register_name(i, false), register_name(i, true));
            names.insert(register_name(i, false));
            names.insert(register_name(i, true));
        }
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn register_lookup_by_field() {
        assert_eq!(register_name(0, true), "AX");
        assert_eq!(register_name(4, false), "AH");
        assert_eq!(register_name(4, true), "SP");
        assert_eq!(register_name(7, false), "BH");
    }

    #[test]
    fn memory_base_table() {
        let expected = ["BX + SI", "BX + DI", "BP + SI", "BP + DI", "SI", "DI", "BP", "BX"];
        assert_eq!(MEMORY_BASE_LUT.len(), 8);
        for (i, text) in expected.iter().enumerate() {
            assert_eq!(memory_base_expression(i as u8), *text);
            assert_eq!(MemoryBase::from_rm(i as u8).index(), i as u8);
        }
    }

    #[test]
    fn displacement_is_unsigned() {
        assert_eq!(Displacement::Disp8(0xFF).value(), 0x00FF);
        assert_eq!(Displacement::Disp16(0xFF80).value(), 0xFF80);
        assert_eq!(Displacement::NoDisp.len(), 0);
        assert!(!Displacement::NoDisp.is_some());
    }
}
