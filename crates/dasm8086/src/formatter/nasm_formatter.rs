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

use num_traits::PrimInt;

use crate::{
    cpu_common::{register_name, MemoryOperand, Operand},
    formatter::{Format, FormatOptions, FormatterOutput, NumberStyle, TokenKind},
    instruction::Instruction,
};

/// NASM-style formatter
#[derive(Copy, Clone, Debug, Default)]
pub struct NasmFormatter;

impl Format for NasmFormatter {
    fn format_mnemonic(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        let m = inst.mnemonic.to_str();
        if opts.uppercase_mnemonic {
            out.write(m, TokenKind::Mnemonic);
        } else {
            out.write(&m.to_ascii_lowercase(), TokenKind::Mnemonic);
        }
    }

    fn format_operands(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        for (i, operand) in inst.operands.iter().enumerate() {
            if i > 0 {
                out.write(",", TokenKind::Comma);
                out.write(" ", TokenKind::Space);
            }
            self.format_operand(inst, *operand, opts, out);
        }
    }
}

/// `0x` prefixed uppercase hex, e.g. `0x1F`.
pub fn format_hex<T: UpperHex>(value: T) -> String {
    format!("0x{:X}", value)
}

/// Decimal below 10, otherwise uppercase hex with an `h` suffix. A leading zero is added
/// when the first hex digit is a letter so the result still parses as a number.
pub fn format_hex_or_decimal<T: PrimInt + Display + UpperHex>(value: T) -> String {
    match T::from(10u8) {
        Some(ten) if value < ten => format!("{}", value),
        _ => {
            let digits = format!("{:X}", value);
            if digits.starts_with(|c: char| c.is_ascii_alphabetic()) {
                format!("0{digits}h")
            }
            else {
                format!("{digits}h")
            }
        }
    }
}

pub fn format_number<T: PrimInt + Display + UpperHex>(value: T, style: NumberStyle) -> String {
    match style {
        NumberStyle::Prefixed => format_hex(value),
        NumberStyle::Suffixed => format_hex_or_decimal(value),
    }
}

/// ` + ` between the parts of an effective address.
fn write_plus(out: &mut dyn FormatterOutput) {
    out.write(" ", TokenKind::Space);
    out.write("+", TokenKind::Plus);
    out.write(" ", TokenKind::Space);
}

impl NasmFormatter {
    fn format_size(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        if opts.always_size_memory || !inst.has_register_operand() {
            out.write(if inst.is_wide { "WORD" } else { "BYTE" }, TokenKind::SizeKeyword);
            out.write(" ", TokenKind::Space);
        }
    }

    fn format_memory(&self, mem: MemoryOperand, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        let (base, index) = mem.base.registers();

        out.write("[", TokenKind::OpenBracket);
        out.write(base.to_str(), TokenKind::Register);
        if let Some(index) = index {
            write_plus(out);
            out.write(index.to_str(), TokenKind::Register);
        }
        if mem.has_displacement() {
            write_plus(out);
            out.write(&format_number(mem.disp.value(), opts.number_style), TokenKind::Displacement);
        }
        out.write("]", TokenKind::CloseBracket);
    }

    fn format_operand(&self, inst: &Instruction, operand: Operand, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        match operand {
            Operand::Register(index) => out.write(register_name(index, inst.is_wide), TokenKind::Register),
            Operand::Memory(mem) => {
                self.format_size(inst, opts, out);
                self.format_memory(mem, opts, out);
            }
            Operand::Immediate(imm) => out.write(&format_number(imm, opts.number_style), TokenKind::Immediate),
            Operand::DirectAddress(addr) => {
                out.write("[", TokenKind::OpenBracket);
                out.write(&format_number(addr, opts.number_style), TokenKind::Displacement);
                out.write("]", TokenKind::CloseBracket);
            }
        }
    }
}
