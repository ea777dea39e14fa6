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

pub mod nasm_formatter;
pub mod tokens;

pub use nasm_formatter::NasmFormatter;
pub use tokens::{DecoratorToken, SemanticToken, TokenItem, TokenStream};

use crate::instruction::Instruction;

/// How numeric operands are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NumberStyle {
    /// `0x` followed by uppercase hex digits, e.g. `0x1F`.
    #[default]
    Prefixed,
    /// Decimal below 10, otherwise uppercase hex with an `h` suffix, e.g. `01Fh`.
    Suffixed,
}

/// Options controlling disassembly formatting
#[derive(Copy, Clone, Debug)]
pub struct FormatOptions {
    /// If true, render mnemonic in uppercase; otherwise lowercase.
    pub uppercase_mnemonic: bool,
    /// If true, memory operands always carry a BYTE/WORD keyword. If false, the keyword is
    /// only written when no register operand fixes the operand size.
    pub always_size_memory: bool,
    pub number_style: NumberStyle,
    /// If true, only output the mnemonic, no operands
    pub mnemonic_only: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            uppercase_mnemonic: true,
            always_size_memory: true,
            number_style: NumberStyle::Prefixed,
            mnemonic_only: false,
        }
    }
}

/// The role of a run of listing text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Mnemonic,
    Register,
    Immediate,
    Displacement,
    /// `BYTE` or `WORD` ahead of a memory operand.
    SizeKeyword,
    OpenBracket,
    CloseBracket,
    Plus,
    Comma,
    Space,
    /// `; ...` annotation trailing a data line.
    Comment,
}

/// Receives listing text one token at a time. Plain-text sinks ignore `kind`; richer sinks
/// (see [TokenStream]) keep it for colouring.
pub trait FormatterOutput {
    fn write(&mut self, text: &str, kind: TokenKind);
}

impl FormatterOutput for String {
    fn write(&mut self, text: &str, _kind: TokenKind) {
        self.push_str(text);
    }
}

/// Trait for disassembly formatting styles
pub trait Format {
    /// Emit the mnemonic token without leading/trailing spaces.
    fn format_mnemonic(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput);
    /// Emit operands, separated from each other but without a leading separator.
    fn format_operands(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput);

    /// Compose the full instruction from parts (default behavior)
    fn format_instruction(&self, inst: &Instruction, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        self.format_mnemonic(inst, opts, out);
        if opts.mnemonic_only {
            return;
        }
        out.write(" ", TokenKind::Space);
        self.format_operands(inst, opts, out);
    }
}

/// Convenience helper using NASM-style by default; returns a flat String
pub fn format_instruction(inst: &Instruction, opts: &FormatOptions) -> String {
    let mut s = String::new();
    NasmFormatter.format_instruction(inst, opts, &mut s);
    s
}

/// Render one listing line, including the line terminator, with default options.
pub fn render(inst: &Instruction) -> String {
    let mut s = format_instruction(inst, &FormatOptions::default());
    s.push('\n');
    s
}
