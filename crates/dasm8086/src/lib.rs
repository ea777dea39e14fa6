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
//! A table-driven decoder for a subset of the Intel 8086 instruction set, with a NASM-style
//! formatter and a program listing driver for flat binary images.
//!
//! ```
//! use dasm8086::prelude::*;
//!
//! let (instruction, size) = decode_one(&[0x89, 0xD8], 0).unwrap();
//! assert_eq!(size, 2);
//! assert_eq!(render(&instruction), "MOV AX, BX\n");
//! ```

pub mod byte_reader;
pub mod cpu_common;
pub mod decoder;
pub mod error;
pub mod formatter;
pub mod i8086;
pub mod instruction;
pub mod listing;
pub mod mnemonic;
pub mod modrm;
pub mod opcode;

pub use cpu_common::{memory_base_expression, register_name};
pub use decoder::{decode_one, Decoder};
pub use error::{DecodeError, ListingError};
pub use formatter::{format_instruction, render, Format, FormatOptions, NasmFormatter, NumberStyle, TokenKind};
pub use instruction::Instruction;

pub mod prelude {
    pub use crate::{
        cpu_common::{
            memory_base_expression,
            register_name,
            Displacement,
            MemoryBase,
            MemoryOperand,
            Operand,
            Register16,
            Register8,
        },
        decoder::{decode_one, Decoder},
        error::{DecodeError, ListingError},
        formatter::{
            format_instruction,
            render,
            DecoratorToken,
            Format,
            FormatOptions,
            FormatterOutput,
            NasmFormatter,
            NumberStyle,
            SemanticToken,
            TokenItem,
            TokenKind,
            TokenStream,
        },
        i8086::{Intel8086, OpcodeEntry, Shape, OPCODE_TABLE},
        instruction::Instruction,
        listing::{disassemble, write_listing, ErrorPolicy, Listing, ListingLine, ListingOptions, ListingSummary},
        mnemonic::Mnemonic,
        opcode::Opcode,
    };
}
