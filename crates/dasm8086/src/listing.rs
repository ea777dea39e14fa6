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
//! Program listings: a fixed `ORG 100h` header followed by one line per instruction, for
//! flat, headerless program images.

use std::io::Write;

use tracing::debug;

use crate::{
    decoder::Decoder,
    error::{DecodeError, ListingError},
    formatter::{nasm_formatter::format_number, Format, FormatOptions, FormatterOutput, NasmFormatter, TokenKind},
    instruction::Instruction,
};

pub const LISTING_HEADER: &str = "ORG 100h";

/// What a listing does when a byte sequence cannot be decoded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Yield the error and end the listing.
    #[default]
    Stop,
    /// Emit the byte at the failing offset as data and resume decoding at the next byte.
    SkipByte,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ListingOptions {
    pub format: FormatOptions,
    pub on_error: ErrorPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingLine {
    Instruction { offset: usize, instruction: Instruction },
    Data { offset: usize, byte: u8, error: DecodeError },
}

impl ListingLine {
    pub fn offset(&self) -> usize {
        match self {
            ListingLine::Instruction { offset, .. } | ListingLine::Data { offset, .. } => *offset,
        }
    }

    /// Write the line, without terminator, to `out`.
    pub fn format(&self, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
        match self {
            ListingLine::Instruction { instruction, .. } => {
                NasmFormatter.format_instruction(instruction, opts, out);
            }
            ListingLine::Data { byte, error, .. } => {
                out.write(if opts.uppercase_mnemonic { "DB" } else { "db" }, TokenKind::Mnemonic);
                out.write(" ", TokenKind::Space);
                out.write(&format_number(*byte, opts.number_style), TokenKind::Immediate);
                out.write(" ", TokenKind::Space);
                out.write(&format!("; {}", error.reason()), TokenKind::Comment);
            }
        }
    }
}

/// Iterates a program image as listing lines.
pub struct Listing<'a> {
    decoder: Decoder<'a>,
    bytes: &'a [u8],
    policy: ErrorPolicy,
}

impl<'a> Listing<'a> {
    pub fn new(bytes: &'a [u8], policy: ErrorPolicy) -> Self {
        Self {
            decoder: Decoder::new(bytes),
            bytes,
            policy,
        }
    }
}

impl Iterator for Listing<'_> {
    type Item = Result<ListingLine, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.decoder.next()? {
            Ok((offset, instruction)) => Some(Ok(ListingLine::Instruction { offset, instruction })),
            Err(error) => match self.policy {
                ErrorPolicy::Stop => Some(Err(error)),
                ErrorPolicy::SkipByte => {
                    let offset = self.decoder.offset();
                    let Some(&byte) = self.bytes.get(offset) else {
                        return Some(Err(error));
                    };
                    debug!(offset, byte, %error, "skipping undecodable byte");
                    Decoder::skip(&mut self.decoder, 1);
                    Some(Ok(ListingLine::Data { offset, byte, error }))
                }
            },
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingSummary {
    pub instructions: usize,
    pub skipped_bytes: usize,
}

/// Write a complete listing of `bytes` to `out`.
pub fn write_listing<W: Write>(bytes: &[u8], opts: &ListingOptions, mut out: W) -> Result<ListingSummary, ListingError> {
    let mut summary = ListingSummary::default();
    writeln!(out, "{LISTING_HEADER}")?;
    writeln!(out)?;

    let mut line_text = String::new();
    for line in Listing::new(bytes, opts.on_error) {
        let line = line?;
        match line {
            ListingLine::Instruction { .. } => summary.instructions += 1,
            ListingLine::Data { .. } => summary.skipped_bytes += 1,
        }
        line_text.clear();
        line.format(&opts.format, &mut line_text);
        writeln!(out, "{line_text}")?;
    }
    Ok(summary)
}

/// Convenience helper returning the listing as a String.
pub fn disassemble(bytes: &[u8], opts: &ListingOptions) -> Result<String, ListingError> {
    let mut buf = Vec::new();
    write_listing(bytes, opts, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
