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
use std::ops::{Range, RangeInclusive};

use dasm8086::{
    i8086::{OpcodeEntry, OPCODE_TABLE},
    opcode::Opcode,
};
use rand::{prelude::StdRng, Rng};

use crate::{
    error::{FuzzerError, FuzzerError::InvalidOptions},
    modrm_fuzzer::ModRmFuzzer,
};

#[derive(Clone, Debug)]
pub struct FuzzerOptions {
    /// Only generate opcodes within this range.
    pub opcode_range: Option<RangeInclusive<u8>>,
    /// Allow register-direct (mod == 11) ModRM bytes.
    pub allow_reg_form: bool,
}

impl Default for FuzzerOptions {
    fn default() -> Self {
        Self {
            opcode_range: None,
            allow_reg_form: true,
        }
    }
}

/// Generates well-formed encodings of supported opcodes.
pub struct InstructionFuzzer {
    opcodes: Vec<(Opcode, OpcodeEntry)>,
}

/// A generated instruction. `bytes` holds exactly one complete encoding.
#[derive(Clone, Debug, Default)]
pub struct FuzzerInstruction {
    pub bytes: Vec<u8>,
    pub opcode_range: Range<usize>,
    pub modrm_range: Option<Range<usize>>,
    pub displacement_range: Option<Range<usize>>,
    pub immediate_range: Option<Range<usize>>,
}

impl FuzzerInstruction {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The opcode byte, if the instruction has been populated.
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.get(self.opcode_range.start).copied()
    }
}

impl Default for InstructionFuzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionFuzzer {
    pub fn new() -> Self {
        let opcodes = OPCODE_TABLE.iter().map(|(op, entry)| (op, *entry)).collect();
        InstructionFuzzer { opcodes }
    }

    /// Every opcode the fuzzer can emit.
    pub fn opcodes(&self) -> impl Iterator<Item = Opcode> + '_ {
        self.opcodes.iter().map(|(op, _)| *op)
    }

    pub fn random_instruction(
        &self,
        rng: &mut StdRng,
        options: &FuzzerOptions,
    ) -> Result<FuzzerInstruction, FuzzerError> {
        let candidates: Vec<&(Opcode, OpcodeEntry)> = self
            .opcodes
            .iter()
            .filter(|(op, _)| match &options.opcode_range {
                Some(range) => range.contains(&op.byte()),
                None => true,
            })
            .collect();

        if candidates.is_empty() {
            return Err(InvalidOptions(
                "No supported opcodes match the provided opcode range".into(),
            ));
        }

        let (opcode, entry) = *candidates[rng.random_range(0..candidates.len())];
        let mut new_instruction = FuzzerInstruction {
            opcode_range: 0..1,
            ..FuzzerInstruction::default()
        };
        new_instruction.bytes.push(opcode.byte());

        // Add modrm and its displacement if the shape has a modrm.
        if entry.shape.has_modrm() {
            let modrm = ModRmFuzzer::new().with_reg_form(options.allow_reg_form).build(rng);

            let modrm_start = new_instruction.bytes.len();
            new_instruction.bytes.push(modrm.raw_byte());
            new_instruction.modrm_range = Some(modrm_start..modrm_start + 1);

            let disp_len = modrm.mode().extra_bytes();
            if disp_len > 0 {
                let disp_start = new_instruction.bytes.len();
                for _ in 0..disp_len {
                    new_instruction.bytes.push(rng.random());
                }
                new_instruction.displacement_range = Some(disp_start..disp_start + disp_len);
            }
        }

        // Add immediate or direct address bytes.
        let imm_len = entry.shape.operand_bytes(opcode);
        if imm_len > 0 {
            let imm_start = new_instruction.bytes.len();
            for _ in 0..imm_len {
                new_instruction.bytes.push(rng.random());
            }
            new_instruction.immediate_range = Some(imm_start..imm_start + imm_len);
        }

        Ok(new_instruction)
    }

    /// Generate `count` instructions back to back. Returns the concatenated bytes and the
    /// offset of each instruction.
    pub fn random_stream(
        &self,
        rng: &mut StdRng,
        options: &FuzzerOptions,
        count: usize,
    ) -> Result<(Vec<u8>, Vec<usize>), FuzzerError> {
        let mut bytes = Vec::new();
        let mut offsets = Vec::with_capacity(count);
        for _ in 0..count {
            let instruction = self.random_instruction(rng, options)?;
            offsets.push(bytes.len());
            bytes.extend_from_slice(&instruction.bytes);
        }
        Ok((bytes, offsets))
    }
}
