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
mod common;

use dasm8086::prelude::*;
use dasm8086_fuzzer::{FuzzerOptions, InstructionFuzzer};
use rand::SeedableRng;

use crate::common::init_tests;

pub const TEST_SEED: u64 = 0x8086;
pub const STREAM_TEST_COUNT: usize = 200;
pub const STREAM_LEN: usize = 64;

#[test]
fn stream_decodes_on_instruction_boundaries() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = rand::rngs::StdRng::seed_from_u64(TEST_SEED);
    let fuzzer = InstructionFuzzer::new();

    for _ in 0..STREAM_TEST_COUNT {
        let (bytes, offsets) = fuzzer.random_stream(&mut rng, &FuzzerOptions::default(), STREAM_LEN)?;

        let decoded: Vec<(usize, Instruction)> = Decoder::new(&bytes).collect::<Result<_, _>>()?;
        let decoded_offsets: Vec<usize> = decoded.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(decoded_offsets, offsets);

        let total: usize = decoded.iter().map(|(_, i)| i.size()).sum();
        assert_eq!(total, bytes.len());
    }
    Ok(())
}

#[test]
fn stream_error_halts_iteration() {
    init_tests();
    let bytes = [0x89, 0xD8, 0xF4, 0x89, 0xD8];
    let mut decoder = Decoder::new(&bytes);

    assert!(matches!(decoder.next(), Some(Ok((0, _)))));
    assert_eq!(
        decoder.next(),
        Some(Err(DecodeError::UnsupportedOpcode { opcode: 0xF4, offset: 2 }))
    );
    assert_eq!(decoder.next(), None);

    // Resynchronize past the bad byte.
    Decoder::skip(&mut decoder, 1);
    assert!(matches!(decoder.next(), Some(Ok((3, _)))));
    assert_eq!(decoder.next(), None);
}

#[test]
fn listing_of_fuzzed_stream() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = rand::rngs::StdRng::seed_from_u64(TEST_SEED);
    let (bytes, offsets) = InstructionFuzzer::new().random_stream(&mut rng, &FuzzerOptions::default(), STREAM_LEN)?;

    let mut out = Vec::new();
    let summary = write_listing(&bytes, &ListingOptions::default(), &mut out)?;
    assert_eq!(summary, ListingSummary { instructions: offsets.len(), skipped_bytes: 0 });

    let text = String::from_utf8(out)?;
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("ORG 100h"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.count(), offsets.len());
    Ok(())
}
