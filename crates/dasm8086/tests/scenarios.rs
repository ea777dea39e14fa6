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

use crate::common::{format_bytes, init_tests};

fn listing_line(bytes: &[u8]) -> (String, usize) {
    let (instruction, size) = decode_one(bytes, 0).expect("decode ok");
    (render(&instruction), size)
}

#[test]
fn mov_register_to_register() {
    init_tests();
    assert_eq!(listing_line(&[0x89, 0xD8]), ("MOV AX, BX\n".to_string(), 2));
}

#[test]
fn mov_register_immediate() {
    init_tests();
    assert_eq!(listing_line(&[0xB8, 0x01, 0x00]), ("MOV AX, 0x1\n".to_string(), 3));
    assert_eq!(listing_line(&[0xB1, 0x0C]), ("MOV CL, 0xC\n".to_string(), 2));
    assert_eq!(listing_line(&[0xBB, 0xFF, 0xFF]), ("MOV BX, 0xFFFF\n".to_string(), 3));
}

#[test]
fn cmp_accumulator_immediate() {
    init_tests();
    assert_eq!(listing_line(&[0x3C, 0x05]), ("CMP AL, 0x5\n".to_string(), 2));
    assert_eq!(listing_line(&[0x2D, 0x34, 0x12]), ("SUB AX, 0x1234\n".to_string(), 3));
}

#[test]
fn bp_with_zero_displacement() {
    init_tests();
    assert_eq!(
        listing_line(&[0x8B, 0x56, 0x00]),
        ("MOV DX, WORD [BP + 0x0]\n".to_string(), 3)
    );

    let opts = FormatOptions {
        always_size_memory: false,
        ..Default::default()
    };
    let (text, size) = format_bytes(&[0x8B, 0x56, 0x00], &opts).expect("decode ok");
    assert_eq!(text, "MOV DX, [BP + 0x0]");
    assert_eq!(size, 3);
}

#[test]
fn accumulator_direct_memory() {
    init_tests();
    assert_eq!(listing_line(&[0xA1, 0x00, 0x01]), ("MOV AX, [0x100]\n".to_string(), 3));
    assert_eq!(listing_line(&[0xA0, 0x10, 0x00]), ("MOV AL, [0x10]\n".to_string(), 3));
    assert_eq!(listing_line(&[0xA2, 0x10, 0x00]), ("MOV [0x10], AL\n".to_string(), 3));
}

#[test]
fn unmapped_opcode() {
    init_tests();
    assert_eq!(
        decode_one(&[0xF4], 0).unwrap_err(),
        DecodeError::UnsupportedOpcode { opcode: 0xF4, offset: 0 }
    );
}

#[test]
fn wide_register_immediate_gap_is_unmapped() {
    init_tests();
    for opcode in 0xBCu8..=0xBF {
        let err = decode_one(&[opcode, 0x00, 0x00], 0).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedOpcode { opcode, offset: 0 });
    }
}

#[test]
fn alu_register_forms() {
    init_tests();
    let cases: &[(&[u8], &str)] = &[
        (&[0x00, 0xC3], "ADD BL, AL"),
        (&[0x09, 0xC8], "OR AX, CX"),
        (&[0x12, 0xE1], "ADC AH, CL"),
        (&[0x19, 0xD2], "SBB DX, DX"),
        (&[0x22, 0xC7], "AND AL, BH"),
        (&[0x31, 0xF6], "XOR SI, SI"),
        (&[0x3B, 0xEC], "CMP BP, SP"),
    ];
    for (bytes, expected) in cases {
        let (text, size) = format_bytes(bytes, &FormatOptions::default()).expect("decode ok");
        assert_eq!(&text, expected, "bytes {:02X?}", bytes);
        assert_eq!(size, 2);
    }
}

#[test]
fn memory_addressing_modes() {
    init_tests();
    let cases: &[(&[u8], &str, usize)] = &[
        (&[0x03, 0x01], "ADD AX, WORD [BX + DI]", 2),
        (&[0x88, 0x02], "MOV BYTE [BP + SI], AL", 2),
        (&[0x8B, 0x1E, 0x34, 0x12], "MOV BX, [0x1234]", 4),
        (&[0x89, 0x47, 0x80], "MOV WORD [BX + 0x80], AX", 3),
        (&[0x01, 0x8B, 0x00, 0x10], "ADD WORD [BP + DI + 0x1000], CX", 4),
    ];
    for (bytes, expected, expected_size) in cases {
        let (text, size) = format_bytes(bytes, &FormatOptions::default()).expect("decode ok");
        assert_eq!(&text, expected, "bytes {:02X?}", bytes);
        assert_eq!(size, *expected_size);
    }
}

#[test]
fn decode_at_offset() {
    init_tests();
    let bytes = [0x89, 0xD8, 0x3C, 0x05];
    let (instruction, size) = decode_one(&bytes, 2).expect("decode ok");
    assert_eq!(size, 2);
    assert_eq!(instruction.mnemonic, Mnemonic::CMP);
    assert_eq!(instruction.instruction_bytes, vec![0x3C, 0x05]);

    let err = decode_one(&[0x89, 0xD8, 0xF4], 2).unwrap_err();
    assert_eq!(err.offset(), 2);
}

#[test]
fn truncated_streams() {
    init_tests();
    assert_eq!(
        decode_one(&[], 0).unwrap_err(),
        DecodeError::TruncatedStream { offset: 0, needed: 1, available: 0 }
    );
    assert!(matches!(
        decode_one(&[0x8B, 0x86, 0x00], 0),
        Err(DecodeError::TruncatedStream { offset: 0, needed: 2, available: 1 })
    ));
    assert!(matches!(
        decode_one(&[0xA1, 0x00], 0),
        Err(DecodeError::TruncatedStream { .. })
    ));
}
