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

use colored::{Color, Colorize};
use dasm8086::prelude::*;
use dasm8086_fuzzer::{FuzzerOptions, InstructionFuzzer};
use rand::SeedableRng;

use crate::common::init_tests;

pub const COLOR_TEST_COUNT: usize = 100;
pub const TEST_SEED: u64 = 0x12345678;

fn colorize(stream: &TokenStream) -> String {
    let mut colored_out = String::new();
    for tok in stream.iter() {
        let piece = match tok {
            TokenItem::Decorator(DecoratorToken::OpenBracket | DecoratorToken::CloseBracket) => tok.text().color(Color::BrightBlue),
            TokenItem::Decorator(DecoratorToken::Comma | DecoratorToken::Plus) => tok.text().color(Color::White),
            TokenItem::Decorator(DecoratorToken::Space) => tok.text().normal(),
            TokenItem::Decorator(DecoratorToken::Comment(c)) => c.color(Color::BrightBlack),
            TokenItem::Semantic(SemanticToken::Mnemonic(m)) => m.color(Color::Cyan),
            TokenItem::Semantic(SemanticToken::Register(r)) => r.color(Color::Green),
            TokenItem::Semantic(SemanticToken::SizeKeyword(k)) => k.color(Color::Magenta),
            TokenItem::Semantic(SemanticToken::Displacement(d)) => d.color(Color::Cyan),
            TokenItem::Semantic(SemanticToken::Immediate(i)) => i.color(Color::Yellow),
        };
        colored_out.push_str(&piece.to_string());
    }
    colored_out
}

#[test]
fn colored_tokenstream_integration() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = rand::rngs::StdRng::seed_from_u64(TEST_SEED);
    let fuzzer = InstructionFuzzer::new();

    for _ in 0..COLOR_TEST_COUNT {
        let instruction = fuzzer.random_instruction(&mut rng, &FuzzerOptions::default())?;
        let (inst, _) = decode_one(&instruction.bytes, 0)?;

        let mut stream = TokenStream::new();
        NasmFormatter.format_instruction(&inst, &FormatOptions::default(), &mut stream);

        // Token stream flattens to exactly the plain rendering.
        assert_eq!(stream.to_string(), format_instruction(&inst, &FormatOptions::default()));

        // A size keyword appears exactly when a base/index memory operand does.
        let has_size_keyword = stream
            .iter()
            .any(|t| matches!(t, TokenItem::Semantic(SemanticToken::SizeKeyword(_))));
        let has_based_memory = inst.operands.iter().any(|o| matches!(o, Operand::Memory(_)));
        assert_eq!(has_size_keyword, has_based_memory, "{}", stream);
        assert!(matches!(stream.iter().next(), Some(TokenItem::Semantic(SemanticToken::Mnemonic(_)))));

        println!("{}", colorize(&stream));
    }
    Ok(())
}

#[test]
fn memory_operand_tokens() {
    init_tests();
    let (inst, _) = decode_one(&[0x89, 0x8B, 0x00, 0x10], 0).expect("decode ok");
    let mut stream = TokenStream::new();
    NasmFormatter.format_instruction(&inst, &FormatOptions::default(), &mut stream);

    assert_eq!(stream.to_string(), "MOV WORD [BP + DI + 0x1000], CX");
    assert_eq!(
        stream.tokens()[2],
        TokenItem::Semantic(SemanticToken::SizeKeyword("WORD".into()))
    );
    assert!(!stream.iter().any(|t| matches!(t, TokenItem::Decorator(DecoratorToken::Comment(_)))));

    let registers: Vec<&str> = stream
        .iter()
        .filter_map(|t| match t {
            TokenItem::Semantic(SemanticToken::Register(r)) => Some(r.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(registers, ["BP", "DI", "CX"]);
    assert!(stream
        .iter()
        .any(|t| *t == TokenItem::Semantic(SemanticToken::Displacement("0x1000".into()))));

    colored::control::set_override(true);
    assert!(colorize(&stream).contains(&"WORD".color(Color::Magenta).to_string()));
}

#[test]
fn skipped_byte_tokens() {
    init_tests();
    let opts = ListingOptions {
        on_error: ErrorPolicy::SkipByte,
        ..Default::default()
    };
    let lines: Vec<ListingLine> = Listing::new(&[0xF4, 0x3C, 0x05], opts.on_error)
        .collect::<Result<_, _>>()
        .expect("skip policy never fails");
    assert_eq!(lines.len(), 2);

    let mut stream = TokenStream::new();
    lines[0].format(&opts.format, &mut stream);
    assert_eq!(
        stream.tokens().last(),
        Some(&TokenItem::Decorator(DecoratorToken::Comment("; unsupported opcode 0xF4".into())))
    );
    assert!(!stream.iter().any(|t| matches!(t, TokenItem::Semantic(SemanticToken::SizeKeyword(_)))));
}
