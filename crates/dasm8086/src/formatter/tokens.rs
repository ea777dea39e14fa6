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
//! Token capture for coloured or otherwise styled listings.
//!
//! A [TokenStream] records each run of text a formatter writes along with its role. Values
//! that differ per instruction are [SemanticToken]s; fixed punctuation, spacing and line
//! annotations are [DecoratorToken]s.

use std::fmt::{self, Display};

use super::{FormatterOutput, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticToken {
    Mnemonic(String),
    Register(String),
    Immediate(String),
    Displacement(String),
    SizeKeyword(String),
}

impl SemanticToken {
    pub fn text(&self) -> &str {
        match self {
            SemanticToken::Mnemonic(s)
            | SemanticToken::Register(s)
            | SemanticToken::Immediate(s)
            | SemanticToken::Displacement(s)
            | SemanticToken::SizeKeyword(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoratorToken {
    OpenBracket,
    CloseBracket,
    Plus,
    Comma,
    Space,
    Comment(String),
}

impl DecoratorToken {
    pub fn text(&self) -> &str {
        match self {
            DecoratorToken::OpenBracket => "[",
            DecoratorToken::CloseBracket => "]",
            DecoratorToken::Plus => "+",
            DecoratorToken::Comma => ",",
            DecoratorToken::Space => " ",
            DecoratorToken::Comment(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenItem {
    Semantic(SemanticToken),
    Decorator(DecoratorToken),
}

impl TokenItem {
    pub fn text(&self) -> &str {
        match self {
            TokenItem::Semantic(t) => t.text(),
            TokenItem::Decorator(t) => t.text(),
        }
    }

    /// Build the token for `text` written as `kind`. Punctuation kinds carry fixed text, so
    /// `text` is only kept for the other kinds.
    pub fn from_kind(text: &str, kind: TokenKind) -> TokenItem {
        let semantic = |f: fn(String) -> SemanticToken| TokenItem::Semantic(f(text.to_string()));
        match kind {
            TokenKind::Mnemonic => semantic(SemanticToken::Mnemonic),
            TokenKind::Register => semantic(SemanticToken::Register),
            TokenKind::Immediate => semantic(SemanticToken::Immediate),
            TokenKind::Displacement => semantic(SemanticToken::Displacement),
            TokenKind::SizeKeyword => semantic(SemanticToken::SizeKeyword),
            TokenKind::OpenBracket => TokenItem::Decorator(DecoratorToken::OpenBracket),
            TokenKind::CloseBracket => TokenItem::Decorator(DecoratorToken::CloseBracket),
            TokenKind::Plus => TokenItem::Decorator(DecoratorToken::Plus),
            TokenKind::Comma => TokenItem::Decorator(DecoratorToken::Comma),
            TokenKind::Space => TokenItem::Decorator(DecoratorToken::Space),
            TokenKind::Comment => TokenItem::Decorator(DecoratorToken::Comment(text.to_string())),
        }
    }
}

impl Display for TokenItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Tokens of one listing line, in output order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<TokenItem>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[TokenItem] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenItem> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|t| f.write_str(t.text()))
    }
}

impl FormatterOutput for TokenStream {
    fn write(&mut self, text: &str, kind: TokenKind) {
        self.tokens.push(TokenItem::from_kind(text, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decoder::decode_one,
        formatter::{Format, FormatOptions, NasmFormatter},
    };

    fn tokens_of(bytes: &[u8]) -> TokenStream {
        let (inst, _) = decode_one(bytes, 0).expect("decode ok");
        let mut stream = TokenStream::new();
        NasmFormatter.format_instruction(&inst, &FormatOptions::default(), &mut stream);
        stream
    }

    #[test]
    fn memory_operand_tokens() {
        // mov [bx + si + 0x10], cl
        let stream = tokens_of(&[0x88, 0x48, 0x10]);

        assert_eq!(stream.to_string(), "MOV BYTE [BX + SI + 0x10], CL");
        assert_eq!(
            stream.tokens()[..3],
            [
                TokenItem::Semantic(SemanticToken::Mnemonic("MOV".into())),
                TokenItem::Decorator(DecoratorToken::Space),
                TokenItem::Semantic(SemanticToken::SizeKeyword("BYTE".into())),
            ]
        );

        let registers: Vec<&str> = stream
            .iter()
            .filter_map(|t| match t {
                TokenItem::Semantic(SemanticToken::Register(r)) => Some(r.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(registers, ["BX", "SI", "CL"]);

        assert!(stream.iter().any(|t| *t == TokenItem::Semantic(SemanticToken::Displacement("0x10".into()))));
        assert_eq!(stream.iter().filter(|t| **t == TokenItem::Decorator(DecoratorToken::Plus)).count(), 2);
    }

    #[test]
    fn register_form_has_no_size_keyword() {
        let stream = tokens_of(&[0x89, 0xD8]);
        assert_eq!(stream.to_string(), "MOV AX, BX");
        assert!(!stream
            .iter()
            .any(|t| matches!(t, TokenItem::Semantic(SemanticToken::SizeKeyword(_)))));
        assert_eq!(stream.len(), 6);
    }

    #[test]
    fn punctuation_text_is_fixed() {
        let mut stream = TokenStream::new();
        stream.write("[", TokenKind::OpenBracket);
        stream.write("; note", TokenKind::Comment);
        assert_eq!(
            stream.tokens(),
            [
                TokenItem::Decorator(DecoratorToken::OpenBracket),
                TokenItem::Decorator(DecoratorToken::Comment("; note".into())),
            ]
        );
        stream.clear();
        assert!(stream.is_empty());
    }
}
