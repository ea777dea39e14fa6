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
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use colored::{Color, Colorize};
use dasm8086::{
    formatter::{DecoratorToken, SemanticToken, TokenItem, TokenStream},
    listing::{disassemble, ErrorPolicy, Listing, ListingOptions, LISTING_HEADER},
    FormatOptions,
    NumberStyle,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dasm8086",
    version,
    about = "Disassemble a flat 8086 program image into a NASM-style listing."
)]
struct Args {
    /// Program image to disassemble
    input: PathBuf,

    /// Emit undecodable bytes as DB lines instead of stopping
    #[arg(long, action = clap::ArgAction::SetTrue)]
    skip_invalid: bool,

    /// Write mnemonics in lowercase
    #[arg(long, action = clap::ArgAction::SetTrue)]
    lowercase: bool,

    /// Write numbers in suffixed hex (e.g. 01Fh) instead of 0x-prefixed hex
    #[arg(long, action = clap::ArgAction::SetTrue)]
    suffix_hex: bool,

    /// Colorize the listing
    #[arg(long, action = clap::ArgAction::SetTrue)]
    color: bool,
}

impl Args {
    fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            format: FormatOptions {
                uppercase_mnemonic: !self.lowercase,
                number_style: if self.suffix_hex {
                    NumberStyle::Suffixed
                }
                else {
                    NumberStyle::Prefixed
                },
                ..Default::default()
            },
            on_error: if self.skip_invalid {
                ErrorPolicy::SkipByte
            }
            else {
                ErrorPolicy::Stop
            },
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let bytes = fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    debug!(path = %args.input.display(), len = bytes.len(), "loaded program image");

    let opts = args.listing_options();
    // Build the whole listing before writing so a failed decode leaves stdout empty.
    let text = if args.color {
        colored::control::set_override(true);
        colored_listing(&bytes, &opts)?
    }
    else {
        disassemble(&bytes, &opts)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes()).context("failed to write listing")?;
    out.flush().context("failed to write listing")?;
    Ok(())
}

fn colored_listing(bytes: &[u8], opts: &ListingOptions) -> anyhow::Result<String> {
    let mut text = format!("{LISTING_HEADER}\n\n");
    let mut stream = TokenStream::new();
    for line in Listing::new(bytes, opts.on_error) {
        let line = line?;
        stream.clear();
        line.format(&opts.format, &mut stream);
        for tok in stream.iter() {
            text.push_str(&colorize(tok));
        }
        text.push('\n');
    }
    Ok(text)
}

fn colorize(tok: &TokenItem) -> String {
    match tok {
        TokenItem::Decorator(DecoratorToken::OpenBracket) => "[".color(Color::BrightBlue).to_string(),
        TokenItem::Decorator(DecoratorToken::CloseBracket) => "]".color(Color::BrightBlue).to_string(),
        TokenItem::Decorator(DecoratorToken::Comma) => ",".color(Color::White).to_string(),
        TokenItem::Decorator(DecoratorToken::Plus) => "+".color(Color::White).to_string(),
        TokenItem::Decorator(DecoratorToken::Space) => " ".to_string(),
        TokenItem::Decorator(DecoratorToken::Comment(c)) => c.color(Color::BrightBlack).to_string(),
        TokenItem::Semantic(SemanticToken::Mnemonic(m)) => m.color(Color::Cyan).to_string(),
        TokenItem::Semantic(SemanticToken::Register(r)) => r.color(Color::Green).to_string(),
        TokenItem::Semantic(SemanticToken::Immediate(i)) => i.color(Color::Yellow).to_string(),
        TokenItem::Semantic(SemanticToken::SizeKeyword(k)) => k.color(Color::Magenta).to_string(),
        TokenItem::Semantic(SemanticToken::Displacement(d)) => d.color(Color::Cyan).to_string(),
    }
}
