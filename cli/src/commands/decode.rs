//! Decode command implementation.

use anyhow::{bail, Context, Result as AnyhowResult};
use clap::Parser;
use pairwise_tokenizer::{SymbolId, Tokenizer};
use std::path::PathBuf;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Path to the saved tokenizer
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Token IDs to decode, e.g. "258, 100, 258" or "[258 100 258]"
    pub ids: String,

    /// Fail instead of substituting U+FFFD when the bytes are not valid UTF-8
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.tokenizer)
        .with_context(|| format!("loading tokenizer from {}", cmd.tokenizer.display()))?;

    let ids = parse_id_list(&cmd.ids)?;
    let text = if cmd.strict {
        tokenizer.decode_strict(&ids)?
    } else {
        tokenizer.decode(&ids)?
    };

    println!("{}", text);

    Ok(())
}

/// Parse a list of decimal IDs separated by commas and/or whitespace,
/// optionally wrapped in a single pair of brackets.
pub fn parse_id_list(input: &str) -> AnyhowResult<Vec<SymbolId>> {
    let trimmed = input.trim();
    let body = match (trimmed.strip_prefix('['), trimmed.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => trimmed,
        _ => bail!("unbalanced brackets in token ID list: {trimmed:?}"),
    };

    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<SymbolId>()
                .with_context(|| format!("invalid token ID {item:?}"))
        })
        .collect()
}
