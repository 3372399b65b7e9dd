//! Encode command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairwise_tokenizer::Tokenizer;
use std::io::Read;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Path to the saved tokenizer
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Text to encode ("-" reads stdin)
    pub text: String,
}

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.tokenizer)
        .with_context(|| format!("loading tokenizer from {}", cmd.tokenizer.display()))?;

    let text = if cmd.text == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.text
    };

    let encoding = tokenizer.encode(&text);
    println!("{:?}", encoding.ids);

    Ok(())
}
