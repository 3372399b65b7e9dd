//! Process command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairwise_tokenizer::BpeRequest;
use std::io::Read;

/// Process command arguments.
#[derive(Parser)]
pub struct ProcessCommand {
    /// Request as JSON, e.g. '{"text": "hello", "max_merges": 5}' (stdin if omitted)
    #[arg(long)]
    pub json: Option<String>,
}

pub fn run(cmd: ProcessCommand) -> AnyhowResult<()> {
    let raw = match cmd.json {
        Some(json) => json,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading request from stdin")?;
            buffer
        }
    };

    let request: BpeRequest = serde_json::from_str(&raw).context("parsing request JSON")?;
    let response = pairwise_tokenizer::process(&request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
