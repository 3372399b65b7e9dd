//! Vocab command implementation.

use super::print_vocab;
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairwise_tokenizer::Tokenizer;
use std::path::PathBuf;

/// Vocab command arguments.
#[derive(Parser)]
pub struct VocabCommand {
    /// Path to the saved tokenizer
    #[arg(short, long)]
    pub tokenizer: PathBuf,

    /// Only list learned merges, not the base units
    #[arg(long, default_value_t = false)]
    pub merges_only: bool,
}

pub fn run(cmd: VocabCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.tokenizer)
        .with_context(|| format!("loading tokenizer from {}", cmd.tokenizer.display()))?;

    let mut entries = tokenizer.vocabulary()?;
    if cmd.merges_only {
        let merge_base = tokenizer.rules().merge_base();
        entries.retain(|entry| entry.id >= merge_base);
    }

    println!(
        "Mode: {}, merges: {}, vocab size: {}",
        tokenizer.encoding_mode(),
        tokenizer.num_merges(),
        tokenizer.vocab_size()
    );
    print_vocab(&entries);

    Ok(())
}
