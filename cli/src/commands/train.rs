//! Train command implementation.

use super::decode::parse_id_list;
use super::print_vocab;
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairwise_tokenizer::{
    EncodingMode, Tokenizer, TokenizerSaver, DEFAULT_MAX_VOCAB_SIZE,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training data file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target vocabulary size (base units plus merges)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_VOCAB_SIZE)]
    pub vocab_size: usize,

    /// Largest vocabulary size that may be requested
    #[arg(long, env = "PAIRWISE_MAX_VOCAB_SIZE", default_value_t = DEFAULT_MAX_VOCAB_SIZE)]
    pub max_vocab_size: usize,

    /// Use Unicode characters instead of bytes as base units
    #[arg(long, default_value_t = false)]
    pub char_level: bool,

    /// Print every learned merge
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Text to encode after training
    #[arg(long)]
    pub encode: Option<String>,

    /// Token IDs to decode after training, e.g. "[258, 100]"
    #[arg(long)]
    pub decode: Option<String>,

    /// Print the full vocabulary after training
    #[arg(long, default_value_t = false)]
    pub show_vocab: bool,

    /// Save the trained tokenizer to this JSON file
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Leave the vocabulary out of the saved file; it is rebuilt on load
    #[arg(long, default_value_t = false)]
    pub no_vocab_cache: bool,
}

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let data = fs::read_to_string(&cmd.input)
        .with_context(|| format!("reading training data from {}", cmd.input.display()))?;
    info!(path = %cmd.input.display(), bytes = data.len(), "read training data");

    let mode = if cmd.char_level {
        EncodingMode::CharLevel
    } else {
        EncodingMode::ByteLevel
    };

    let mut tokenizer = Tokenizer::builder()
        .encoding_mode(mode)
        .max_vocab_size(cmd.max_vocab_size)
        .build()?;

    let start = Instant::now();
    let outcome = tokenizer.train_to_vocab_size(&data, cmd.vocab_size)?;

    println!(
        "Trained {} tokenizer in {:.2}s",
        mode,
        start.elapsed().as_secs_f64()
    );
    println!("  Merges learned: {}", outcome.num_merges());
    if outcome.stopped_early() {
        println!(
            "  Stopped early: no mergeable pairs left ({} merges requested)",
            outcome.requested
        );
    }
    println!("  Vocab size: {}", tokenizer.vocab_size());
    println!(
        "  Training text compressed to {} tokens",
        outcome.stream.len()
    );

    if cmd.verbose {
        let vocab = tokenizer.vocab()?;
        for (rank, rule) in tokenizer.rules().iter().enumerate() {
            let display = vocab
                .get(rule.id)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default();
            println!(
                "  Merge {}: ({}, {}) -> {} {:?}",
                rank + 1,
                rule.left,
                rule.right,
                rule.id,
                display
            );
        }
    }

    if let Some(text) = &cmd.encode {
        let encoding = tokenizer.encode(text);
        println!("Encoded {:?}: {:?}", text, encoding.ids);
    }

    if let Some(raw) = &cmd.decode {
        let ids = parse_id_list(raw)?;
        println!("Decoded {:?}: {:?}", ids, tokenizer.decode(&ids)?);
    }

    if cmd.show_vocab {
        print_vocab(&tokenizer.vocabulary()?);
    }

    if let Some(path) = &cmd.save {
        TokenizerSaver::new(&tokenizer)
            .with_vocab_cache(!cmd.no_vocab_cache)
            .save(path)
            .with_context(|| format!("saving tokenizer to {}", path.display()))?;
        println!("Saved tokenizer to {}", path.display());
    }

    Ok(())
}
