//! Pairwise CLI - Command-line interface for the BPE tokenizer.
//!
//! This is the main entry point for the `pairwise` command-line tool. Log
//! events are written to stderr; results go to stdout.

mod commands;

use clap::{Args, Parser, Subcommand};
use commands::{DecodeCommand, EncodeCommand, ProcessCommand, TrainCommand, VocabCommand};
use std::process::exit;
use tracing::*;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "pairwise")]
#[command(author, version, about = "A small byte pair encoding tokenizer", long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: Globals,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Globals {
    /// Turn debugging information on (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new tokenizer from a text file
    Train(TrainCommand),
    /// Encode text to token IDs with a saved tokenizer
    Encode(EncodeCommand),
    /// Decode token IDs back to text with a saved tokenizer
    Decode(DecodeCommand),
    /// Print the vocabulary of a saved tokenizer
    Vocab(VocabCommand),
    /// Train, encode and decode a single JSON request
    Process(ProcessCommand),
}

impl Commands {
    fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Train(cmd) => commands::train::run(cmd),
            Commands::Encode(cmd) => commands::encode::run(cmd),
            Commands::Decode(cmd) => commands::decode::run(cmd),
            Commands::Vocab(cmd) => commands::vocab::run(cmd),
            Commands::Process(cmd) => commands::process::run(cmd),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let default_log_directive = match cli.globals.debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_log_directive.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {e}");
    }

    if let Err(e) = cli.command.execute() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        exit(1);
    }

    debug!("command executed successfully");
}
