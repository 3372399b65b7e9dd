//! CLI commands for the pairwise tokenizer.

pub mod decode;
pub mod encode;
pub mod process;
pub mod train;
pub mod vocab;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use process::ProcessCommand;
pub use train::TrainCommand;
pub use vocab::VocabCommand;

use pairwise_tokenizer::VocabEntry;

/// Print vocabulary entries one per line, in ID order.
pub(crate) fn print_vocab(entries: &[VocabEntry]) {
    println!("Vocabulary ({} entries):", entries.len());
    for entry in entries {
        println!("  {:>8}  {:?}", entry.id, entry.display());
    }
}
