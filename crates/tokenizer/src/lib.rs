//! Pairwise-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for BPE tokenization,
//! tying the rule table, the trainer and the vocabulary together behind a
//! single `Tokenizer` type.
//!
//! # Features
//!
//! - Simple builder pattern for tokenizer configuration
//! - Byte-level and character-level encoding modes
//! - Lossy and strict decoding
//! - Loading and saving as a single JSON file
//!
//! # Example
//!
//! ```rust
//! use pairwise_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().build()?;
//! tokenizer.train("aaabdaaabac", 3)?;
//!
//! // Encode text
//! let encoding = tokenizer.encode("aaabdaaabac");
//! assert_eq!(encoding.ids, vec![258, 100, 258, 97, 99]);
//!
//! // Decode tokens
//! assert_eq!(tokenizer.decode(&encoding.ids)?, "aaabdaaabac");
//! # Ok::<(), pairwise_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use pairwise_core::{EncodingMode, MergeRule, Result, SymbolId, TokenizerError};
pub use pairwise_training::TrainingOutcome;

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{
    Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig, VocabEntry, DEFAULT_MAX_VOCAB_SIZE,
};

// IO/Serialization
pub mod io;
pub use io::{SerializedTokenizer, TokenizerLoader, TokenizerSaver};

// Request/response contract
pub mod process;
pub use process::{process, BpeRequest, BpeResponse, DEFAULT_MAX_MERGES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
