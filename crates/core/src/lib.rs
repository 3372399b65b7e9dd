//! Pairwise-core - Core BPE algorithm implementation
//!
//! This crate provides the fundamental data structures and algorithms for
//! byte-pair encoding (BPE), shared by training and the tokenizer facade.
//!
//! # Features
//!
//! - One integer symbol ID space for base units and learned merges
//! - Pair statistics computed fresh per pass, with a deterministic tie-break
//! - Append-only merge rule tables with validated reloading
//! - Vocabulary reconstruction from rules alone
//!
//! # Example
//!
//! ```rust
//! use pairwise_core::{Encoder, EncodingMode, MergeRules, VocabularyBuilder};
//!
//! let mut rules = MergeRules::new(EncodingMode::ByteLevel.merge_base());
//! let aa = rules.push((b'a' as u32, b'a' as u32))?;
//!
//! let stream = Encoder::new(&rules, EncodingMode::ByteLevel).encode("aab");
//! assert_eq!(stream.as_slice(), &[aa, b'b' as u32]);
//!
//! let vocab = VocabularyBuilder::byte_level().build(&rules)?;
//! assert_eq!(vocab.decode(stream.as_slice())?, b"aab");
//! # Ok::<(), pairwise_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use self::core::{
    MergeRule, MergeRules, Pair, PairStats, SymbolId, SymbolStream, VocabR, Vocabulary,
    VocabularyBuilder,
};

// Unit granularities and rule application
pub mod encoding;
pub use encoding::{ByteLevel, CharLevel, Encoder, EncodingMode};
