//! Core BPE algorithm implementation.
//!
//! This module contains the fundamental data structures of byte-pair
//! encoding, independent of the unit granularity: symbol streams, pair
//! statistics, merge rules and the vocabulary rebuilt from them.

pub mod merges;
pub mod stats;
pub mod stream;
pub mod vocab;

pub use merges::{MergeRule, MergeRules, Pair, SymbolId};
pub use stats::PairStats;
pub use stream::SymbolStream;
pub use vocab::{VocabR, Vocabulary, VocabularyBuilder};
