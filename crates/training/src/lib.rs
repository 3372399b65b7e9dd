//! Pairwise-training - BPE training infrastructure
//!
//! This crate provides the training loop that learns BPE merge rules from
//! text: repeatedly count adjacent pairs, merge the most frequent one into a
//! new symbol and record the rule.
//!
//! # Example
//!
//! ```rust
//! use pairwise_training::{BpeTrainer, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig::with_max_merges(3));
//! let outcome = trainer.train("aaabdaaabac")?;
//!
//! assert_eq!(outcome.rules.len(), 3);
//! assert_eq!(outcome.stream.as_slice(), &[258, 100, 258, 97, 99]);
//! # Ok::<(), pairwise_training::TokenizerError>(())
//! ```

pub use pairwise_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{BpeTrainer, TrainingConfig, TrainingOutcome};
