//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the training loop that learns ordered merge rules
//! from a symbol sequence.

pub mod trainer;

pub use trainer::{BpeTrainer, TrainingConfig, TrainingOutcome};
