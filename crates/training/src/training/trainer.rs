//! BPE trainer implementation.
//!
//! This module implements the core BPE training algorithm: on every pass the
//! adjacent pair counts are recomputed, the most frequent pair receives the
//! next symbol ID and every occurrence of it is rewritten.
//!
//! Ties between equally frequent pairs go to the pair whose first occurrence
//! in the current sequence comes earliest.

use pairwise_core::{EncodingMode, MergeRules, Result, SymbolStream, TokenizerError};
use tracing::{debug, info};

/// Configuration for BPE training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Upper bound on the number of merges learned
    pub max_merges: usize,
    /// Unit granularity of the seeded sequence
    pub mode: EncodingMode,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_merges: 10,
            mode: EncodingMode::ByteLevel,
        }
    }
}

impl TrainingConfig {
    /// Byte-level configuration learning at most `max_merges` rules.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self {
            max_merges,
            ..Default::default()
        }
    }

    /// Check that every merge ID the run could assign fits in a symbol ID.
    pub fn validate(&self) -> Result<()> {
        // One past the last ID the run could assign
        let end = u64::from(self.mode.merge_base()) + self.max_merges as u64;
        if end > u64::from(u32::MAX) + 1 {
            return Err(TokenizerError::InvalidConfig(format!(
                "{} merges would overflow the symbol ID space for {}",
                self.max_merges, self.mode
            )));
        }
        Ok(())
    }
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// The fully compressed training sequence
    pub stream: SymbolStream,
    /// Learned rules in creation order
    pub rules: MergeRules,
    /// Number of merges that were requested
    pub requested: usize,
}

impl TrainingOutcome {
    /// Number of merges actually learned.
    #[inline]
    pub fn num_merges(&self) -> usize {
        self.rules.len()
    }

    /// Whether training ran out of pairs before learning `requested` merges.
    #[inline]
    pub fn stopped_early(&self) -> bool {
        self.rules.len() < self.requested
    }
}

/// BPE trainer.
///
/// Trains on a single symbol sequence by iteratively merging the most
/// frequent adjacent pair.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a byte-level trainer learning at most `max_merges` rules.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self::new(TrainingConfig::with_max_merges(max_merges))
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Seed `text` at the configured granularity and train on it.
    pub fn train(&self, text: &str) -> Result<TrainingOutcome> {
        self.learn(self.config.mode.seed(text))
    }

    /// Train on an already seeded symbol sequence.
    ///
    /// Stops after `max_merges` rules or as soon as no adjacent pair is left;
    /// the latter is a normal outcome, not an error.
    pub fn learn(&self, mut stream: SymbolStream) -> Result<TrainingOutcome> {
        self.config.validate()?;

        let mut rules = MergeRules::new(self.config.mode.merge_base());

        while rules.len() < self.config.max_merges {
            let stats = stream.pair_stats();
            let Some((pair, count)) = stats.most_frequent() else {
                break;
            };

            let id = rules.push(pair)?;
            let replaced = stream.merge(pair, id);
            debug!(
                left = pair.0,
                right = pair.1,
                id,
                count,
                replaced,
                remaining = stream.len(),
                "merging pair into a new token"
            );
        }

        let outcome = TrainingOutcome {
            stream,
            rules,
            requested: self.config.max_merges,
        };

        if outcome.stopped_early() {
            info!(
                learned = outcome.num_merges(),
                requested = outcome.requested,
                "no mergeable pairs left; training stopped early"
            );
        }

        Ok(outcome)
    }
}
