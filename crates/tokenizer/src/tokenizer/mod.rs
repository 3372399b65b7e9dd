//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that owns a learned
//! rule table and the vocabulary rebuilt from it.

use pairwise_core::{
    CharLevel, Encoder, EncodingMode, MergeRules, Result, SymbolId, TokenizerError, Vocabulary,
    VocabularyBuilder,
};
use pairwise_training::{BpeTrainer, TrainingConfig, TrainingOutcome};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Default cap on the requested vocabulary size.
pub const DEFAULT_MAX_VOCAB_SIZE: usize = 300;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Unit granularity used for training, encoding and decoding
    pub encoding_mode: EncodingMode,
    /// Upper bound applied to requested vocabulary sizes
    pub max_vocab_size: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            encoding_mode: EncodingMode::ByteLevel,
            max_vocab_size: DEFAULT_MAX_VOCAB_SIZE,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoding mode.
    pub fn encoding_mode(mut self, mode: EncodingMode) -> Self {
        self.config.encoding_mode = mode;
        self
    }

    /// Set the cap on requested vocabulary sizes.
    pub fn max_vocab_size(mut self, size: usize) -> Self {
        self.config.max_vocab_size = size;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        if self.config.max_vocab_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "max_vocab_size must be at least 1".to_string(),
            ));
        }
        Ok(Tokenizer::new(self.config))
    }
}

/// Main tokenizer struct.
///
/// Holds the merge rules from the last training run (or a loaded file) and a
/// vocabulary that is built on first use. Encoding and decoding only need
/// `&self`, so a trained tokenizer can be shared across threads; training
/// needs `&mut self`.
#[derive(Debug)]
pub struct Tokenizer {
    /// Configuration
    config: TokenizerConfig,
    /// Merge rules in creation order
    rules: MergeRules,
    /// Characters seen at training time (character level only)
    alphabet: Vec<char>,
    /// Vocabulary, built lazily from `rules` and `alphabet`
    vocab: OnceLock<Vocabulary>,
}

impl Tokenizer {
    /// Create an untrained tokenizer with the given configuration.
    ///
    /// With no rules, encoding returns base units and decoding still works.
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            rules: MergeRules::new(config.encoding_mode.merge_base()),
            alphabet: Vec::new(),
            vocab: OnceLock::new(),
            config,
        }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Assemble a tokenizer from already validated parts.
    pub(crate) fn from_parts(
        config: TokenizerConfig,
        rules: MergeRules,
        alphabet: Vec<char>,
        vocab: Option<Vocabulary>,
    ) -> Self {
        let cell = OnceLock::new();
        if let Some(vocab) = vocab {
            let _ = cell.set(vocab);
        }

        Self {
            config,
            rules,
            alphabet,
            vocab: cell,
        }
    }

    /// Train the tokenizer, learning at most `max_merges` rules.
    ///
    /// Replaces any previously learned rules, alphabet and vocabulary.
    pub fn train(&mut self, text: &str, max_merges: usize) -> Result<TrainingOutcome> {
        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges,
            mode: self.config.encoding_mode,
        });
        let outcome = trainer.train(text)?;

        self.alphabet = match self.config.encoding_mode {
            EncodingMode::ByteLevel => Vec::new(),
            EncodingMode::CharLevel => CharLevel::alphabet(text),
        };
        self.rules = outcome.rules.clone();
        self.vocab = OnceLock::new();

        debug!(
            merges = self.rules.len(),
            vocab_size = self.vocab_size(),
            "training complete"
        );

        Ok(outcome)
    }

    /// Train until the vocabulary reaches `vocab_size` entries.
    ///
    /// The requested size is capped at the configured `max_vocab_size`. A size
    /// at or below the base alphabet trains with zero merges.
    pub fn train_to_vocab_size(
        &mut self,
        text: &str,
        vocab_size: usize,
    ) -> Result<TrainingOutcome> {
        let capped = if vocab_size > self.config.max_vocab_size {
            warn!(
                requested = vocab_size,
                max = self.config.max_vocab_size,
                "requested vocab size exceeds the maximum; using the maximum instead"
            );
            self.config.max_vocab_size
        } else {
            vocab_size
        };

        let base_size = match self.config.encoding_mode {
            EncodingMode::ByteLevel => EncodingMode::ByteLevel.merge_base() as usize,
            EncodingMode::CharLevel => CharLevel::alphabet(text).len(),
        };

        if capped < base_size {
            warn!(
                vocab_size = capped,
                base_size,
                "vocab size is smaller than the base alphabet; learning no merges"
            );
        }

        self.train(text, capped.saturating_sub(base_size))
    }

    /// Encode text to symbol IDs.
    ///
    /// Never fails; before training this returns the base-unit sequence.
    pub fn encode(&self, text: &str) -> Encoding {
        let stream = Encoder::new(&self.rules, self.config.encoding_mode).encode(text);

        Encoding {
            ids: stream.into_ids(),
            text: text.to_string(),
        }
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch(&self, texts: &[String]) -> Vec<Encoding> {
        use rayon::prelude::*;

        texts.par_iter().map(|text| self.encode(text)).collect()
    }

    /// Decode symbol IDs to the bytes they expand to.
    pub fn decode_bytes(&self, ids: &[SymbolId]) -> Result<Vec<u8>> {
        self.vocab()?.decode(ids)
    }

    /// Decode symbol IDs back to text.
    ///
    /// A byte-level ID list can end in the middle of a multi-byte character;
    /// such sequences are replaced with U+FFFD. Unknown IDs are an error.
    pub fn decode(&self, ids: &[SymbolId]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Decode symbol IDs back to text, failing on invalid UTF-8.
    pub fn decode_strict(&self, ids: &[SymbolId]) -> Result<String> {
        Ok(String::from_utf8(self.decode_bytes(ids)?)?)
    }

    /// Snapshot of every listed symbol and its expansion, sorted by ID.
    pub fn vocabulary(&self) -> Result<Vec<VocabEntry>> {
        Ok(self
            .vocab()?
            .entries()
            .into_iter()
            .map(|(id, bytes)| VocabEntry {
                id,
                bytes: bytes.to_vec(),
            })
            .collect())
    }

    /// Get the vocabulary, building it from the rules on first use.
    pub fn vocab(&self) -> Result<&Vocabulary> {
        if let Some(vocab) = self.vocab.get() {
            return Ok(vocab);
        }

        let built = VocabularyBuilder::for_mode(self.config.encoding_mode, &self.alphabet)
            .build(&self.rules)?;
        debug!(entries = built.len(), "vocabulary rebuilt from merge rules");

        Ok(self.vocab.get_or_init(|| built))
    }

    /// Check whether the vocabulary has already been materialized.
    pub fn has_vocab_cache(&self) -> bool {
        self.vocab.get().is_some()
    }

    /// Number of base units: 256 bytes, or the training alphabet.
    pub fn base_size(&self) -> usize {
        match self.config.encoding_mode {
            EncodingMode::ByteLevel => EncodingMode::ByteLevel.merge_base() as usize,
            EncodingMode::CharLevel => self.alphabet.len(),
        }
    }

    /// Get the vocabulary size: base units plus learned merges.
    pub fn vocab_size(&self) -> usize {
        self.base_size() + self.rules.len()
    }

    /// Get the number of learned merges.
    pub fn num_merges(&self) -> usize {
        self.rules.len()
    }

    /// Get the learned merge rules.
    pub fn rules(&self) -> &MergeRules {
        &self.rules
    }

    /// Get the training alphabet (empty at byte level).
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn encoding_mode(&self) -> EncodingMode {
        self.config.encoding_mode
    }

    /// Save the tokenizer to a JSON file, including the vocabulary cache.
    ///
    /// # Arguments
    /// * `path` - File path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        use crate::io::save::TokenizerSaver;

        TokenizerSaver::new(self).save(path)
    }

    /// Load a tokenizer from a JSON file.
    ///
    /// # Arguments
    /// * `path` - File path to load from
    pub fn load(path: &Path) -> Result<Self> {
        use crate::io::load::TokenizerLoader;

        TokenizerLoader::load(path)
    }

    /// Serialize the tokenizer to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        use crate::io::save::TokenizerSaver;

        TokenizerSaver::new(self).to_json()
    }

    /// Deserialize a tokenizer from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        use crate::io::load::TokenizerLoader;

        TokenizerLoader::from_json(json)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl std::str::FromStr for Tokenizer {
    type Err = TokenizerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Symbol IDs
    pub ids: Vec<SymbolId>,
    /// Original text
    pub text: String,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One vocabulary entry: a symbol ID and the bytes it expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub id: SymbolId,
    pub bytes: Vec<u8>,
}

impl VocabEntry {
    /// The expansion as text, with invalid UTF-8 replaced.
    pub fn display(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
