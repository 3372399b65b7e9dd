//! Load functionality for saved tokenizers.
//!
//! Everything read from disk is validated before a [`Tokenizer`] is built:
//! merge IDs must be sequential, constituents must already exist, pairs must
//! be unique and a saved vocabulary must match what the rules expand to.

use super::format::{SerializedTokenizer, SerializedVocabEntry};
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use ahash::AHashSet;
use pairwise_core::{
    EncodingMode, MergeRules, Result, SymbolId, TokenizerError, Vocabulary, VocabularyBuilder,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Tokenizer loader - handles loading trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a tokenizer from a JSON file.
    ///
    /// # Arguments
    /// * `path` - File path to load from
    pub fn load(path: &Path) -> Result<Tokenizer> {
        let file = File::open(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let tokenizer = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            merges = tokenizer.num_merges(),
            "loaded tokenizer"
        );

        Ok(tokenizer)
    }

    /// Load a tokenizer from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Tokenizer> {
        let serialized: SerializedTokenizer = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize tokenizer: {}", e)))?;

        Self::deserialize(serialized)
    }

    /// Load a tokenizer from a JSON string.
    pub fn from_json(json: &str) -> Result<Tokenizer> {
        let serialized: SerializedTokenizer = serde_json::from_str(json)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize tokenizer: {}", e)))?;

        Self::deserialize(serialized)
    }

    /// Deserialize from a serialized structure.
    pub fn deserialize(data: SerializedTokenizer) -> Result<Tokenizer> {
        if data.version.split('.').next() != Some("1") {
            return Err(TokenizerError::Load(format!(
                "Unsupported format version: {}",
                data.version
            )));
        }

        let mode = data.config.encoding_mode;
        if data.config.max_vocab_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "max_vocab_size must be at least 1".to_string(),
            ));
        }

        let base = Self::base_symbols(mode, &data.alphabet)?;
        let rules = MergeRules::from_rules(mode.merge_base(), data.merges)?;

        for rule in &rules {
            for part in [rule.left, rule.right] {
                if mode.is_base(part) && !base.contains(&part) {
                    return Err(TokenizerError::InvalidMerge(format!(
                        "rule ({}, {}) -> {} uses unknown base symbol {}",
                        rule.left, rule.right, rule.id, part
                    )));
                }
            }
        }

        let vocab = match data.vocab {
            Some(entries) => Some(Self::cached_vocab(mode, &data.alphabet, &rules, entries)?),
            None => None,
        };
        debug!(
            mode = %mode,
            merges = rules.len(),
            vocab_cache = vocab.is_some(),
            "validated serialized tokenizer"
        );

        let config = TokenizerConfig {
            encoding_mode: mode,
            max_vocab_size: data.config.max_vocab_size,
        };

        Ok(Tokenizer::from_parts(config, rules, data.alphabet, vocab))
    }

    /// The set of listed base symbols for `mode`.
    fn base_symbols(mode: EncodingMode, alphabet: &[char]) -> Result<AHashSet<SymbolId>> {
        match mode {
            EncodingMode::ByteLevel => {
                if !alphabet.is_empty() {
                    return Err(TokenizerError::Load(
                        "byte-level tokenizer must not carry an alphabet".to_string(),
                    ));
                }
                Ok((0..mode.merge_base()).collect())
            }
            EncodingMode::CharLevel => {
                let mut base = AHashSet::with_capacity(alphabet.len());
                for &ch in alphabet {
                    if !base.insert(SymbolId::from(ch)) {
                        return Err(TokenizerError::Load(format!(
                            "duplicate alphabet character {:?}",
                            ch
                        )));
                    }
                }
                Ok(base)
            }
        }
    }

    /// Check a saved vocabulary against the one the rules produce.
    ///
    /// Every defined symbol must be listed exactly once with exactly the bytes
    /// its rule expands to.
    fn cached_vocab(
        mode: EncodingMode,
        alphabet: &[char],
        rules: &MergeRules,
        entries: Vec<SerializedVocabEntry>,
    ) -> Result<Vocabulary> {
        let expected = VocabularyBuilder::for_mode(mode, alphabet).build(rules)?;
        let mut seen = AHashSet::with_capacity(entries.len());

        for entry in &entries {
            match expected.get(entry.id) {
                None => {
                    return Err(TokenizerError::Load(format!(
                        "vocabulary lists unknown symbol {}",
                        entry.id
                    )))
                }
                Some(bytes) if bytes != entry.bytes.as_slice() => {
                    return Err(TokenizerError::Load(format!(
                        "vocabulary entry for symbol {} does not match its merge rule",
                        entry.id
                    )))
                }
                Some(_) => {}
            }
            if !seen.insert(entry.id) {
                return Err(TokenizerError::Load(format!(
                    "vocabulary lists symbol {} twice",
                    entry.id
                )));
            }
        }

        if seen.len() != expected.len() {
            return Err(TokenizerError::Load(format!(
                "vocabulary has {} entries but {} symbols are defined",
                seen.len(),
                expected.len()
            )));
        }

        Ok(expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::TokenizerSaver;

    fn trained() -> Tokenizer {
        let mut tokenizer = Tokenizer::default();
        tokenizer.train("aaabdaaabac", 3).unwrap();
        tokenizer
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");

        let tokenizer = trained();
        tokenizer.save(&path).unwrap();

        let loaded = TokenizerLoader::load(&path).unwrap();
        assert!(loaded.has_vocab_cache());
        assert_eq!(loaded.rules().as_slice(), tokenizer.rules().as_slice());
        assert_eq!(loaded.vocab_size(), 259);
        assert_eq!(loaded.encode("aaabdaaabac").ids, vec![258, 100, 258, 97, 99]);
        assert_eq!(loaded.decode(&[258]).unwrap(), "aaab");
    }

    #[test]
    fn test_load_without_vocab_rebuilds() {
        let json = TokenizerSaver::new(&trained())
            .with_vocab_cache(false)
            .to_json()
            .unwrap();

        let loaded = TokenizerLoader::from_json(&json).unwrap();
        assert!(!loaded.has_vocab_cache());
        assert_eq!(loaded.decode(&[257, 98]).unwrap(), "aaab");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TokenizerLoader::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(TokenizerError::Io { .. })));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            TokenizerLoader::from_json("{ not json"),
            Err(TokenizerError::Load(_))
        ));
    }

    #[test]
    fn test_rejects_bad_rules() {
        let mut data = TokenizerSaver::new(&trained()).serialize().unwrap();
        data.merges[2].id = 300;
        assert!(matches!(
            TokenizerLoader::deserialize(data),
            Err(TokenizerError::InvalidMerge(_))
        ));

        let mut data = TokenizerSaver::new(&trained()).serialize().unwrap();
        data.merges[0].left = 258;
        assert!(matches!(
            TokenizerLoader::deserialize(data),
            Err(TokenizerError::InvalidMerge(_))
        ));
    }

    #[test]
    fn test_rejects_incomplete_vocab() {
        let mut data = TokenizerSaver::new(&trained()).serialize().unwrap();
        if let Some(vocab) = data.vocab.as_mut() {
            vocab.pop();
        }

        assert!(matches!(
            TokenizerLoader::deserialize(data),
            Err(TokenizerError::Load(_))
        ));
    }

    #[test]
    fn test_rejects_stale_vocab_bytes() {
        let mut data = TokenizerSaver::new(&trained()).serialize().unwrap();
        if let Some(entry) = data
            .vocab
            .as_mut()
            .and_then(|vocab| vocab.iter_mut().find(|entry| entry.id == 258))
        {
            entry.bytes = b"zzzz".to_vec();
        }

        assert!(matches!(
            TokenizerLoader::deserialize(data),
            Err(TokenizerError::Load(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_base_bytes() {
        let mut data = TokenizerSaver::new(&trained()).serialize().unwrap();
        if let Some(vocab) = data.vocab.as_mut() {
            vocab[97].bytes = b"b".to_vec();
        }

        assert!(matches!(
            TokenizerLoader::deserialize(data),
            Err(TokenizerError::Load(_))
        ));
    }

    #[test]
    fn test_char_level_base_checked() {
        let mut tokenizer = Tokenizer::builder()
            .encoding_mode(EncodingMode::CharLevel)
            .build()
            .unwrap();
        tokenizer.train("abab", 1).unwrap();

        let mut data = TokenizerSaver::new(&tokenizer).serialize().unwrap();
        data.alphabet = vec!['a'];
        data.vocab = None;

        assert!(matches!(
            TokenizerLoader::deserialize(data),
            Err(TokenizerError::InvalidMerge(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut data = TokenizerSaver::new(&trained()).serialize().unwrap();
        data.version = "2.0".to_string();

        assert!(TokenizerLoader::deserialize(data).is_err());
    }
}
