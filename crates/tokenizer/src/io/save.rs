//! Save functionality for trained tokenizers.

use super::format::{
    SerializedConfig, SerializedTokenizer, SerializedVocabEntry, FORMAT_VERSION,
};
use crate::tokenizer::Tokenizer;
use pairwise_core::{Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Tokenizer saver - handles saving trained models.
pub struct TokenizerSaver<'a> {
    /// Tokenizer being saved
    tokenizer: &'a Tokenizer,
    /// Whether to write the materialized vocabulary
    include_vocab: bool,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver. The vocabulary cache is included by default.
    pub fn new(tokenizer: &'a Tokenizer) -> Self {
        Self {
            tokenizer,
            include_vocab: true,
        }
    }

    /// Choose whether to write the vocabulary cache alongside the rules.
    pub fn with_vocab_cache(mut self, include: bool) -> Self {
        self.include_vocab = include;
        self
    }

    /// Save the tokenizer to a single JSON file.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Arguments
    /// * `path` - File path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| TokenizerError::Io {
                path: parent.to_path_buf(),
                err,
            })?;
        }

        let serialized = self.serialize()?;
        let file = File::create(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &serialized)
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize tokenizer: {}", e)))?;
        writer.flush().map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        info!(
            path = %path.display(),
            merges = serialized.merges.len(),
            vocab_cache = serialized.vocab.is_some(),
            "saved tokenizer"
        );

        Ok(())
    }

    /// Serialize the tokenizer to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.serialize()?)?)
    }

    /// Serialize the tokenizer to a structure.
    pub fn serialize(&self) -> Result<SerializedTokenizer> {
        let tokenizer = self.tokenizer;

        let vocab = if self.include_vocab {
            let entries = tokenizer
                .vocabulary()?
                .into_iter()
                .map(|entry| SerializedVocabEntry {
                    id: entry.id,
                    bytes: entry.bytes,
                })
                .collect();
            Some(entries)
        } else {
            None
        };

        Ok(SerializedTokenizer {
            version: FORMAT_VERSION.to_string(),
            config: SerializedConfig {
                encoding_mode: tokenizer.encoding_mode(),
                max_vocab_size: tokenizer.config().max_vocab_size,
            },
            alphabet: tokenizer.alphabet().to_vec(),
            merges: tokenizer.rules().as_slice().to_vec(),
            vocab,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairwise_core::{EncodingMode, MergeRule};

    #[test]
    fn test_serialize() {
        let mut tokenizer = Tokenizer::default();
        tokenizer.train("aaabdaaabac", 3).unwrap();

        let serialized = TokenizerSaver::new(&tokenizer).serialize().unwrap();

        assert_eq!(serialized.version, FORMAT_VERSION);
        assert_eq!(serialized.config.encoding_mode, EncodingMode::ByteLevel);
        assert_eq!(serialized.merges[1], MergeRule { left: 256, right: 97, id: 257 });

        let vocab = serialized.vocab.unwrap();
        assert_eq!(vocab.len(), 259);
        assert_eq!(vocab[258].bytes, b"aaab");
    }

    #[test]
    fn test_serialize_without_vocab() {
        let mut tokenizer = Tokenizer::default();
        tokenizer.train("abab", 1).unwrap();

        let serialized = TokenizerSaver::new(&tokenizer)
            .with_vocab_cache(false)
            .serialize()
            .unwrap();

        assert!(serialized.vocab.is_none());
        assert_eq!(serialized.merges.len(), 1);
    }

    #[test]
    fn test_failed_serialize_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, "previous model").unwrap();

        // A rule over a surrogate cannot be expanded, so serializing fails
        let rules = pairwise_core::MergeRules::from_rules(
            EncodingMode::CharLevel.merge_base(),
            vec![MergeRule {
                left: 0xD800,
                right: 'a' as u32,
                id: EncodingMode::CharLevel.merge_base(),
            }],
        )
        .unwrap();
        let config = crate::tokenizer::TokenizerConfig {
            encoding_mode: EncodingMode::CharLevel,
            max_vocab_size: 300,
        };
        let broken = Tokenizer::from_parts(config, rules, vec!['a'], None);

        assert!(TokenizerSaver::new(&broken).save(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous model");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("tokenizer.json");

        TokenizerSaver::new(&Tokenizer::default()).save(&path).unwrap();
        assert!(path.exists());
    }
}
