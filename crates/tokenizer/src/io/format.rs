//! Format definitions for tokenizer serialization.
//!
//! A tokenizer is persisted as one JSON document: the configuration, the
//! character alphabet, the merge rules in creation order and, optionally, the
//! materialized vocabulary so it does not have to be rebuilt after loading.

use pairwise_core::{EncodingMode, MergeRule, SymbolId};
use serde::{Deserialize, Serialize};

/// Current format version.
pub const FORMAT_VERSION: &str = "1.0";

/// Complete tokenizer serialization format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTokenizer {
    /// Format version
    pub version: String,
    /// Configuration
    pub config: SerializedConfig,
    /// Characters seen at training time (empty at byte level)
    #[serde(default)]
    pub alphabet: Vec<char>,
    /// Merge rules in creation order
    pub merges: Vec<MergeRule>,
    /// Materialized vocabulary (ID -> bytes), if it was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocab: Option<Vec<SerializedVocabEntry>>,
}

/// Tokenizer configuration in serialized format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedConfig {
    pub encoding_mode: EncodingMode,
    pub max_vocab_size: usize,
}

/// One vocabulary entry in serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedVocabEntry {
    pub id: SymbolId,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_is_optional() {
        let json = r#"{
            "version": "1.0",
            "config": { "encoding_mode": "ByteLevel", "max_vocab_size": 300 },
            "merges": [ { "left": 97, "right": 97, "id": 256 } ]
        }"#;

        let data: SerializedTokenizer = serde_json::from_str(json).unwrap();
        assert_eq!(data.config.encoding_mode, EncodingMode::ByteLevel);
        assert!(data.alphabet.is_empty());
        assert_eq!(data.merges.len(), 1);
        assert!(data.vocab.is_none());

        let out = serde_json::to_string(&data).unwrap();
        assert!(!out.contains("\"vocab\""));
    }

    #[test]
    fn test_char_alphabet_field() {
        let data = SerializedTokenizer {
            version: FORMAT_VERSION.to_string(),
            config: SerializedConfig {
                encoding_mode: EncodingMode::CharLevel,
                max_vocab_size: 300,
            },
            alphabet: vec!['न', 'म'],
            merges: Vec::new(),
            vocab: Some(vec![SerializedVocabEntry {
                id: 'न' as SymbolId,
                bytes: "न".as_bytes().to_vec(),
            }]),
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"CharLevel\""));

        let back: SerializedTokenizer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
