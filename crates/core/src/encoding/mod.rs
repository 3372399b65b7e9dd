//! Base-unit granularities for BPE tokenization.
//!
//! This module provides the two ways raw text is turned into base symbols:
//! - Byte-level: every UTF-8 byte is a symbol, merges start at 256
//! - Character-level: every Unicode scalar value is a symbol keyed by its code
//!   point, merges start just past the code point range
//!
//! Both share one integer ID space, and every expansion is stored as bytes.

pub mod byte_level;
pub mod char_level;
pub mod encoder;

pub use byte_level::ByteLevel;
pub use char_level::CharLevel;
pub use encoder::Encoder;

use crate::core::{SymbolId, SymbolStream};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding mode for the tokenizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingMode {
    /// UTF-8 bytes as base units
    #[default]
    ByteLevel,
    /// Unicode characters as base units
    CharLevel,
}

impl EncodingMode {
    /// The ID assigned to the first learned merge.
    #[inline]
    pub fn merge_base(self) -> SymbolId {
        match self {
            Self::ByteLevel => ByteLevel::MERGE_BASE,
            Self::CharLevel => CharLevel::MERGE_BASE,
        }
    }

    /// Split text into its base-unit symbol sequence.
    pub fn seed(self, text: &str) -> SymbolStream {
        match self {
            Self::ByteLevel => ByteLevel::seed(text),
            Self::CharLevel => CharLevel::seed(text),
        }
    }

    /// Expansion of a base symbol, or `None` if `id` is not a valid base unit.
    pub fn base_expansion(self, id: SymbolId) -> Option<Vec<u8>> {
        match self {
            Self::ByteLevel => ByteLevel::expand(id),
            Self::CharLevel => CharLevel::expand(id),
        }
    }

    /// Check whether `id` lies in the base range (below the merge base).
    #[inline]
    pub fn is_base(self, id: SymbolId) -> bool {
        id < self.merge_base()
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteLevel => write!(f, "ByteLevel"),
            Self::CharLevel => write!(f, "CharLevel"),
        }
    }
}

impl FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ByteLevel" | "byte" | "bytes" => Ok(Self::ByteLevel),
            "CharLevel" | "char" | "chars" => Ok(Self::CharLevel),
            _ => Err(format!(
                "invalid encoding mode: {s:?} (expected \"byte\" or \"char\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_bases() {
        assert_eq!(EncodingMode::ByteLevel.merge_base(), 256);
        assert_eq!(EncodingMode::CharLevel.merge_base(), 0x11_0000);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("byte".parse(), Ok(EncodingMode::ByteLevel));
        assert_eq!("CharLevel".parse(), Ok(EncodingMode::CharLevel));
        assert!("words".parse::<EncodingMode>().is_err());
    }
}
