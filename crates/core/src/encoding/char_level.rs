//! Character-level base units.
//!
//! Each Unicode scalar value is one base symbol whose ID is its code point.
//! Merge IDs start just above `char::MAX`, so base and merge IDs never
//! collide and a character unseen at training time still has an ID.

use crate::core::{SymbolId, SymbolStream};
use ahash::AHashSet;

/// Character-level unit granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharLevel;

impl CharLevel {
    /// One past the largest Unicode code point.
    pub const MERGE_BASE: SymbolId = char::MAX as SymbolId + 1;

    /// One symbol per character.
    pub fn seed(text: &str) -> SymbolStream {
        text.chars().map(SymbolId::from).collect()
    }

    /// A base character expands to its UTF-8 encoding.
    ///
    /// Surrogate code points are not characters and have no expansion.
    pub fn expand(id: SymbolId) -> Option<Vec<u8>> {
        char::from_u32(id).map(|ch| ch.to_string().into_bytes())
    }

    /// Distinct characters of `text`, in order of first occurrence.
    pub fn alphabet(text: &str) -> Vec<char> {
        let mut seen = AHashSet::new();
        text.chars().filter(|&ch| seen.insert(ch)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_uses_code_points() {
        let stream = CharLevel::seed("कि a");
        assert_eq!(stream.as_slice(), &[0x0915, 0x093F, 0x20, 0x61]);
    }

    #[test]
    fn test_expand() {
        assert_eq!(CharLevel::expand(0x0915), Some("क".as_bytes().to_vec()));
        assert_eq!(CharLevel::expand(0xD800), None);
        assert_eq!(CharLevel::expand(CharLevel::MERGE_BASE), None);
    }

    #[test]
    fn test_alphabet_first_occurrence() {
        assert_eq!(CharLevel::alphabet("banana"), vec!['b', 'a', 'n']);
        assert!(CharLevel::alphabet("").is_empty());
    }
}
