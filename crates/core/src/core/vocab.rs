//! Vocabulary storage and reconstruction.
//!
//! A [`Vocabulary`] maps every symbol ID to the bytes it stands for. Base
//! symbols expand to one unit; a merge expands to the concatenation of its
//! left and right expansions. [`VocabularyBuilder`] resolves merges with a
//! memoized walk, so a rule can be expanded as soon as both of its
//! constituents are known regardless of the order it is reached in.

use super::merges::{MergeRules, SymbolId};
use crate::encoding::EncodingMode;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// Reverse mapping: ID -> expansion bytes
pub type VocabR = AHashMap<SymbolId, Box<[u8]>>;

/// Materialized ID -> bytes map used for decoding.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Listed entries: the base alphabet plus every merge
    entries: VocabR,
    /// Granularity, for base units that are valid but not listed
    mode: EncodingMode,
}

impl Vocabulary {
    /// Create a vocabulary from precomputed entries.
    pub fn from_entries(
        mode: EncodingMode,
        entries: impl IntoIterator<Item = (SymbolId, Vec<u8>)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, bytes)| (id, bytes.into_boxed_slice()))
                .collect(),
            mode,
        }
    }

    /// Get the listed expansion for an ID.
    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&[u8]> {
        self.entries.get(&id).map(|bytes| &bytes[..])
    }

    /// Check whether an ID is listed.
    #[inline]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Append the expansion of every ID to `out`, in order.
    ///
    /// Base units that were never listed (a character unseen at training time)
    /// fall back to their own encoding. Anything else is unresolvable.
    pub fn decode_into(&self, ids: &[SymbolId], out: &mut Vec<u8>) -> Result<()> {
        for &id in ids {
            match self.entries.get(&id) {
                Some(bytes) => out.extend_from_slice(bytes),
                None => {
                    let bytes = self
                        .base_fallback(id)
                        .ok_or(TokenizerError::UnresolvableSymbol(id))?;
                    out.extend_from_slice(&bytes);
                }
            }
        }

        Ok(())
    }

    /// Expand IDs into a fresh byte buffer.
    pub fn decode(&self, ids: &[SymbolId]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(ids.len() * 2);
        self.decode_into(ids, &mut out)?;
        Ok(out)
    }

    fn base_fallback(&self, id: SymbolId) -> Option<Vec<u8>> {
        if self.mode.is_base(id) {
            self.mode.base_expansion(id)
        } else {
            None
        }
    }

    /// All listed entries sorted by ID.
    pub fn entries(&self) -> Vec<(SymbolId, &[u8])> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(&id, bytes)| (id, &bytes[..]))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }

    #[inline]
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Number of listed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`Vocabulary`] from a rule table and the listed base units.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    mode: EncodingMode,
    base: Vec<SymbolId>,
}

impl VocabularyBuilder {
    /// Builder listing every byte 0-255 as base entries.
    pub fn byte_level() -> Self {
        Self {
            mode: EncodingMode::ByteLevel,
            base: (0..EncodingMode::ByteLevel.merge_base()).collect(),
        }
    }

    /// Builder listing the given characters as base entries.
    pub fn char_level(alphabet: &[char]) -> Self {
        Self {
            mode: EncodingMode::CharLevel,
            base: alphabet.iter().map(|&ch| SymbolId::from(ch)).collect(),
        }
    }

    /// Builder for `mode`; `alphabet` is only used at character level.
    pub fn for_mode(mode: EncodingMode, alphabet: &[char]) -> Self {
        match mode {
            EncodingMode::ByteLevel => Self::byte_level(),
            EncodingMode::CharLevel => Self::char_level(alphabet),
        }
    }

    /// Expand every base entry and every merge in `rules`.
    pub fn build(&self, rules: &MergeRules) -> Result<Vocabulary> {
        let mut resolver = Resolver {
            mode: self.mode,
            rules,
            memo: VocabR::with_capacity(self.base.len() + rules.len()),
        };

        for &id in &self.base {
            resolver.resolve(id)?;
        }
        for rule in rules {
            resolver.resolve(rule.id)?;
        }

        Ok(Vocabulary {
            entries: resolver.memo,
            mode: self.mode,
        })
    }
}

/// Memoized expansion of symbol IDs against a rule table.
struct Resolver<'a> {
    mode: EncodingMode,
    rules: &'a MergeRules,
    memo: VocabR,
}

impl Resolver<'_> {
    /// Make sure `id` has an entry in the memo.
    ///
    /// Walks an explicit stack instead of recursing, so long merge chains do
    /// not grow the call stack.
    fn resolve(&mut self, id: SymbolId) -> Result<()> {
        let mut pending = vec![id];

        while let Some(&top) = pending.last() {
            if self.memo.contains_key(&top) {
                pending.pop();
                continue;
            }

            if self.mode.is_base(top) {
                let bytes = self
                    .mode
                    .base_expansion(top)
                    .ok_or(TokenizerError::UnresolvableSymbol(top))?;
                self.memo.insert(top, bytes.into_boxed_slice());
                pending.pop();
                continue;
            }

            let rule = *self.rules.rule_for(top).ok_or_else(|| {
                TokenizerError::InvalidMerge(format!("no rule creates symbol {top}"))
            })?;
            if rule.left >= top || rule.right >= top {
                return Err(TokenizerError::InvalidMerge(format!(
                    "rule ({}, {}) -> {} references a later symbol",
                    rule.left, rule.right, top
                )));
            }

            let joined = match (self.memo.get(&rule.left), self.memo.get(&rule.right)) {
                (Some(left), Some(right)) => Some([&left[..], &right[..]].concat()),
                (left, right) => {
                    if right.is_none() {
                        pending.push(rule.right);
                    }
                    if left.is_none() {
                        pending.push(rule.left);
                    }
                    None
                }
            };

            if let Some(bytes) = joined {
                self.memo.insert(top, bytes.into_boxed_slice());
                pending.pop();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merges::MergeRule;

    fn abc_rules() -> MergeRules {
        let mut rules = MergeRules::new(256);
        rules.push((97, 97)).unwrap();
        rules.push((256, 97)).unwrap();
        rules.push((257, 98)).unwrap();
        rules
    }

    #[test]
    fn test_byte_level_build() {
        let vocab = VocabularyBuilder::byte_level().build(&abc_rules()).unwrap();

        assert_eq!(vocab.len(), 259);
        assert_eq!(vocab.get(97), Some(&b"a"[..]));
        assert_eq!(vocab.get(256), Some(&b"aa"[..]));
        assert_eq!(vocab.get(257), Some(&b"aaa"[..]));
        assert_eq!(vocab.get(258), Some(&b"aaab"[..]));
        assert_eq!(vocab.get(259), None);
    }

    #[test]
    fn test_decode_unknown_id() {
        let vocab = VocabularyBuilder::byte_level().build(&abc_rules()).unwrap();

        assert_eq!(vocab.decode(&[258, 100]).unwrap(), b"aaabd");
        assert!(matches!(
            vocab.decode(&[97, 259]),
            Err(TokenizerError::UnresolvableSymbol(259))
        ));
        assert!(vocab.decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_char_level_build_and_fallback() {
        let mode = EncodingMode::CharLevel;
        let ka = 'क' as SymbolId;
        let i = 'ि' as SymbolId;
        let mut rules = MergeRules::new(mode.merge_base());
        let kai = rules.push((ka, i)).unwrap();
        let kaika = rules.push((kai, ka)).unwrap();

        let vocab = VocabularyBuilder::char_level(&['क', 'ि']).build(&rules).unwrap();

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.get(kaika), Some("किक".as_bytes()));

        // 'x' was not in the alphabet but is still a valid base unit
        let text = vocab.decode(&[kai, 'x' as SymbolId]).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "किx");

        // surrogates and unassigned merge IDs are unresolvable
        assert!(vocab.decode(&[0xD800]).is_err());
        assert!(vocab.decode(&[kaika + 1]).is_err());
    }

    #[test]
    fn test_resolves_out_of_order() {
        // Reaching 258 first forces 257 and 256 to be expanded on the way
        let rules = abc_rules();
        let mut resolver = Resolver {
            mode: EncodingMode::ByteLevel,
            rules: &rules,
            memo: VocabR::new(),
        };

        resolver.resolve(258).unwrap();
        assert_eq!(resolver.memo.get(&258).map(|b| &b[..]), Some(&b"aaab"[..]));
        assert!(resolver.memo.contains_key(&256));
        assert!(resolver.memo.contains_key(&257));
    }

    #[test]
    fn test_entries_sorted() {
        let rules = MergeRules::from_rules(
            EncodingMode::CharLevel.merge_base(),
            vec![MergeRule {
                left: 'b' as SymbolId,
                right: 'a' as SymbolId,
                id: EncodingMode::CharLevel.merge_base(),
            }],
        )
        .unwrap();
        let vocab = VocabularyBuilder::char_level(&['b', 'a']).build(&rules).unwrap();
        let ids: Vec<SymbolId> = vocab.entries().iter().map(|&(id, _)| id).collect();

        assert_eq!(ids, vec![97, 98, EncodingMode::CharLevel.merge_base()]);
    }
}
