//! Symbol sequences.
//!
//! A [`SymbolStream`] is text at some compression stage: an ordered list of
//! symbol IDs, base units first and merge results as training or encoding
//! rewrites it.

use super::merges::{Pair, SymbolId};
use super::stats::PairStats;

/// An owned sequence of symbol IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolStream {
    ids: Vec<SymbolId>,
}

impl SymbolStream {
    /// Create a stream from raw symbol IDs.
    pub fn new(ids: Vec<SymbolId>) -> Self {
        Self { ids }
    }

    /// Count adjacent pairs in the current sequence.
    pub fn pair_stats(&self) -> PairStats {
        PairStats::from_symbols(&self.ids)
    }

    /// Replace every occurrence of `pair` with `new_id` in one left-to-right pass.
    ///
    /// A matched pair consumes both positions, so a freshly created adjacency is
    /// never reconsidered within the same pass. Returns the number of
    /// replacements made.
    pub fn merge(&mut self, pair: Pair, new_id: SymbolId) -> usize {
        if self.ids.len() < 2 {
            return 0;
        }

        let mut merged = Vec::with_capacity(self.ids.len());
        let mut replaced = 0;
        let mut i = 0;

        while i < self.ids.len() {
            if i + 1 < self.ids.len() && self.ids[i] == pair.0 && self.ids[i + 1] == pair.1 {
                merged.push(new_id);
                replaced += 1;
                i += 2;
            } else {
                merged.push(self.ids[i]);
                i += 1;
            }
        }

        self.ids = merged;
        replaced
    }

    /// Get the symbol IDs as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[SymbolId] {
        &self.ids
    }

    /// Consume the stream and return its symbol IDs.
    pub fn into_ids(self) -> Vec<SymbolId> {
        self.ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<SymbolId>> for SymbolStream {
    fn from(ids: Vec<SymbolId>) -> Self {
        Self::new(ids)
    }
}

impl FromIterator<SymbolId> for SymbolStream {
    fn from_iter<I: IntoIterator<Item = SymbolId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
