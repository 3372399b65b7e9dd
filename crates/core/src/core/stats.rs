//! Adjacent pair frequency counting.
//!
//! [`PairStats`] is computed fresh for every pass over a sequence. It keeps
//! pairs in order of first occurrence, which is what makes the training
//! tie-break reproducible: among pairs with the same count, the one seen
//! earliest in the sequence wins.

use super::merges::{Pair, SymbolId};
use ahash::AHashMap;

/// Pair -> count, with first-occurrence order preserved.
#[derive(Debug, Clone, Default)]
pub struct PairStats {
    /// Pairs and their counts, in order of first occurrence
    counts: Vec<(Pair, u64)>,
    /// Pair -> index into `counts`
    index: AHashMap<Pair, usize>,
}

impl PairStats {
    /// Count every adjacent pair `(ids[i], ids[i + 1])`.
    ///
    /// Overlapping pairs are counted independently, so `[a, a, a]` yields
    /// `(a, a)` twice. Sequences shorter than two yield no pairs.
    pub fn from_symbols(ids: &[SymbolId]) -> Self {
        let mut stats = Self {
            counts: Vec::new(),
            index: AHashMap::with_capacity(ids.len().saturating_sub(1)),
        };

        for window in ids.windows(2) {
            stats.observe((window[0], window[1]));
        }

        stats
    }

    fn observe(&mut self, pair: Pair) {
        match self.index.get(&pair) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(pair, self.counts.len());
                self.counts.push((pair, 1));
            }
        }
    }

    /// Get the count for a pair.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<u64> {
        self.index.get(&pair).map(|&slot| self.counts[slot].1)
    }

    #[inline]
    pub fn contains(&self, pair: Pair) -> bool {
        self.index.contains_key(&pair)
    }

    /// The pair with the highest count; ties go to the earliest first occurrence.
    pub fn most_frequent(&self) -> Option<(Pair, u64)> {
        let mut best: Option<(Pair, u64)> = None;

        for &(pair, count) in &self.counts {
            // Strictly greater keeps the earlier pair on ties
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((pair, count));
            }
        }

        best
    }

    /// Iterate pairs and counts in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, u64)> + '_ {
        self.counts.iter().copied()
    }

    /// Number of distinct pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total pair observations (`n - 1` for a sequence of length `n >= 1`).
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&(_, count)| count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_overlapping_pairs() {
        let stats = PairStats::from_symbols(&[1, 1, 1, 2]);

        assert_eq!(stats.get((1, 1)), Some(2));
        assert_eq!(stats.get((1, 2)), Some(1));
        assert_eq!(stats.get((2, 1)), None);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_short_sequences_are_empty() {
        assert!(PairStats::from_symbols(&[]).is_empty());
        assert!(PairStats::from_symbols(&[7]).is_empty());
        assert_eq!(PairStats::from_symbols(&[7]).most_frequent(), None);
    }

    #[test]
    fn test_first_occurrence_order() {
        let stats = PairStats::from_symbols(&[3, 4, 1, 2, 3, 4]);
        let pairs: Vec<Pair> = stats.iter().map(|(pair, _)| pair).collect();

        assert_eq!(pairs, vec![(3, 4), (4, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_most_frequent_tie_break() {
        // (5, 6) and (1, 2) both occur twice; (5, 6) is seen first
        let stats = PairStats::from_symbols(&[5, 6, 0, 1, 2, 9, 5, 6, 8, 1, 2]);

        assert_eq!(stats.most_frequent(), Some(((5, 6), 2)));
    }

    #[test]
    fn test_most_frequent_prefers_higher_count() {
        let stats = PairStats::from_symbols(&[1, 2, 3, 3, 3, 3]);

        assert_eq!(stats.most_frequent(), Some(((3, 3), 3)));
    }
}
