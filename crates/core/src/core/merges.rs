//! Merge rule management for BPE.
//!
//! Merge rules are stored in creation order together with a pair -> ID index.
//! The table is append-only: every new rule receives the next sequential ID,
//! so a rule's ID is strictly greater than any ID that existed when it was
//! learned and ID order equals training order.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Integer identifier for a base unit or a learned merge result.
pub type SymbolId = u32;

/// A pair of adjacent symbol IDs.
pub type Pair = (SymbolId, SymbolId);

/// A single learned rule: `(left, right) -> id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRule {
    pub left: SymbolId,
    pub right: SymbolId,
    pub id: SymbolId,
}

impl MergeRule {
    #[inline]
    pub fn pair(&self) -> Pair {
        (self.left, self.right)
    }
}

/// Ordered collection of BPE merge rules with pair lookup.
#[derive(Debug, Clone)]
pub struct MergeRules {
    /// Rules in creation order; `rules[i].id == merge_base + i`
    rules: Vec<MergeRule>,
    /// Pair -> new symbol ID
    lookup: AHashMap<Pair, SymbolId>,
    /// ID assigned to the first merge
    merge_base: SymbolId,
}

impl MergeRules {
    /// Create an empty table whose first merge will receive `merge_base`.
    pub fn new(merge_base: SymbolId) -> Self {
        Self {
            rules: Vec::new(),
            lookup: AHashMap::new(),
            merge_base,
        }
    }

    /// Rebuild a table from rules in creation order, validating every invariant.
    ///
    /// IDs must be sequential from `merge_base`, constituents must precede the
    /// rule they build and pairs must be unique.
    pub fn from_rules(
        merge_base: SymbolId,
        rules: impl IntoIterator<Item = MergeRule>,
    ) -> Result<Self> {
        let mut table = Self::new(merge_base);

        for rule in rules {
            let expected = table.next_id();
            if rule.id != expected {
                return Err(TokenizerError::InvalidMerge(format!(
                    "rule ({}, {}) has id {} but the next id is {}",
                    rule.left, rule.right, rule.id, expected
                )));
            }
            if rule.left >= rule.id || rule.right >= rule.id {
                return Err(TokenizerError::InvalidMerge(format!(
                    "rule ({}, {}) -> {} references a symbol that does not exist yet",
                    rule.left, rule.right, rule.id
                )));
            }
            table.push(rule.pair())?;
        }

        Ok(table)
    }

    /// Append a rule for `pair` and return the ID assigned to it.
    pub fn push(&mut self, pair: Pair) -> Result<SymbolId> {
        if self.lookup.contains_key(&pair) {
            return Err(TokenizerError::InvalidMerge(format!(
                "duplicate rule for pair ({}, {})",
                pair.0, pair.1
            )));
        }

        let id = self.next_id();
        self.rules.push(MergeRule {
            left: pair.0,
            right: pair.1,
            id,
        });
        self.lookup.insert(pair, id);

        Ok(id)
    }

    /// Get the ID a pair merges into, if a rule exists.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<SymbolId> {
        self.lookup.get(&pair).copied()
    }

    /// Get the rule that created `id`, if `id` is a merge ID of this table.
    pub fn rule_for(&self, id: SymbolId) -> Option<&MergeRule> {
        let offset = id.checked_sub(self.merge_base)?;
        self.rules.get(offset as usize)
    }

    /// The ID the next learned rule will receive.
    #[inline]
    pub fn next_id(&self) -> SymbolId {
        self.merge_base + self.rules.len() as SymbolId
    }

    /// The ID assigned to the first merge.
    #[inline]
    pub fn merge_base(&self) -> SymbolId {
        self.merge_base
    }

    /// Iterate rules in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Rules in creation order.
    pub fn as_slice(&self) -> &[MergeRule] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut rules = MergeRules::new(256);

        assert_eq!(rules.push((97, 97)).unwrap(), 256);
        assert_eq!(rules.push((256, 97)).unwrap(), 257);
        assert_eq!(rules.next_id(), 258);
        assert_eq!(rules.get((97, 97)), Some(256));
        assert_eq!(rules.get((256, 97)), Some(257));
        assert_eq!(rules.get((97, 98)), None);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let mut rules = MergeRules::new(256);
        rules.push((1, 2)).unwrap();

        assert!(matches!(
            rules.push((1, 2)),
            Err(TokenizerError::InvalidMerge(_))
        ));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_rule_for() {
        let mut rules = MergeRules::new(256);
        rules.push((1, 2)).unwrap();
        rules.push((256, 3)).unwrap();

        assert_eq!(rules.rule_for(257).map(MergeRule::pair), Some((256, 3)));
        assert!(rules.rule_for(255).is_none());
        assert!(rules.rule_for(258).is_none());
    }

    #[test]
    fn test_from_rules_validates_order() {
        let good = vec![
            MergeRule { left: 97, right: 97, id: 256 },
            MergeRule { left: 256, right: 97, id: 257 },
        ];
        let rules = MergeRules::from_rules(256, good).unwrap();
        assert_eq!(rules.len(), 2);

        let gap = vec![MergeRule { left: 97, right: 97, id: 300 }];
        assert!(MergeRules::from_rules(256, gap).is_err());

        let forward_ref = vec![
            MergeRule { left: 257, right: 97, id: 256 },
            MergeRule { left: 97, right: 97, id: 257 },
        ];
        assert!(MergeRules::from_rules(256, forward_ref).is_err());

        let duplicate = vec![
            MergeRule { left: 1, right: 2, id: 256 },
            MergeRule { left: 1, right: 2, id: 257 },
        ];
        assert!(MergeRules::from_rules(256, duplicate).is_err());
    }
}
