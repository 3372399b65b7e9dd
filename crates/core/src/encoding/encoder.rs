//! Applying learned merge rules to fresh text.
//!
//! Rules are replayed in the order they were learned: on every pass the
//! eligible pair with the smallest merge ID is rewritten across the whole
//! sequence. Later merges may be built from earlier ones, so replaying in
//! ID order is what makes them reachable.

use super::EncodingMode;
use crate::core::{MergeRules, Pair, SymbolId, SymbolStream};
use tracing::trace;

/// Encoder over a borrowed rule table.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    rules: &'a MergeRules,
    mode: EncodingMode,
}

impl<'a> Encoder<'a> {
    /// Create an encoder. `mode` must match the granularity used at training time.
    pub fn new(rules: &'a MergeRules, mode: EncodingMode) -> Self {
        Self { rules, mode }
    }

    /// Encode text into symbol IDs.
    ///
    /// Never fails: text with no applicable merges comes back as its base-unit
    /// sequence, and empty text as an empty stream.
    pub fn encode(&self, text: &str) -> SymbolStream {
        self.apply(self.mode.seed(text))
    }

    /// Apply merges to an already seeded stream until none is eligible.
    pub fn apply(&self, mut stream: SymbolStream) -> SymbolStream {
        if self.rules.is_empty() {
            return stream;
        }

        while let Some((pair, id)) = self.next_merge(&stream) {
            let replaced = stream.merge(pair, id);
            trace!(left = pair.0, right = pair.1, id, replaced, "applied merge");
        }

        stream
    }

    /// The eligible pair with the smallest merge ID.
    fn next_merge(&self, stream: &SymbolStream) -> Option<(Pair, SymbolId)> {
        stream
            .pair_stats()
            .iter()
            .filter_map(|(pair, _)| self.rules.get(pair).map(|id| (pair, id)))
            .min_by_key(|&(_, id)| id)
    }
}
