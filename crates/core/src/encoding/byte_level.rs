//! Byte-level base units.
//!
//! Text is seen as its UTF-8 bytes; symbol IDs 0-255 are the byte values
//! themselves.

use crate::core::{SymbolId, SymbolStream};

/// Byte-level unit granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteLevel;

impl ByteLevel {
    /// Number of base symbols, and the ID of the first merge.
    pub const MERGE_BASE: SymbolId = 256;

    /// One symbol per UTF-8 byte.
    pub fn seed(text: &str) -> SymbolStream {
        text.bytes().map(SymbolId::from).collect()
    }

    /// A base byte expands to itself.
    pub fn expand(id: SymbolId) -> Option<Vec<u8>> {
        u8::try_from(id).ok().map(|byte| vec![byte])
    }
}
