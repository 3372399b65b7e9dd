//! One-shot train, encode and decode over a single request.
//!
//! This is the library side of a request/response front end: a caller hands
//! over some text and a merge budget and gets back the encoded IDs, the
//! round-tripped text and the resulting vocabulary size.

use crate::tokenizer::Tokenizer;
use pairwise_core::{Result, SymbolId, TokenizerError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Merge budget used when a request does not name one.
pub const DEFAULT_MAX_MERGES: i64 = 10;

/// Incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpeRequest {
    /// Text to train on and encode; a missing field reads as empty
    #[serde(default)]
    pub text: String,
    /// Maximum number of merges, defaults to [`DEFAULT_MAX_MERGES`]
    #[serde(default, alias = "num_merges")]
    pub max_merges: Option<i64>,
}

impl BpeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_merges: None,
        }
    }

    pub fn with_max_merges(mut self, max_merges: i64) -> Self {
        self.max_merges = Some(max_merges);
        self
    }
}

/// Response to a [`BpeRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpeResponse {
    pub encoded_tokens: Vec<SymbolId>,
    pub decoded_text: String,
    pub vocab_size: usize,
    pub num_merges: usize,
}

/// Train a fresh byte-level tokenizer on the request text, then encode and
/// decode that same text.
pub fn process(request: &BpeRequest) -> Result<BpeResponse> {
    if request.text.is_empty() {
        return Err(TokenizerError::EmptyText);
    }

    let requested = request.max_merges.unwrap_or(DEFAULT_MAX_MERGES);
    let max_merges = usize::try_from(requested).map_err(|_| {
        TokenizerError::InvalidConfig(format!("max_merges must not be negative, got {requested}"))
    })?;

    let mut tokenizer = Tokenizer::default();
    let outcome = tokenizer.train(&request.text, max_merges)?;

    let encoding = tokenizer.encode(&request.text);
    let decoded_text = tokenizer.decode(&encoding.ids)?;
    debug!(
        tokens = encoding.len(),
        merges = outcome.num_merges(),
        "processed request"
    );

    Ok(BpeResponse {
        encoded_tokens: encoding.ids,
        decoded_text,
        vocab_size: tokenizer.vocab_size(),
        num_merges: outcome.num_merges(),
    })
}
