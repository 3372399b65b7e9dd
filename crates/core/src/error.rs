//! Error types for the BPE tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// Running out of mergeable pairs and empty input are not errors: training and
/// encoding simply produce fewer merges or an empty sequence.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A symbol ID with no expansion and no base-unit fallback
    #[error("Unresolvable symbol ID: {0}")]
    UnresolvableSymbol(u32),

    /// Invalid configuration (vocabulary size, merge count, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A merge rule that breaks the rule table invariants
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Request text was absent or empty
    #[error("No text provided")]
    EmptyText,

    /// Decoded bytes are not valid UTF-8 (strict decoding only)
    #[error("Invalid UTF-8 in decoded bytes: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Error loading a persisted tokenizer
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a tokenizer
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
