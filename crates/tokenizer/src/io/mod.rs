//! Serialization and deserialization for trained tokenizers.
//!
//! Tokenizers are saved as a single JSON file holding the configuration, the
//! merge rules and (optionally) the materialized vocabulary.

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedConfig, SerializedTokenizer, SerializedVocabEntry, FORMAT_VERSION};
pub use load::TokenizerLoader;
pub use save::TokenizerSaver;
