//! # Lexicon Trait
//!
//! This is THE contract between the extractor and any dictionary source.
//! A lexicon is opened once, shared read-only by every worker, and closed once.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemoryLexicon` | `memory` | Immutable in-memory index, built programmatically |
//! | JSON snapshot | `snapshot` | Serialized `MemoryLexicon` |
//! | WordNet files | `wndb` | `index.*` / `data.*` dictionary directory |

pub mod memory;
pub mod snapshot;
pub mod wndb;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::Result;

pub use memory::{MemoryLexicon, MemoryLexiconBuilder};

// ============================================================================
// Lookup keys
// ============================================================================

/// WordNet lookup form of a word: trimmed, lower-cased, inner whitespace
/// collapsed to `_` (`"Hot  Dog"` → `"hot_dog"`).
pub fn lexicon_key(word: &str) -> String {
    let mut key = String::with_capacity(word.len());
    for (i, part) in word.split_whitespace().enumerate() {
        if i > 0 {
            key.push('_');
        }
        key.push_str(&part.to_lowercase());
    }
    key
}

// ============================================================================
// Lexicon configuration
// ============================================================================

/// Where to load a lexicon from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "path", rename_all = "snake_case")]
pub enum LexiconConfig {
    /// JSON snapshot produced by `MemoryLexicon::to_snapshot`.
    Snapshot(PathBuf),
    /// WordNet database directory (`index.noun`, `data.noun`, ...).
    Wndb(PathBuf),
}

/// Open a lexicon. Failure here is fatal for a run.
pub fn open_lexicon(config: &LexiconConfig) -> Result<MemoryLexicon> {
    let lexicon = match config {
        LexiconConfig::Snapshot(path) => snapshot::load_snapshot(path)?,
        LexiconConfig::Wndb(dir) => wndb::load_wndb(dir)?,
    };
    tracing::info!(
        senses = lexicon.sense_count(),
        words = lexicon.word_count(),
        "lexicon opened from {:?}",
        config,
    );
    Ok(lexicon)
}

// ============================================================================
// Lexicon Trait
// ============================================================================

/// Read-only lookup capability over a lexical database.
///
/// Implementations must be immutable for the lifetime of a run: concurrent
/// lookups from many workers happen without locking.
pub trait Lexicon: Send + Sync + 'static {
    /// Senses of `word` under one part of speech, in dictionary order.
    /// `None` when the word is not an entry for that part of speech.
    fn lookup(&self, word: &str, pos: PartOfSpeech) -> Result<Option<Vec<SenseId>>>;

    /// Resolve a sense by ID.
    fn sense(&self, id: SenseId) -> Result<Option<&Sense>>;

    /// Whether `word` is an entry under `pos`.
    fn contains(&self, word: &str, pos: PartOfSpeech) -> Result<bool> {
        Ok(self.lookup(word, pos)?.is_some())
    }

    /// Whether `word` is an entry under any part of speech.
    fn is_known(&self, word: &str) -> Result<bool> {
        for pos in PartOfSpeech::ALL {
            if self.contains(word, pos)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Release the underlying resources. Called once, when the last worker is done.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_key() {
        assert_eq!(lexicon_key("  Hot \t Dog "), "hot_dog");
        assert_eq!(lexicon_key("dog"), "dog");
        assert_eq!(lexicon_key("domestic_dog"), "domestic_dog");
        assert_eq!(lexicon_key("   "), "");
    }

    #[test]
    fn test_config_serde() {
        let config = LexiconConfig::Wndb(PathBuf::from("/app/wordnet_data"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"type":"wndb","path":"/app/wordnet_data"}"#);
        let back: LexiconConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
