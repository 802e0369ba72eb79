//! # wordnet-linker: Headword Relation Graph Extraction
//!
//! Builds a directed relation graph between the headwords of a WordNet-style
//! lexicon. Every headword gets one record listing its outgoing links:
//!
//! - **explicit** links: semantic pointers between senses (HYPERNYM, MERONYM, ...)
//! - **implicit** links: other known headwords mentioned in a sense's gloss
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Lexicon` is the contract between the extractor and the dictionary
//! 2. **Clean DTOs**: `Headword`, `RelationEdge`, `Record` cross all boundaries
//! 3. **Extraction is a pure function**: headword in, ordered edges out
//! 4. **Aggregation is a pure fold**: counters are a port, not a global
//!
//! ## Quick Start
//!
//! ```rust
//! use wordnet_linker::{Linker, MemoryLexicon, PartOfSpeech, PointerKind};
//!
//! # fn example() -> wordnet_linker::Result<()> {
//! let mut builder = MemoryLexicon::builder();
//! let dog = builder.add_sense(PartOfSpeech::Noun, ["dog"], "a domesticated carnivorous mammal");
//! let canine = builder.add_sense(PartOfSpeech::Noun, ["canine"], "a mammal with teeth");
//! builder.add_sense(PartOfSpeech::Noun, ["mammal"], "a warm-blooded animal");
//! builder.add_pointer(dog, PointerKind::Hypernym, canine);
//!
//! let linker = Linker::with_lexicon(builder.build());
//! let record = linker.link("Dog")?.expect("dog has links");
//! assert_eq!(record.to_string(), "dog\tmammal|GLOSS_MENTION,canine|HYPERNYM");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Lexicon Sources
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | Builder | `lexicon::memory` | Programmatic, for testing/embedding |
//! | Snapshot | `lexicon::snapshot` | JSON dump of a `MemoryLexicon` |
//! | WNDB | `lexicon::wndb` | WordNet `index.*` / `data.*` dictionary files |

use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod lexicon;
pub mod extract;
pub mod aggregate;
pub mod pipeline;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    PartOfSpeech, Headword, Sense, SenseId, Pointer, PointerKind,
    RelationKind, RelationEdge, Link, Record,
};

// ============================================================================
// Re-exports: Lexicon
// ============================================================================

pub use lexicon::{Lexicon, LexiconConfig, MemoryLexicon, open_lexicon};

// ============================================================================
// Re-exports: Core operations
// ============================================================================

pub use extract::{extract, tokenize_gloss};
pub use aggregate::{aggregate, Counters, MemoryCounters, NoopCounters};
pub use pipeline::{Pipeline, PipelineConfig, JobSummary, ShuffleOrder, OutputFormat};

// ============================================================================
// Top-level Linker handle
// ============================================================================

/// The primary entry point. A `Linker` wraps a shared, read-only lexicon and
/// runs extraction and aggregation against it.
pub struct Linker<L: Lexicon> {
    lexicon: Arc<L>,
}

impl<L: Lexicon> Linker<L> {
    /// Create a Linker over the given lexicon.
    pub fn with_lexicon(lexicon: L) -> Self {
        Self { lexicon: Arc::new(lexicon) }
    }

    /// Create a Linker over an already shared lexicon.
    pub fn with_shared(lexicon: Arc<L>) -> Self {
        Self { lexicon }
    }

    /// All relation edges of one headword, in extraction order.
    pub fn extract(&self, headword: &str) -> Result<Vec<RelationEdge>> {
        extract::extract(self.lexicon.as_ref(), headword)
    }

    /// Extract and aggregate a single headword without a shuffle stage.
    pub fn link(&self, headword: &str) -> Result<Option<Record>> {
        let Some(key) = Headword::normalize(headword) else {
            return Ok(None);
        };
        let edges = self.extract(headword)?;
        Ok(aggregate::aggregate(&key, edges, &NoopCounters))
    }

    /// Hand the lexicon over to a batch pipeline. The run closes it when done.
    pub fn into_pipeline(self, config: PipelineConfig) -> Pipeline<L> {
        Pipeline::new(self.lexicon, config)
    }

    /// Access the underlying lexicon (for advanced use).
    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }
}

impl Linker<MemoryLexicon> {
    /// Open a lexicon from disk and wrap it.
    pub fn open(config: &LexiconConfig) -> Result<Self> {
        Ok(Self::with_lexicon(open_lexicon(config)?))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Lookup of '{word}' ({pos}) failed: {message}")]
    Lookup { word: String, pos: PartOfSpeech, message: String },

    #[error("Parse error in {file} at line {line}: {message}")]
    Parse { file: String, line: usize, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Extraction failed for headword '{headword}': {source}")]
    Extraction {
        headword: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Output error: {0}")]
    Output(String),

    #[error("Output location already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Job failed: {failed} task(s) exhausted their attempts (first: {sample})")]
    JobFailed { failed: usize, sample: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
