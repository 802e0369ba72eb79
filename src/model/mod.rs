//! # Lexical Relation Model
//!
//! Clean DTOs shared by the lexicon, the extractor, the aggregator and the
//! pipeline. These types cross every boundary: lexicon ↔ extract ↔ shuffle ↔ output.
//!
//! Design rule: this module is pure data with no I/O or threads.

pub mod pos;
pub mod headword;
pub mod sense;
pub mod pointer;
pub mod edge;
pub mod record;

pub use pos::PartOfSpeech;
pub use headword::Headword;
pub use sense::{Sense, SenseId, Pointer};
pub use pointer::PointerKind;
pub use edge::{RelationKind, RelationEdge, Link};
pub use record::Record;
