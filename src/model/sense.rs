//! Sense (one meaning of a word) and its outgoing pointers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{PartOfSpeech, PointerKind};

/// Opaque sense identifier: part of speech plus an offset that is unique
/// within that part of speech (a WNDB byte offset, or a builder sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SenseId {
    pub pos: PartOfSpeech,
    pub offset: u64,
}

impl SenseId {
    pub fn new(pos: PartOfSpeech, offset: u64) -> Self {
        Self { pos, offset }
    }
}

impl std::fmt::Display for SenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:08}", self.pos.tag(), self.offset)
    }
}

/// A typed edge from one sense to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pointer {
    pub kind: PointerKind,
    pub target: SenseId,
}

/// One meaning shared by a set of lemmas (a WordNet synset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub id: SenseId,
    /// Words of this sense, in dictionary order. Case is preserved.
    pub lemmas: SmallVec<[String; 4]>,
    pub gloss: String,
    pub pointers: Vec<Pointer>,
}

impl Sense {
    pub fn new(id: SenseId, gloss: impl Into<String>) -> Self {
        Self {
            id,
            lemmas: SmallVec::new(),
            gloss: gloss.into(),
            pointers: Vec::new(),
        }
    }

    pub fn with_lemmas(mut self, lemmas: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.lemmas = lemmas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pointer(mut self, kind: PointerKind, target: SenseId) -> Self {
        self.pointers.push(Pointer { kind, target });
        self
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.id.pos
    }

    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    pub fn lemmas(&self) -> &[String] {
        &self.lemmas
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    /// Targets of all pointers of one kind, in pointer order.
    pub fn related(&self, kind: PointerKind) -> impl Iterator<Item = SenseId> + '_ {
        self.pointers
            .iter()
            .filter(move |p| p.kind == kind)
            .map(|p| p.target)
    }
}
