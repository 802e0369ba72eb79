//! Relation edges emitted by extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Headword, PointerKind};

/// Why a target is linked to a headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationKind {
    /// The target is a known headword mentioned in a gloss.
    GlossMention,
    /// The target is a lemma of a sense reached through a semantic pointer.
    Pointer(PointerKind),
}

impl RelationKind {
    pub const GLOSS_MENTION: &'static str = "GLOSS_MENTION";

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::GlossMention => Self::GLOSS_MENTION,
            RelationKind::Pointer(kind) => kind.name(),
        }
    }

    pub fn is_pointer(self) -> bool {
        matches!(self, RelationKind::Pointer(_))
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PointerKind> for RelationKind {
    fn from(kind: PointerKind) -> Self {
        RelationKind::Pointer(kind)
    }
}

/// A directed `source → target` relation. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEdge {
    pub source: Headword,
    pub target: String,
    pub kind: RelationKind,
}

impl RelationEdge {
    pub fn new(source: Headword, target: impl Into<String>, kind: impl Into<RelationKind>) -> Self {
        Self {
            source,
            target: target.into(),
            kind: kind.into(),
        }
    }

    /// Drop the source, keeping the `target|KIND` part.
    pub fn into_link(self) -> Link {
        Link { target: self.target, kind: self.kind }
    }
}

/// The `target|KIND` half of an edge, as stored in a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub target: String,
    pub kind: RelationKind,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.target, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_display() {
        let dog = Headword::normalize("dog").unwrap();
        let edge = RelationEdge::new(dog.clone(), "canine", PointerKind::Hypernym);
        assert_eq!(edge.into_link().to_string(), "canine|HYPERNYM");

        let edge = RelationEdge::new(dog, "mammal", RelationKind::GlossMention);
        assert_eq!(edge.into_link().to_string(), "mammal|GLOSS_MENTION");
    }

    #[test]
    fn test_is_pointer() {
        assert!(RelationKind::from(PointerKind::Antonym).is_pointer());
        assert!(!RelationKind::GlossMention.is_pointer());
    }
}
