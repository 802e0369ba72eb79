//! # Relation Extraction
//!
//! Headword in, ordered relation edges out. Pure with respect to the lexicon:
//! the only effects are read-only lookups, so an extraction can be retried
//! any number of times and always yields the same sequence.
//!
//! Edge order is depth-first:
//!
//! ```text
//! part of speech (NOUN, VERB, ADJECTIVE, ADVERB)
//!   └─ sense (dictionary order)
//!        ├─ gloss mentions (gloss order)
//!        └─ pointer kind (PointerKind::ALL order)
//!             └─ related sense (pointer order)
//!                  └─ lemma (sense order)
//! ```

pub mod tokenize;

use hashbrown::HashMap;

use crate::lexicon::{Lexicon, lexicon_key};
use crate::model::*;
use crate::{Error, Result};

pub use tokenize::tokenize_gloss;

/// Extract every relation edge of one headword.
///
/// Blank input yields no edges. Lookup failures are wrapped in
/// `Error::Extraction` naming the headword.
pub fn extract<L: Lexicon + ?Sized>(lexicon: &L, headword: &str) -> Result<Vec<RelationEdge>> {
    let Some(source) = Headword::normalize(headword) else {
        return Ok(Vec::new());
    };
    Extraction::new(lexicon, &source)
        .run()
        .map_err(|e| Error::Extraction {
            headword: source.to_string(),
            source: Box::new(e),
        })
}

/// State of one extractor invocation. Dropped when the headword is done.
struct Extraction<'a, L: Lexicon + ?Sized> {
    lexicon: &'a L,
    source: &'a Headword,
    /// Lookup form of the source, for self-loop checks.
    self_key: String,
    /// Gloss tokens already checked against the lexicon.
    known: HashMap<String, bool>,
    edges: Vec<RelationEdge>,
}

impl<'a, L: Lexicon + ?Sized> Extraction<'a, L> {
    fn new(lexicon: &'a L, source: &'a Headword) -> Self {
        Self {
            lexicon,
            source,
            self_key: lexicon_key(source.as_str()),
            known: HashMap::new(),
            edges: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<RelationEdge>> {
        for pos in PartOfSpeech::ALL {
            let Some(ids) = self.lexicon.lookup(self.source.as_str(), pos)? else {
                continue;
            };
            for id in ids {
                let sense = self.resolve(id)?;
                self.gloss_mentions(sense)?;
                self.pointer_relations(sense)?;
            }
        }
        Ok(self.edges)
    }

    fn resolve(&self, id: SenseId) -> Result<&'a Sense> {
        self.lexicon
            .sense(id)?
            .ok_or_else(|| Error::NotFound(format!("sense {id}")))
    }

    /// Known headwords in the gloss. Self-mentions are kept.
    fn gloss_mentions(&mut self, sense: &Sense) -> Result<()> {
        for token in tokenize_gloss(sense.gloss()) {
            if self.is_known(&token)? {
                self.edges.push(RelationEdge::new(
                    self.source.clone(),
                    token,
                    RelationKind::GlossMention,
                ));
            }
        }
        Ok(())
    }

    /// Lemmas of senses reached through semantic pointers. Self-loops are dropped.
    fn pointer_relations(&mut self, sense: &Sense) -> Result<()> {
        for kind in PointerKind::ALL {
            for target in sense.related(kind) {
                let related = self.resolve(target)?;
                for lemma in related.lemmas() {
                    if lexicon_key(lemma) == self.self_key {
                        continue;
                    }
                    self.edges.push(RelationEdge::new(self.source.clone(), lemma.as_str(), kind));
                }
            }
        }
        Ok(())
    }

    fn is_known(&mut self, token: &str) -> Result<bool> {
        if let Some(&known) = self.known.get(token) {
            return Ok(known);
        }
        let known = self.lexicon.is_known(token)?;
        self.known.insert(token.to_string(), known);
        Ok(known)
    }
}
