//! In-memory lexicon.
//!
//! This is the reference implementation of `Lexicon`.
//! It uses plain hash maps, frozen after `build()`.
//!
//! ## Limitations
//!
//! - **Immutable**: there is no way to add senses after `build()`. Rebuild
//!   instead. This is what makes lock-free concurrent reads sound.
//! - **Whole dictionary in RAM**: WordNet 3.x is ~120k senses, which fits
//!   comfortably; far larger lexicons need a disk-backed implementation.
//!
//! Use this lexicon for:
//! - Testing the extractor and the pipeline
//! - Serving WNDB and snapshot data once loaded

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::model::*;
use crate::Result;
use super::{Lexicon, lexicon_key};

// ============================================================================
// MemoryLexicon
// ============================================================================

/// Immutable in-memory lexicon.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    senses: HashMap<SenseId, Sense>,
    /// (lookup key, pos) → senses in dictionary order
    words: HashMap<(String, PartOfSpeech), Vec<SenseId>>,
}

impl MemoryLexicon {
    pub fn builder() -> MemoryLexiconBuilder {
        MemoryLexiconBuilder::default()
    }

    pub fn sense_count(&self) -> usize {
        self.senses.len()
    }

    /// Number of distinct (word, part of speech) entries.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// All senses, ordered by ID.
    pub fn senses(&self) -> Vec<&Sense> {
        let mut all: Vec<&Sense> = self.senses.values().collect();
        all.sort_by_key(|s| s.id);
        all
    }

    /// All word entries, ordered by (pos, key).
    pub fn entries(&self) -> Vec<(&str, PartOfSpeech, &[SenseId])> {
        let mut all: Vec<_> = self
            .words
            .iter()
            .map(|((word, pos), ids)| (word.as_str(), *pos, ids.as_slice()))
            .collect();
        all.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));
        all
    }

    fn senses_of(&self, word: &str, pos: PartOfSpeech) -> Option<&Vec<SenseId>> {
        self.words.get(&(lexicon_key(word), pos))
    }
}

// ============================================================================
// Lexicon impl
// ============================================================================

impl Lexicon for MemoryLexicon {
    fn lookup(&self, word: &str, pos: PartOfSpeech) -> Result<Option<Vec<SenseId>>> {
        Ok(self.senses_of(word, pos).cloned())
    }

    fn sense(&self, id: SenseId) -> Result<Option<&Sense>> {
        Ok(self.senses.get(&id))
    }

    fn contains(&self, word: &str, pos: PartOfSpeech) -> Result<bool> {
        Ok(self.senses_of(word, pos).is_some())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Mutable staging area for a `MemoryLexicon`.
#[derive(Debug, Default)]
pub struct MemoryLexiconBuilder {
    senses: HashMap<SenseId, Sense>,
    words: HashMap<(String, PartOfSpeech), Vec<SenseId>>,
    next_offset: u64,
}

impl MemoryLexiconBuilder {
    /// Add a sense and index each of its lemmas under `pos`.
    ///
    /// Offsets are assigned sequentially, so a word's senses keep insertion order.
    pub fn add_sense<I, S>(&mut self, pos: PartOfSpeech, lemmas: I, gloss: &str) -> SenseId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next_offset += 1;
        let id = SenseId::new(pos, self.next_offset);
        let sense = Sense::new(id, gloss).with_lemmas(lemmas);
        let keys: Vec<String> = sense.lemmas.iter().map(|l| lexicon_key(l)).collect();
        self.senses.insert(id, sense);
        for key in keys {
            self.index_word(&key, pos, id);
        }
        id
    }

    /// Add a fully formed sense without indexing its lemmas.
    /// Returns false if a sense with the same ID is already present.
    pub fn insert_sense(&mut self, sense: Sense) -> bool {
        self.next_offset = self.next_offset.max(sense.id.offset);
        match self.senses.entry(sense.id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(sense);
                true
            }
        }
    }

    /// Append `id` to the sense list of `word` under `pos` (no duplicates).
    pub fn index_word(&mut self, word: &str, pos: PartOfSpeech, id: SenseId) {
        let key = lexicon_key(word);
        if key.is_empty() {
            return;
        }
        let ids = self.words.entry((key, pos)).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Add a pointer from `from` to `to`. Unknown sources are ignored.
    pub fn add_pointer(&mut self, from: SenseId, kind: PointerKind, to: SenseId) -> &mut Self {
        match self.senses.get_mut(&from) {
            Some(sense) => sense.pointers.push(Pointer { kind, target: to }),
            None => tracing::warn!(%from, %kind, "pointer from unknown sense ignored"),
        }
        self
    }

    pub fn contains_sense(&self, id: SenseId) -> bool {
        self.senses.contains_key(&id)
    }

    pub fn build(self) -> MemoryLexicon {
        MemoryLexicon {
            senses: self.senses,
            words: self.words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryLexicon, SenseId, SenseId) {
        let mut b = MemoryLexicon::builder();
        let dog = b.add_sense(PartOfSpeech::Noun, ["dog", "domestic_dog"], "a domesticated mammal");
        let frump = b.add_sense(PartOfSpeech::Noun, ["frump", "dog"], "a dull unattractive woman");
        b.add_sense(PartOfSpeech::Verb, ["dog", "chase"], "go after with the intent to catch");
        b.add_pointer(dog, PointerKind::Hypernym, frump);
        (b.build(), dog, frump)
    }

    #[test]
    fn test_lookup_keeps_insertion_order() {
        let (lex, dog, frump) = sample();
        let nouns = lex.lookup("dog", PartOfSpeech::Noun).unwrap().unwrap();
        assert_eq!(nouns, vec![dog, frump]);
        assert_eq!(lex.lookup("dog", PartOfSpeech::Verb).unwrap().unwrap().len(), 1);
        assert!(lex.lookup("dog", PartOfSpeech::Adverb).unwrap().is_none());
    }

    #[test]
    fn test_lookup_normalizes_key() {
        let (lex, dog, _) = sample();
        assert_eq!(
            lex.lookup("  Domestic Dog ", PartOfSpeech::Noun).unwrap(),
            Some(vec![dog])
        );
    }

    #[test]
    fn test_is_known_any_pos() {
        let (lex, _, _) = sample();
        assert!(lex.is_known("chase").unwrap());
        assert!(lex.is_known("frump").unwrap());
        assert!(!lex.is_known("xyzzy").unwrap());
    }

    #[test]
    fn test_pointer_from_unknown_sense_is_ignored() {
        let mut b = MemoryLexicon::builder();
        let a = b.add_sense(PartOfSpeech::Noun, ["a"], "");
        b.add_pointer(SenseId::new(PartOfSpeech::Verb, 99), PointerKind::Cause, a);
        let lex = b.build();
        assert!(lex.sense(a).unwrap().unwrap().pointers().is_empty());
    }

    #[test]
    fn test_insert_sense_rejects_duplicate() {
        let mut b = MemoryLexicon::builder();
        let id = SenseId::new(PartOfSpeech::Noun, 7);
        assert!(b.insert_sense(Sense::new(id, "first")));
        assert!(!b.insert_sense(Sense::new(id, "second")));
        let next = b.add_sense(PartOfSpeech::Noun, ["x"], "");
        assert_eq!(next.offset, 8);
        let lex = b.build();
        assert_eq!(lex.sense(id).unwrap().unwrap().gloss(), "first");
    }
}
