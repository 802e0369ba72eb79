//! JSON snapshot of a `MemoryLexicon`.
//!
//! ```text
//! {
//!   "senses": [
//!     { "key": "dog.n.1", "pos": "NOUN", "lemmas": ["dog"], "gloss": "...",
//!       "pointers": [{ "kind": "HYPERNYM", "target": "canine.n.1" }] }
//!   ],
//!   "words": [ { "word": "dog", "pos": "NOUN", "senses": ["dog.n.1"] } ]
//! }
//! ```
//!
//! `words` is optional; without it every lemma is indexed in sense order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{Error, Result};
use super::{MemoryLexicon, lexicon_key};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LexiconSnapshot {
    pub senses: Vec<SnapshotSense>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<SnapshotWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSense {
    pub key: String,
    pub pos: PartOfSpeech,
    pub lemmas: Vec<String>,
    #[serde(default)]
    pub gloss: String,
    #[serde(default)]
    pub pointers: Vec<SnapshotPointer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPointer {
    pub kind: PointerKind,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotWord {
    pub word: String,
    pub pos: PartOfSpeech,
    pub senses: Vec<String>,
}

/// Read a snapshot file and build the lexicon.
pub fn load_snapshot(path: &Path) -> Result<MemoryLexicon> {
    let file = File::open(path)
        .map_err(|e| Error::Lexicon(format!("cannot open snapshot {}: {e}", path.display())))?;
    let snapshot: LexiconSnapshot = serde_json::from_reader(BufReader::new(file))?;
    MemoryLexicon::from_snapshot(&snapshot, &path.display().to_string())
}

/// Write a lexicon as a pretty-printed snapshot file.
pub fn save_snapshot(lexicon: &MemoryLexicon, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &lexicon.to_snapshot())?;
    writer.flush()?;
    Ok(())
}

impl MemoryLexicon {
    /// Build from a snapshot. `origin` names the source in parse errors.
    pub fn from_snapshot(snapshot: &LexiconSnapshot, origin: &str) -> Result<Self> {
        let parse_err = |index: usize, message: String| Error::Parse {
            file: origin.to_string(),
            line: index + 1,
            message,
        };

        let mut builder = MemoryLexicon::builder();
        let mut ids: HashMap<&str, SenseId> = HashMap::new();

        // Pass 1: senses
        for (i, entry) in snapshot.senses.iter().enumerate() {
            if ids.contains_key(entry.key.as_str()) {
                return Err(parse_err(i, format!("duplicate sense key '{}'", entry.key)));
            }
            let id = if snapshot.words.is_empty() {
                builder.add_sense(entry.pos, entry.lemmas.iter().cloned(), &entry.gloss)
            } else {
                let id = SenseId::new(entry.pos, i as u64 + 1);
                builder.insert_sense(
                    Sense::new(id, entry.gloss.clone()).with_lemmas(entry.lemmas.iter().cloned()),
                );
                id
            };
            ids.insert(entry.key.as_str(), id);
        }

        // Pass 2: pointers, now that every key resolves
        for (i, entry) in snapshot.senses.iter().enumerate() {
            let from = ids[entry.key.as_str()];
            for pointer in &entry.pointers {
                let to = ids.get(pointer.target.as_str()).copied().ok_or_else(|| {
                    parse_err(i, format!("pointer to unknown sense '{}'", pointer.target))
                })?;
                builder.add_pointer(from, pointer.kind, to);
            }
        }

        // Explicit word index
        for (i, word) in snapshot.words.iter().enumerate() {
            for key in &word.senses {
                let id = ids.get(key.as_str()).copied().ok_or_else(|| {
                    parse_err(i, format!("word '{}' refers to unknown sense '{key}'", word.word))
                })?;
                builder.index_word(&word.word, word.pos, id);
            }
        }

        Ok(builder.build())
    }

    /// Dump to a snapshot that round-trips through `from_snapshot`,
    /// including each word's sense order.
    pub fn to_snapshot(&self) -> LexiconSnapshot {
        let key_of = |id: SenseId| id.to_string();
        let senses = self
            .senses()
            .into_iter()
            .map(|sense| SnapshotSense {
                key: key_of(sense.id),
                pos: sense.pos(),
                lemmas: sense.lemmas().to_vec(),
                gloss: sense.gloss.clone(),
                pointers: sense
                    .pointers()
                    .iter()
                    .map(|p| SnapshotPointer { kind: p.kind, target: key_of(p.target) })
                    .collect(),
            })
            .collect();
        let words = self
            .entries()
            .into_iter()
            .map(|(word, pos, ids)| SnapshotWord {
                word: lexicon_key(word),
                pos,
                senses: ids.iter().map(|id| key_of(*id)).collect(),
            })
            .collect();
        LexiconSnapshot { senses, words }
    }
}
