//! Part of speech.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four WordNet parts of speech. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Lookup order used by extraction.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adjective => "ADJECTIVE",
            PartOfSpeech::Adverb => "ADVERB",
        }
    }

    /// Suffix of the WNDB `index.*` / `data.*` files.
    pub fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    /// Primary WNDB synset-type character.
    pub fn tag(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Parse a WNDB synset-type character. Satellites (`s`) are adjectives.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(PartOfSpeech::Noun),
            'v' => Some(PartOfSpeech::Verb),
            'a' | 's' => Some(PartOfSpeech::Adjective),
            'r' => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "noun" | "n" => Ok(PartOfSpeech::Noun),
            "verb" | "v" => Ok(PartOfSpeech::Verb),
            "adjective" | "adj" | "a" | "s" => Ok(PartOfSpeech::Adjective),
            "adverb" | "adv" | "r" => Ok(PartOfSpeech::Adverb),
            _ => Err(format!("unknown part of speech '{s}'")),
        }
    }
}
