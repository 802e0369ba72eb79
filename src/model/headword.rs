//! Headword: the normalized aggregation key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A case-folded, trimmed word with inner whitespace runs collapsed to one
/// space. Never empty, never contains a tab or newline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headword(String);

impl Headword {
    /// Lower-case, trim and collapse whitespace. Blank input has no headword.
    pub fn normalize(raw: &str) -> Option<Self> {
        let mut word = String::with_capacity(raw.len());
        for part in raw.split_whitespace() {
            if !word.is_empty() {
                word.push(' ');
            }
            word.push_str(&part.to_lowercase());
        }
        if word.is_empty() { None } else { Some(Self(word)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Headword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Headword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
