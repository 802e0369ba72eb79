//! Gloss tokenizer: word-boundary scanning.

use std::sync::LazyLock;

use regex::Regex;

/// Unicode word characters, so `café` and `naïve` stay whole.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+").expect("static word pattern compiles")
});

/// Lower-cased word tokens of a gloss, in order of appearance.
/// Repeated words are yielded every time they occur.
pub fn tokenize_gloss(gloss: &str) -> impl Iterator<Item = String> {
    let lowered = gloss.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect::<Vec<_>>()
        .into_iter()
}
