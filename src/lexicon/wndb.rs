//! WordNet database (WNDB) loader.
//!
//! Reads the classic Princeton dictionary layout into a `MemoryLexicon`:
//!
//! ```text
//! index.noun   lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...
//! data.noun    offset lex_filenum ss_type w_cnt word lex_id [word lex_id...]
//!              p_cnt [symbol offset pos source/target...] [frames...] | gloss
//! ```
//!
//! Only semantic pointers (`source/target == 0000`) are kept. Lexical pointers
//! relate individual words, not senses, and the extractor walks sense to sense.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::model::*;
use crate::{Error, Result};
use super::{MemoryLexicon, MemoryLexiconBuilder};

/// Counters gathered while loading, logged once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WndbStats {
    pub senses: usize,
    pub words: usize,
    pub semantic_pointers: usize,
    pub lexical_pointers: usize,
    pub unknown_symbols: usize,
}

/// Load all four parts of speech from a WNDB directory.
pub fn load_wndb(dir: &Path) -> Result<MemoryLexicon> {
    if !dir.is_dir() {
        return Err(Error::Lexicon(format!(
            "WordNet directory {} does not exist",
            dir.display()
        )));
    }

    let mut builder = MemoryLexicon::builder();
    let mut stats = WndbStats::default();

    // Senses first: index lines refer to data offsets.
    for pos in PartOfSpeech::ALL {
        let path = dir.join(format!("data.{}", pos.file_suffix()));
        read_lines(&path, |line_no, line| {
            let sense = parse_data_line(line, pos, &mut stats)
                .map_err(|message| parse_error(&path, line_no, message))?;
            if !builder.insert_sense(sense) {
                return Err(parse_error(&path, line_no, "duplicate synset offset".into()));
            }
            stats.senses += 1;
            Ok(())
        })?;
    }

    for pos in PartOfSpeech::ALL {
        let path = dir.join(format!("index.{}", pos.file_suffix()));
        read_lines(&path, |line_no, line| {
            index_line(&mut builder, line, pos)
                .map_err(|message| parse_error(&path, line_no, message))?;
            stats.words += 1;
            Ok(())
        })?;
    }

    tracing::info!(
        senses = stats.senses,
        words = stats.words,
        semantic_pointers = stats.semantic_pointers,
        lexical_pointers = stats.lexical_pointers,
        unknown_symbols = stats.unknown_symbols,
        "loaded WordNet database from {}",
        dir.display(),
    );
    Ok(builder.build())
}

// ============================================================================
// File plumbing
// ============================================================================

/// Call `f` for each non-header, non-blank line (1-based line numbers).
fn read_lines<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    let file = File::open(path)
        .map_err(|e| Error::Lexicon(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let mut line_no = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        line_no += 1;
        // License header lines start with two spaces.
        if line.starts_with("  ") || line.trim().is_empty() {
            continue;
        }
        f(line_no, line.trim_end_matches(['\n', '\r']))?;
    }
}

fn parse_error(path: &Path, line: usize, message: String) -> Error {
    Error::Parse {
        file: path.display().to_string(),
        line,
        message,
    }
}

fn parse_num(field: Option<&str>, radix: u32, what: &str) -> std::result::Result<u64, String> {
    let field = field.ok_or_else(|| format!("missing {what}"))?;
    u64::from_str_radix(field, radix).map_err(|_| format!("invalid {what} '{field}'"))
}

// ============================================================================
// Line parsers
// ============================================================================

/// Parse one `data.*` line into a sense of `file_pos`.
fn parse_data_line(
    line: &str,
    file_pos: PartOfSpeech,
    stats: &mut WndbStats,
) -> std::result::Result<Sense, String> {
    let (fields, gloss) = match line.split_once('|') {
        Some((fields, gloss)) => (fields, gloss.trim()),
        None => (line, ""),
    };
    let mut tokens = fields.split_whitespace();

    let offset = parse_num(tokens.next(), 10, "synset offset")?;
    tokens.next().ok_or("missing lex_filenum")?;
    let ss_type = tokens.next().ok_or("missing ss_type")?;
    let pos = ss_type
        .chars()
        .next()
        .and_then(PartOfSpeech::from_tag)
        .ok_or_else(|| format!("invalid ss_type '{ss_type}'"))?;
    if pos != file_pos {
        return Err(format!("ss_type '{ss_type}' in {} file", file_pos.file_suffix()));
    }

    let w_cnt = parse_num(tokens.next(), 16, "w_cnt")?;
    // The count is untrusted; missing words end the loop with an error.
    let mut lemmas = Vec::with_capacity(w_cnt.min(16) as usize);
    for _ in 0..w_cnt {
        let word = tokens.next().ok_or("missing word")?;
        tokens.next().ok_or("missing lex_id")?;
        lemmas.push(strip_adjective_marker(word).to_string());
    }

    let id = SenseId::new(file_pos, offset);
    let mut sense = Sense::new(id, gloss).with_lemmas(lemmas);

    let p_cnt = parse_num(tokens.next(), 10, "p_cnt")?;
    for _ in 0..p_cnt {
        let symbol = tokens.next().ok_or("missing pointer symbol")?;
        let target_offset = parse_num(tokens.next(), 10, "pointer offset")?;
        let target_tag = tokens.next().ok_or("missing pointer pos")?;
        let source_target = tokens.next().ok_or("missing pointer source/target")?;

        let target_pos = target_tag
            .chars()
            .next()
            .and_then(PartOfSpeech::from_tag)
            .ok_or_else(|| format!("invalid pointer pos '{target_tag}'"))?;

        if source_target != "0000" {
            stats.lexical_pointers += 1;
            continue;
        }
        match PointerKind::from_symbol(symbol, file_pos) {
            Some(kind) => {
                stats.semantic_pointers += 1;
                sense.pointers.push(Pointer {
                    kind,
                    target: SenseId::new(target_pos, target_offset),
                });
            }
            None => {
                stats.unknown_symbols += 1;
                tracing::debug!(%id, symbol, "skipping unknown pointer symbol");
            }
        }
    }
    // Verb frames follow the pointers; they carry no relations.

    Ok(sense)
}

/// Register one `index.*` line's lemma against its senses.
fn index_line(
    builder: &mut MemoryLexiconBuilder,
    line: &str,
    file_pos: PartOfSpeech,
) -> std::result::Result<(), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let lemma = tokens.first().ok_or("missing lemma")?;
    let synset_cnt = parse_num(tokens.get(2).copied(), 10, "synset_cnt")? as usize;
    let p_cnt = parse_num(tokens.get(3).copied(), 10, "p_cnt")?;

    // lemma pos synset_cnt p_cnt [symbols] sense_cnt tagsense_cnt [offsets]
    let first_offset = usize::try_from(p_cnt)
        .ok()
        .and_then(|p| p.checked_add(6))
        .ok_or_else(|| format!("invalid p_cnt '{p_cnt}'"))?;
    let offsets = tokens.get(first_offset..).ok_or("truncated index line")?;
    if offsets.len() != synset_cnt {
        return Err(format!(
            "expected {synset_cnt} synset offsets, found {}",
            offsets.len()
        ));
    }

    for field in offsets {
        let offset = parse_num(Some(*field), 10, "synset offset")?;
        let id = SenseId::new(file_pos, offset);
        if !builder.contains_sense(id) {
            return Err(format!("offset {offset} not found in data.{}", file_pos.file_suffix()));
        }
        builder.index_word(lemma, file_pos, id);
    }
    Ok(())
}

/// `galore(ip)` → `galore`
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(i) if word.ends_with(')') => &word[..i],
        _ => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_noun_data_line() {
        let line = "02084071 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 002 \
                    @ 02083346 n 0000 ~ 01322604 n 0102 | a member of the genus Canis";
        let mut stats = WndbStats::default();
        let sense = parse_data_line(line, PartOfSpeech::Noun, &mut stats).unwrap();

        assert_eq!(sense.id, SenseId::new(PartOfSpeech::Noun, 2084071));
        assert_eq!(sense.lemmas(), ["dog", "domestic_dog", "Canis_familiaris"]);
        assert_eq!(sense.gloss(), "a member of the genus Canis");
        assert_eq!(
            sense.pointers(),
            [Pointer {
                kind: PointerKind::Hypernym,
                target: SenseId::new(PartOfSpeech::Noun, 2083346),
            }]
        );
        assert_eq!(stats.semantic_pointers, 1);
        assert_eq!(stats.lexical_pointers, 1);
    }

    #[test]
    fn test_parse_satellite_and_marker() {
        let line = "00013887 00 s 01 galore(ip) 0 001 & 00013160 a 0000 | existing in great numbers";
        let mut stats = WndbStats::default();
        let sense = parse_data_line(line, PartOfSpeech::Adjective, &mut stats).unwrap();
        assert_eq!(sense.lemmas(), ["galore"]);
        assert_eq!(sense.pointers()[0].kind, PointerKind::SimilarTo);
    }

    #[test]
    fn test_parse_verb_with_frames() {
        let line = "01835496 38 v 01 run 0 001 @ 01831531 v 0000 01 + 02 00 | move fast";
        let mut stats = WndbStats::default();
        let sense = parse_data_line(line, PartOfSpeech::Verb, &mut stats).unwrap();
        assert_eq!(sense.pointers().len(), 1);
        assert_eq!(sense.gloss(), "move fast");
    }

    #[test]
    fn test_hex_word_count() {
        let words: String = (0..10).map(|i| format!("w{i} 0 ")).collect();
        let line = format!("00000001 03 n 0a {words}000 | many words");
        let mut stats = WndbStats::default();
        let sense = parse_data_line(&line, PartOfSpeech::Noun, &mut stats).unwrap();
        assert_eq!(sense.lemmas().len(), 10);
    }

    #[test]
    fn test_wrong_pos_rejected() {
        let line = "00000001 03 v 01 run 0 000 | x";
        let mut stats = WndbStats::default();
        assert!(parse_data_line(line, PartOfSpeech::Noun, &mut stats).is_err());
    }

    #[test]
    fn test_index_line() {
        let mut builder = MemoryLexicon::builder();
        for offset in [10, 20] {
            builder.insert_sense(Sense::new(SenseId::new(PartOfSpeech::Noun, offset), ""));
        }
        index_line(&mut builder, "dog n 2 2 @ ~ 2 1 00000020 00000010", PartOfSpeech::Noun).unwrap();
        let lex = builder.build();

        use crate::Lexicon;
        let ids = lex.lookup("dog", PartOfSpeech::Noun).unwrap().unwrap();
        assert_eq!(ids.iter().map(|id| id.offset).collect::<Vec<_>>(), vec![20, 10]);
    }

    #[test]
    fn test_index_line_count_mismatch() {
        let mut builder = MemoryLexicon::builder();
        let err = index_line(&mut builder, "dog n 2 0 1 0 00000020", PartOfSpeech::Noun).unwrap_err();
        assert!(err.contains("expected 2"), "{err}");
    }

    #[test]
    fn test_huge_word_count_is_parse_error() {
        let line = "00000001 03 n ffffffffffffffff dog 0 000 | x";
        let mut stats = WndbStats::default();
        let err = parse_data_line(line, PartOfSpeech::Noun, &mut stats).unwrap_err();
        assert!(err.contains("missing lex_id") || err.contains("missing word"), "{err}");
    }

    #[test]
    fn test_huge_pointer_count_in_index_line() {
        let mut builder = MemoryLexicon::builder();
        builder.insert_sense(Sense::new(SenseId::new(PartOfSpeech::Noun, 20), ""));
        let line = "dog n 1 18446744073709551615 1 0 00000020";
        let err = index_line(&mut builder, line, PartOfSpeech::Noun).unwrap_err();
        assert!(err.contains("p_cnt") || err.contains("truncated"), "{err}");
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_adjective_marker("galore(ip)"), "galore");
        assert_eq!(strip_adjective_marker("dog"), "dog");
    }
}
