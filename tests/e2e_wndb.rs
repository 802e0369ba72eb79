//! End-to-end tests for the WordNet database loader.
//!
//! Writes a miniature WNDB directory (with license header lines, a satellite
//! adjective and a lexical pointer) and extracts relations from it.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use wordnet_linker::{open_lexicon, Error, Lexicon, LexiconConfig, Linker, PartOfSpeech};

const HEADER: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n  2 Princeton University under the following license.\n";

fn write_fixture(dir: &Path) {
    let data_noun = format!(
        "{HEADER}\
00000100 05 n 02 dog 0 domestic_dog 0 002 @ 00000200 n 0000 %p 00000300 n 0000 | a domesticated carnivorous mammal; \"the dog barked\"\n\
00000200 05 n 02 canine 0 canid 0 001 ~ 00000100 n 0000 | a mammal of the dog family\n\
00000300 05 n 01 flag 0 001 #p 00000100 n 0000 | a conspicuously marked tail\n\
00000400 05 n 01 mammal 0 000 | a warm-blooded vertebrate\n"
    );
    let index_noun = format!(
        "{HEADER}\
canid n 1 1 ~ 1 0 00000200\n\
canine n 1 1 ~ 1 0 00000200\n\
dog n 1 2 @ %p 1 1 00000100\n\
domestic_dog n 1 2 @ %p 1 0 00000100\n\
flag n 1 1 #p 1 0 00000300\n\
mammal n 1 0 1 0 00000400\n"
    );
    let data_verb = format!(
        "{HEADER}\
00000500 38 v 01 chase 0 001 ! 00000600 v 0101 01 + 02 00 | go after with the intent to catch\n\
00000600 38 v 01 escape 0 000 01 + 02 00 | run away\n"
    );
    let index_verb = format!(
        "{HEADER}\
chase v 1 1 ! 1 0 00000500\n\
escape v 1 0 1 0 00000600\n"
    );
    let data_adj = format!(
        "{HEADER}\
00000700 00 a 01 wild 0 001 & 00000800 s 0000 | in a natural state\n\
00000800 00 s 01 feral 0 001 & 00000700 a 0000 | wild and menacing; like a dog\n"
    );
    let index_adj = format!(
        "{HEADER}\
feral a 1 1 & 1 0 00000800\n\
wild a 1 1 & 1 0 00000700\n"
    );

    fs::write(dir.join("data.noun"), data_noun).unwrap();
    fs::write(dir.join("index.noun"), index_noun).unwrap();
    fs::write(dir.join("data.verb"), data_verb).unwrap();
    fs::write(dir.join("index.verb"), index_verb).unwrap();
    fs::write(dir.join("data.adj"), data_adj).unwrap();
    fs::write(dir.join("index.adj"), index_adj).unwrap();
    fs::write(dir.join("data.adv"), HEADER).unwrap();
    fs::write(dir.join("index.adv"), HEADER).unwrap();
}

fn open_fixture() -> (tempfile::TempDir, Linker<wordnet_linker::MemoryLexicon>) {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let linker = Linker::open(&LexiconConfig::Wndb(dir.path().to_path_buf())).unwrap();
    (dir, linker)
}

#[test]
fn test_loads_all_parts_of_speech() {
    let (_dir, linker) = open_fixture();
    let lex = linker.lexicon();
    assert_eq!(lex.sense_count(), 8);
    assert!(lex.contains("feral", PartOfSpeech::Adjective).unwrap());
    assert!(lex.contains("Domestic Dog", PartOfSpeech::Noun).unwrap());
    assert!(!lex.contains("dog", PartOfSpeech::Verb).unwrap());
}

#[test]
fn test_dog_relations() {
    let (_dir, linker) = open_fixture();
    let record = linker.link("dog").unwrap().unwrap();
    // gloss: mammal, dog (self-mention kept); then HYPERNYM before MERONYM_PART
    assert_eq!(
        record.links_field(),
        "mammal|GLOSS_MENTION,dog|GLOSS_MENTION,canine|HYPERNYM,canid|HYPERNYM,flag|MERONYM_PART"
    );
}

#[test]
fn test_hyponym_back_link() {
    let (_dir, linker) = open_fixture();
    let record = linker.link("canine").unwrap().unwrap();
    assert_eq!(
        record.links_field(),
        "mammal|GLOSS_MENTION,dog|GLOSS_MENTION,dog|HYPONYM,domestic_dog|HYPONYM"
    );
}

#[test]
fn test_lexical_pointers_dropped() {
    let (_dir, linker) = open_fixture();
    // chase -> escape is a lexical antonym (source/target 0101)
    assert!(linker.link("chase").unwrap().is_none());
}

#[test]
fn test_satellite_similar_to() {
    let (_dir, linker) = open_fixture();
    let record = linker.link("feral").unwrap().unwrap();
    assert_eq!(
        record.links_field(),
        "wild|GLOSS_MENTION,dog|GLOSS_MENTION,wild|SIMILAR_TO"
    );
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_lexicon(&LexiconConfig::Wndb(dir.path().join("nope"))).unwrap_err();
    assert!(matches!(err, Error::Lexicon(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::remove_file(dir.path().join("index.adv")).unwrap();
    assert!(matches!(
        open_lexicon(&LexiconConfig::Wndb(dir.path().to_path_buf())),
        Err(Error::Lexicon(_))
    ));
}

#[test]
fn test_malformed_line_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("data.adv"), format!("{HEADER}00000900 02 r zz\n")).unwrap();

    match open_lexicon(&LexiconConfig::Wndb(dir.path().to_path_buf())) {
        Err(Error::Parse { file, line, .. }) => {
            assert!(file.ends_with("data.adv"));
            assert_eq!(line, 3);
        }
        other => panic!("expected parse error, got {:?}", other.map(|l| l.sense_count())),
    }
}

#[test]
fn test_index_offset_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("index.adv"), "quickly r 1 0 1 0 00009999\n").unwrap();
    assert!(matches!(
        open_lexicon(&LexiconConfig::Wndb(dir.path().to_path_buf())),
        Err(Error::Parse { line: 1, .. })
    ));
}
