//! End-to-end tests for aggregation: record existence, cardinality and the
//! headwords-processed counter.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use wordnet_linker::aggregate::counters::{GROUP, HEADWORDS_PROCESSED};
use wordnet_linker::{
    aggregate, extract, Headword, MemoryCounters, MemoryLexicon, PartOfSpeech, PointerKind,
    RelationEdge, RelationKind,
};

fn hw(word: &str) -> Headword {
    Headword::normalize(word).unwrap()
}

#[test]
fn test_extract_then_aggregate() {
    let mut b = MemoryLexicon::builder();
    let dog = b.add_sense(PartOfSpeech::Noun, ["dog"], "a domesticated carnivorous mammal");
    let canine = b.add_sense(PartOfSpeech::Noun, ["canine"], "");
    b.add_sense(PartOfSpeech::Noun, ["mammal"], "");
    b.add_pointer(dog, PointerKind::Hypernym, canine);
    let lex = b.build();

    let counters = MemoryCounters::new();
    let edges = extract(&lex, "dog").unwrap();
    let record = aggregate(&hw("dog"), edges, &counters).unwrap();

    assert_eq!(record.to_string(), "dog\tmammal|GLOSS_MENTION,canine|HYPERNYM");
    assert_eq!(counters.get(GROUP, HEADWORDS_PROCESSED), 1);
}

#[test]
fn test_no_edges_no_record_no_count() {
    let counters = MemoryCounters::new();
    assert!(aggregate(&hw("xyzzy"), std::iter::empty(), &counters).is_none());
    assert_eq!(counters.get(GROUP, HEADWORDS_PROCESSED), 0);
}

#[test]
fn test_counter_counts_records_not_edges() {
    let counters = MemoryCounters::new();
    for word in ["cat", "dog", "fox"] {
        let edges = vec![
            RelationEdge::new(hw(word), "animal", PointerKind::Hypernym),
            RelationEdge::new(hw(word), "animal", PointerKind::Hypernym),
        ];
        aggregate(&hw(word), edges, &counters).unwrap();
    }
    assert_eq!(counters.get(GROUP, HEADWORDS_PROCESSED), 3);
}

fn kind_strategy() -> impl Strategy<Value = RelationKind> {
    prop_oneof![
        Just(RelationKind::GlossMention),
        (0..PointerKind::ALL.len()).prop_map(|i| RelationKind::Pointer(PointerKind::ALL[i])),
    ]
}

proptest! {
    #[test]
    fn prop_record_iff_edges(targets in prop::collection::vec(("[a-z]{1,8}", kind_strategy()), 0..20)) {
        let source = hw("dog");
        let edges: Vec<_> = targets
            .iter()
            .map(|(target, kind)| RelationEdge::new(source.clone(), target.as_str(), *kind))
            .collect();
        let counters = MemoryCounters::new();

        match aggregate(&source, edges.clone(), &counters) {
            None => prop_assert!(edges.is_empty()),
            Some(record) => {
                prop_assert_eq!(record.links.len(), edges.len());
                prop_assert_eq!(record.links_field().split(',').count(), edges.len());
                let expected: Vec<_> = edges.into_iter().map(RelationEdge::into_link).collect();
                prop_assert_eq!(record.links, expected);
            }
        }
    }
}
