//! # Aggregation
//!
//! Folds every edge of one headword into a single record. Pure except for
//! the counter port, which only observes.

pub mod counters;

use crate::model::*;

pub use counters::{Counters, MemoryCounters, NoopCounters, CounterValue};

/// Aggregate the edges of `headword` in arrival order.
///
/// Returns `None` when no edge arrived. Every edge contributes exactly one
/// link; duplicates are kept. Emitting a record increments
/// `WordNet / HeadwordsProcessed`.
pub fn aggregate<I>(headword: &Headword, edges: I, counters: &dyn Counters) -> Option<Record>
where
    I: IntoIterator<Item = RelationEdge>,
{
    let links: Vec<Link> = edges
        .into_iter()
        .inspect(|edge| debug_assert_eq!(&edge.source, headword))
        .map(RelationEdge::into_link)
        .collect();

    if links.is_empty() {
        return None;
    }
    counters.increment(counters::GROUP, counters::HEADWORDS_PROCESSED, 1);
    Some(Record { headword: headword.clone(), links })
}
