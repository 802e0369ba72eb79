//! Shuffle: route every edge to the reduce partition owning its headword.
//!
//! Partitioning uses FNV-1a over the headword bytes, so the assignment is
//! stable across runs, processes and platforms (unlike `RandomState`).

use std::collections::BTreeMap;

use crate::model::*;
use super::ShuffleOrder;

/// The groups one reduce task aggregates, in headword order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub index: usize,
    pub groups: Vec<(Headword, Vec<RelationEdge>)>,
}

impl Partition {
    pub fn edge_count(&self) -> usize {
        self.groups.iter().map(|(_, edges)| edges.len()).sum()
    }
}

/// Reduce partition of a headword.
pub fn partition_of(headword: &Headword, reducers: usize) -> usize {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = headword
        .as_str()
        .bytes()
        .fold(OFFSET_BASIS, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME));
    (hash % reducers.max(1) as u64) as usize
}

/// Group map outputs by source headword into `reducers` partitions.
///
/// `mapped` must be in input order; with `ShuffleOrder::Emission` that order
/// is preserved inside every group.
pub fn shuffle<I>(mapped: I, reducers: usize, order: ShuffleOrder) -> Vec<Partition>
where
    I: IntoIterator<Item = Vec<RelationEdge>>,
{
    let reducers = reducers.max(1);
    let mut buckets: Vec<BTreeMap<Headword, Vec<RelationEdge>>> =
        (0..reducers).map(|_| BTreeMap::new()).collect();

    for edges in mapped {
        for edge in edges {
            let bucket = &mut buckets[partition_of(&edge.source, reducers)];
            bucket.entry(edge.source.clone()).or_default().push(edge);
        }
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(index, groups)| {
            let mut groups: Vec<_> = groups.into_iter().collect();
            if order == ShuffleOrder::Sorted {
                for (_, edges) in &mut groups {
                    edges.sort_by(|a, b| {
                        (a.kind.name(), &a.target).cmp(&(b.kind.name(), &b.target))
                    });
                }
            }
            Partition { index, groups }
        })
        .collect()
}
