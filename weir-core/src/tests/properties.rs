//! Property tests for the ring invariants.

use proptest::prelude::*;
use std::collections::BTreeMap;

use super::helpers::{dest, memory_router, table};
use crate::jump;
use crate::ring::RingState;
use crate::selector::HashKey;
use crate::shared::types::Destination;

/// A single change to a ring
#[derive(Debug, Clone)]
enum Op {
    /// Bind a destination with a weight
    Add(u8, u32),
    /// Remove every binding for a destination
    Remove(u8),
}

/// Generate ring changes over a small set of destinations so removes hit
fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..6, 1u32..8).prop_map(|(d, w)| Op::Add(d, w)),
        1 => (0u8..6).prop_map(Op::Remove),
    ]
}

/// Name one of our generated destinations
fn name(d: u8) -> Destination {
    dest(&format!("q{d}"))
}

proptest! {
    #[test]
    fn prop_ring_stays_dense_and_conserves_weight(ops in prop::collection::vec(op(), 0..60)) {
        let mut ring = RingState::default();
        // the weight every bound destination should still have
        let mut expected: BTreeMap<Destination, u32> = BTreeMap::new();
        for op in ops {
            match op {
                Op::Add(d, w) => {
                    ring.add(&name(d), w).unwrap();
                    *expected.entry(name(d)).or_insert(0) += w;
                }
                Op::Remove(d) => {
                    let removed = ring.remove(&name(d));
                    prop_assert_eq!(removed, expected.remove(&name(d)).unwrap_or(0));
                }
            }
            prop_assert!(ring.is_dense(), "ring has gaps: {:?}", ring);
            prop_assert_eq!(ring.next_bucket_number, expected.values().sum::<u32>());
            prop_assert_eq!(&ring.weights(), &expected);
        }
    }

    #[test]
    fn prop_add_then_remove_round_trips(weight in 1u32..64) {
        let mut ring = RingState::default();
        ring.add(&dest("A"), weight).unwrap();
        ring.remove(&dest("A"));
        prop_assert_eq!(ring, RingState::default());
    }

    #[test]
    fn prop_add_then_remove_restores_prior_ring(
        ops in prop::collection::vec(op(), 0..30),
        weight in 1u32..16,
    ) {
        let mut ring = RingState::default();
        for op in ops {
            match op {
                Op::Add(d, w) => ring.add(&name(d), w).unwrap(),
                Op::Remove(d) => {
                    ring.remove(&name(d));
                }
            }
        }
        let before = ring.clone();
        ring.add(&dest("fresh"), weight).unwrap();
        ring.remove(&dest("fresh"));
        prop_assert_eq!(ring, before);
    }

    #[test]
    fn prop_router_matches_pure_ring(ops in prop::collection::vec(op(), 0..40)) {
        let router = memory_router();
        router.create_table(&table()).unwrap();
        let mut ring = RingState::default();
        for op in ops {
            match op {
                Op::Add(d, w) => {
                    ring.add(&name(d), w).unwrap();
                    router.add_weighted_destination(&table(), &name(d), w).unwrap();
                }
                Op::Remove(d) => {
                    ring.remove(&name(d));
                    router.remove_destination(&table(), &name(d)).unwrap();
                }
            }
        }
        prop_assert_eq!(router.lookup(&table()).unwrap(), ring);
    }

    #[test]
    fn prop_select_is_deterministic_and_in_range(key in any::<i64>(), buckets in 1u32..10_000) {
        let first = jump::select(&HashKey::Int(key), buckets);
        prop_assert!(first < buckets);
        prop_assert_eq!(first, jump::select(&HashKey::Int(key), buckets));
    }

    #[test]
    fn prop_select_only_moves_to_new_bucket(key in any::<Vec<u8>>(), buckets in 1u32..500) {
        let key = HashKey::Bytes(key);
        let before = jump::select(&key, buckets);
        let after = jump::select(&key, buckets + 1);
        prop_assert!(before == after || after == buckets);
    }
}
