//! Shared test utilities for weir-core tests.

use crate::ring::RingState;
use crate::shared::types::{Destination, RoutingTableId};
use crate::storage::MemoryStore;
use crate::HashRouter;

/// Build a destination from a short name.
pub fn dest(name: &str) -> Destination {
    Destination::new(name)
}

/// The table most tests route through.
pub fn table() -> RoutingTableId {
    RoutingTableId::new("/", "e1")
}

/// Create a router backed by an in memory store.
pub fn memory_router() -> HashRouter<MemoryStore> {
    HashRouter::new(MemoryStore::default())
}

/// Build the bucket map we expect from `(bucket, destination)` pairs.
pub fn ring_of(next: u32, buckets: &[(u32, &str)]) -> RingState {
    RingState {
        next_bucket_number: next,
        bucket_map: buckets
            .iter()
            .map(|(bucket, name)| (*bucket, dest(name)))
            .collect(),
    }
}
