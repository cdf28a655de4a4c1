//! Ring state kept only in memory
//!
//! This is the fastest backend but ring state does not survive restarts.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::BuildHasherDefault;
use xxhash_rust::xxh3::Xxh3;

use super::RingStore;
use crate::errors::WeirError;
use crate::ring::RingState;
use crate::shared::types::RoutingTableId;

/// Ring state for every table kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// The ring for each table
    rings: DashMap<RoutingTableId, RingState, BuildHasherDefault<Xxh3>>,
}

impl RingStore for MemoryStore {
    fn read(&self, table: &RoutingTableId) -> Result<Option<RingState>, WeirError> {
        Ok(self.rings.get(table).map(|ring| ring.value().clone()))
    }

    fn write_atomic<F>(
        &self,
        table: &RoutingTableId,
        mutate: F,
    ) -> Result<Option<RingState>, WeirError>
    where
        F: FnOnce(Option<&RingState>) -> Result<Option<RingState>, WeirError>,
    {
        // holding this entry write locks this tables shard until we are done
        match self.rings.entry(table.clone()) {
            Entry::Occupied(mut entry) => {
                if let Some(updated) = mutate(Some(entry.get()))? {
                    entry.insert(updated);
                }
                Ok(Some(entry.get().clone()))
            }
            Entry::Vacant(entry) => match mutate(None)? {
                Some(created) => Ok(Some(entry.insert(created).value().clone())),
                None => Ok(None),
            },
        }
    }

    fn delete(&self, table: &RoutingTableId) -> Result<bool, WeirError> {
        Ok(self.rings.remove(table).is_some())
    }

    fn tables(&self) -> Result<Vec<RoutingTableId>, WeirError> {
        let mut tables = self
            .rings
            .iter()
            .map(|ring| ring.key().clone())
            .collect::<Vec<_>>();
        tables.sort();
        Ok(tables)
    }
}
