//! Routes items to destinations through a table's bucket ring
//!
//! The router owns no ring state itself. Every mutation is a single
//! [`RingStore::write_atomic`] transaction so a table's ring always moves from
//! one dense state to the next.

use tracing::{event, instrument, Level};

use crate::binding;
use crate::errors::{RoutingError, WeirError};
use crate::jump;
use crate::ring::RingState;
use crate::selector::HashConfig;
use crate::shared::traits::Routable;
use crate::shared::types::{Binding, Destination, RoutingTableId};
use crate::storage::RingStore;

/// Routes items through the rings in a store
#[derive(Debug)]
pub struct HashRouter<S: RingStore> {
    /// The store our rings are kept in
    store: S,
}

impl<S: RingStore> HashRouter<S> {
    /// Create a new router on top of a ring store
    ///
    /// # Arguments
    ///
    /// * `store` - The store to keep rings in
    pub fn new(store: S) -> Self {
        HashRouter { store }
    }

    /// Get the store this router keeps its rings in
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an empty ring for a table if it doesn't already have one
    ///
    /// # Arguments
    ///
    /// * `table` - The table to create a ring for
    #[instrument(name = "HashRouter::create_table", skip_all, fields(table = %table), err(Debug))]
    pub fn create_table(&self, table: &RoutingTableId) -> Result<RingState, WeirError> {
        let ring = self.store.write_atomic(table, |current| match current {
            Some(_) => Ok(None),
            None => Ok(Some(RingState::default())),
        })?;
        Ok(ring.unwrap_or_default())
    }

    /// Delete a table's ring
    ///
    /// Returns whether this table had a ring.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to delete
    #[instrument(name = "HashRouter::delete_table", skip_all, fields(table = %table), err(Debug))]
    pub fn delete_table(&self, table: &RoutingTableId) -> Result<bool, WeirError> {
        self.store.delete(table)
    }

    /// Append weighted buckets for a destination to a table's ring
    ///
    /// The weight must already be validated to be greater than 0.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to add to
    /// * `destination` - The destination to add
    /// * `weight` - The number of buckets to give this destination
    #[instrument(
        name = "HashRouter::add_weighted_destination",
        skip_all,
        fields(table = %table, destination = %destination, weight = weight),
        err(Debug)
    )]
    pub fn add_weighted_destination(
        &self,
        table: &RoutingTableId,
        destination: &Destination,
        weight: u32,
    ) -> Result<RingState, WeirError> {
        let ring = self.store.write_atomic(table, |current| {
            // start from an empty ring if this table doesn't have one yet
            let mut ring = current.cloned().unwrap_or_default();
            ring.add(destination, weight)?;
            Ok(Some(ring))
        })?;
        Ok(ring.unwrap_or_default())
    }

    /// Validate a binding key and add its weight for a destination
    ///
    /// # Arguments
    ///
    /// * `table` - The table to bind to
    /// * `destination` - The destination being bound
    /// * `binding_key` - The binding key holding this bindings weight
    pub fn add_binding(
        &self,
        table: &RoutingTableId,
        destination: &Destination,
        binding_key: &str,
    ) -> Result<RingState, WeirError> {
        let weight = binding::parse_weight(binding_key)?;
        self.add_weighted_destination(table, destination, weight)
    }

    /// Remove every bucket owned by a destination from a table's ring
    ///
    /// Removal is by destination, so a destination bound more than once loses
    /// the buckets of all of its bindings. Fails with
    /// [`RoutingError::RingStateMissing`] if this table has no ring.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to remove from
    /// * `destination` - The destination to remove
    #[instrument(
        name = "HashRouter::remove_destination",
        skip_all,
        fields(table = %table, destination = %destination),
        err(Debug)
    )]
    pub fn remove_destination(
        &self,
        table: &RoutingTableId,
        destination: &Destination,
    ) -> Result<RingState, WeirError> {
        self.remove_all(table, std::slice::from_ref(destination))
    }

    /// Remove destinations from a table's ring in a single transaction
    ///
    /// # Arguments
    ///
    /// * `table` - The table to remove from
    /// * `destinations` - The destinations to remove
    fn remove_all(
        &self,
        table: &RoutingTableId,
        destinations: &[Destination],
    ) -> Result<RingState, WeirError> {
        let ring = self.store.write_atomic(table, |current| {
            let mut ring = match current {
                Some(current) => current.clone(),
                None => return Err(RoutingError::RingStateMissing(table.clone()).into()),
            };
            // drop each destination compacting the ring as we go
            let removed: u32 = destinations.iter().map(|dest| ring.remove(dest)).sum();
            // leave the stored ring alone if nothing changed
            if removed == 0 {
                Ok(None)
            } else {
                Ok(Some(ring))
            }
        })?;
        Ok(ring.unwrap_or_default())
    }

    /// Remove the destinations of deleted bindings from a table's ring
    ///
    /// A table without a ring is logged and treated as having nothing to remove.
    ///
    /// # Arguments
    ///
    /// * `table` - The table the bindings were removed from
    /// * `destinations` - The destinations of the removed bindings
    #[instrument(name = "HashRouter::remove_bindings", skip_all, fields(table = %table), err(Debug))]
    pub fn remove_bindings(
        &self,
        table: &RoutingTableId,
        destinations: &[Destination],
    ) -> Result<Option<RingState>, WeirError> {
        match self.remove_all(table, destinations) {
            Ok(ring) => Ok(Some(ring)),
            Err(WeirError::Routing(RoutingError::RingStateMissing(_))) => {
                event!(
                    Level::WARN,
                    table = %table,
                    "Bindings removed from a table without a ring"
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Replace a table's ring with one built from its bindings in order
    ///
    /// # Arguments
    ///
    /// * `table` - The table to rebuild
    /// * `bindings` - The bindings this table currently has
    #[instrument(name = "HashRouter::rebuild", skip_all, fields(table = %table, bindings = bindings.len()), err(Debug))]
    pub fn rebuild(
        &self,
        table: &RoutingTableId,
        bindings: &[Binding],
    ) -> Result<RingState, WeirError> {
        // build our ring before taking the tables lock
        let rebuilt = RingState::from_bindings(bindings)?;
        let ring = self
            .store
            .write_atomic(table, |_| Ok(Some(rebuilt)))?;
        Ok(ring.unwrap_or_default())
    }

    /// Get a snapshot of a table's ring if it has one
    ///
    /// # Arguments
    ///
    /// * `table` - The table to inspect
    pub fn inspect(&self, table: &RoutingTableId) -> Result<Option<RingState>, WeirError> {
        self.store.read(table)
    }

    /// Get a snapshot of a table's ring
    ///
    /// # Arguments
    ///
    /// * `table` - The table to look up
    pub fn lookup(&self, table: &RoutingTableId) -> Result<RingState, WeirError> {
        match self.store.read(table)? {
            Some(ring) => Ok(ring),
            None => Err(RoutingError::NotFound(table.clone()).into()),
        }
    }

    /// Pick the destination for an item
    ///
    /// Returns `None` when the ring is empty, the item lacks the value we hash
    /// on, or the selected bucket is missing from the ring.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to route through
    /// * `item` - The item to route
    /// * `config` - What part of the item to hash on
    #[instrument(name = "HashRouter::route", skip_all, fields(table = %table), err(Debug))]
    pub fn route<R: Routable>(
        &self,
        table: &RoutingTableId,
        item: &R,
        config: &HashConfig,
    ) -> Result<Option<Destination>, WeirError> {
        let ring = self.lookup(table)?;
        // nothing is bound so there is nowhere to route
        if ring.is_empty() {
            return Ok(None);
        }
        // get the key to hash for this item
        let key = match config.key(item) {
            Some(key) => key,
            None => {
                event!(Level::DEBUG, ?config, "Item has no value to hash on");
                return Ok(None);
            }
        };
        let bucket = jump::select(&key, ring.len());
        match ring.destination(table, bucket) {
            Ok(destination) => Ok(Some(destination.clone())),
            Err(error) => {
                event!(Level::WARN, %error, "Selected bucket is not in the ring");
                Ok(None)
            }
        }
    }
}
