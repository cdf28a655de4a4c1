//! The bucket ring for a single routing table
//!
//! Jump consistent hashing can only pick a bucket in `[0, N)` so the ring must
//! always number its buckets densely. New weight is appended to the top of the
//! ring and removed weight is compacted out by renumbering everything above it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::RoutingError;
use crate::shared::types::{Binding, Destination, RoutingTableId};

/// The bucket ring for a single routing table
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct RingState {
    /// One past the highest bucket in this ring
    pub next_bucket_number: u32,
    /// The destination that owns each bucket
    pub bucket_map: BTreeMap<u32, Destination>,
}

impl RingState {
    /// Build a ring by binding each destination in order
    ///
    /// # Arguments
    ///
    /// * `bindings` - The bindings to build a ring from
    pub fn from_bindings(bindings: &[Binding]) -> Result<Self, RoutingError> {
        let mut ring = RingState::default();
        for binding in bindings {
            ring.add(&binding.destination, binding.weight)?;
        }
        Ok(ring)
    }

    /// Whether this ring has no buckets
    pub fn is_empty(&self) -> bool {
        self.next_bucket_number == 0
    }

    /// The number of buckets in this ring
    pub fn len(&self) -> u32 {
        self.next_bucket_number
    }

    /// Get the destination for a bucket a jump hash selected
    ///
    /// # Arguments
    ///
    /// * `table` - The table this ring belongs to
    /// * `bucket` - The selected bucket
    pub fn destination(
        &self,
        table: &RoutingTableId,
        bucket: u32,
    ) -> Result<&Destination, RoutingError> {
        self.bucket_map
            .get(&bucket)
            .ok_or_else(|| RoutingError::BucketNotFound {
                table: table.clone(),
                bucket,
            })
    }

    /// Get all buckets owned by a destination in order
    ///
    /// # Arguments
    ///
    /// * `destination` - The destination to get buckets for
    pub fn buckets_of(&self, destination: &Destination) -> Vec<u32> {
        self.bucket_map
            .iter()
            .filter(|(_, owner)| *owner == destination)
            .map(|(bucket, _)| *bucket)
            .collect()
    }

    /// Count how many buckets each destination owns
    pub fn weights(&self) -> BTreeMap<Destination, u32> {
        let mut weights = BTreeMap::new();
        for owner in self.bucket_map.values() {
            *weights.entry(owner.clone()).or_insert(0) += 1;
        }
        weights
    }

    /// Check that our buckets are numbered exactly `[0, next_bucket_number)`
    pub fn is_dense(&self) -> bool {
        self.bucket_map.len() == self.next_bucket_number as usize
            && self
                .bucket_map
                .keys()
                .zip(0..)
                .all(|(bucket, expected)| *bucket == expected)
    }

    /// Append weighted buckets for a destination to the top of this ring
    ///
    /// # Arguments
    ///
    /// * `destination` - The destination to add
    /// * `weight` - The number of buckets to give this destination
    pub fn add(&mut self, destination: &Destination, weight: u32) -> Result<(), RoutingError> {
        // get the range of buckets this destination will own
        let start = self.next_bucket_number;
        let end = start
            .checked_add(weight)
            .ok_or(RoutingError::BucketOverflow {
                next: start,
                weight,
            })?;
        // claim each bucket in our new range
        for bucket in start..end {
            self.bucket_map.insert(bucket, destination.clone());
        }
        self.next_bucket_number = end;
        Ok(())
    }

    /// Remove every bucket owned by a destination and compact the ring
    ///
    /// Returns the number of buckets that were removed.
    ///
    /// # Arguments
    ///
    /// * `destination` - The destination to remove
    pub fn remove(&mut self, destination: &Destination) -> u32 {
        // find the lowest bucket this destination owns
        let first = match self
            .bucket_map
            .iter()
            .find(|(_, owner)| *owner == destination)
        {
            Some((bucket, _)) => *bucket,
            None => return 0,
        };
        // everything below our first bucket keeps its number
        let above = self.bucket_map.split_off(&first);
        // shift every surviving bucket down by the removed buckets beneath it
        let mut removed = 0;
        for (bucket, owner) in above {
            if owner == *destination {
                removed += 1;
            } else {
                self.bucket_map.insert(bucket - removed, owner);
            }
        }
        // rings loaded from elsewhere may claim fewer buckets than they map
        self.next_bucket_number = self.next_bucket_number.saturating_sub(removed);
        removed
    }
}
