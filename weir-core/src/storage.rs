//! The different storage backends ring state can be kept in
//!
//! Every backend provides an atomic read-modify-write per routing table. The
//! ring algorithms never touch storage directly; they compute a new
//! [`RingState`] inside a [`RingStore::write_atomic`] transaction.

pub mod fs;
pub mod memory;

pub use fs::FileSystemStore;
pub use memory::MemoryStore;

use crate::conf::{Backend, Conf};
use crate::errors::WeirError;
use crate::ring::RingState;
use crate::shared::types::RoutingTableId;

/// A keyed store of ring state with atomic read-modify-write per table
pub trait RingStore {
    /// Read the current ring state for a table
    ///
    /// # Arguments
    ///
    /// * `table` - The table to read
    fn read(&self, table: &RoutingTableId) -> Result<Option<RingState>, WeirError>;

    /// Atomically update the ring state for a table
    ///
    /// `mutate` is given the current state (`None` if absent) while no other
    /// writer can touch this table. It returns the state to write or `None` to
    /// leave the table untouched. An error aborts the transaction without
    /// writing anything. The state after the transaction is returned.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to update
    /// * `mutate` - Computes the new state for this table
    fn write_atomic<F>(
        &self,
        table: &RoutingTableId,
        mutate: F,
    ) -> Result<Option<RingState>, WeirError>
    where
        F: FnOnce(Option<&RingState>) -> Result<Option<RingState>, WeirError>;

    /// Delete the ring state for a table
    ///
    /// Returns whether any state existed.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to delete
    fn delete(&self, table: &RoutingTableId) -> Result<bool, WeirError>;

    /// List every table with ring state in sorted order
    fn tables(&self) -> Result<Vec<RoutingTableId>, WeirError>;
}

/// The storage backend picked by our config
#[derive(Debug)]
pub enum Stores {
    /// Ring state is kept in memory
    Memory(MemoryStore),
    /// Ring state is kept on disk
    FileSystem(FileSystemStore),
}

impl Stores {
    /// Open the storage backend our config asks for
    ///
    /// # Arguments
    ///
    /// * `conf` - The weir config
    pub fn new(conf: &Conf) -> Result<Self, WeirError> {
        match conf.storage.backend {
            Backend::Memory => Ok(Stores::Memory(MemoryStore::default())),
            Backend::FileSystem => Ok(Stores::FileSystem(FileSystemStore::new(
                &conf.storage.fs,
            )?)),
        }
    }
}

impl RingStore for Stores {
    fn read(&self, table: &RoutingTableId) -> Result<Option<RingState>, WeirError> {
        match self {
            Stores::Memory(store) => store.read(table),
            Stores::FileSystem(store) => store.read(table),
        }
    }

    fn write_atomic<F>(
        &self,
        table: &RoutingTableId,
        mutate: F,
    ) -> Result<Option<RingState>, WeirError>
    where
        F: FnOnce(Option<&RingState>) -> Result<Option<RingState>, WeirError>,
    {
        match self {
            Stores::Memory(store) => store.write_atomic(table, mutate),
            Stores::FileSystem(store) => store.write_atomic(table, mutate),
        }
    }

    fn delete(&self, table: &RoutingTableId) -> Result<bool, WeirError> {
        match self {
            Stores::Memory(store) => store.delete(table),
            Stores::FileSystem(store) => store.delete(table),
        }
    }

    fn tables(&self) -> Result<Vec<RoutingTableId>, WeirError> {
        match self {
            Stores::Memory(store) => store.tables(),
            Stores::FileSystem(store) => store.tables(),
        }
    }
}
