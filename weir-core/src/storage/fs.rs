//! Ring state kept in files on disk
//!
//! Each table is stored in its own rkyv archive. Updates are written to a
//! uniquely named temp file and renamed over the old record so readers never
//! see a partial write. Writers hold an advisory lock on a per table lock file
//! so stores opened by different processes on one directory still serialize.

use fd_lock::RwLock;
use rkyv::util::AlignedVec;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;
use xxhash_rust::xxh3::xxh3_64;

use super::RingStore;
use crate::conf::FileSystemStorage;
use crate::errors::{RoutingError, WeirError};
use crate::ring::RingState;
use crate::shared::types::RoutingTableId;

/// The extension for ring records
const RING_EXT: &str = "ring";

/// The suffix for ring records that are still being written
const RING_TEMP_SUFFIX: &str = ".ring-temp";

/// The extension for per table lock files
const LOCK_EXT: &str = "lock";

/// A ring and the table it belongs to as stored on disk
#[derive(Debug, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
struct RingRecord {
    /// The table this ring is for
    table: RoutingTableId,
    /// The ring itself
    ring: RingState,
}

/// Ring state for every table kept in files
#[derive(Debug)]
pub struct FileSystemStore {
    /// The directory our ring records are in
    path: PathBuf,
}

impl FileSystemStore {
    /// Open a file system store creating its directory if needed
    ///
    /// # Arguments
    ///
    /// * `conf` - The settings for file system storage
    #[instrument(name = "FileSystemStore::new", skip_all, fields(path = %conf.path.display()), err(Debug))]
    pub fn new(conf: &FileSystemStorage) -> Result<Self, WeirError> {
        // make sure our directory exists
        std::fs::create_dir_all(&conf.path)?;
        Ok(FileSystemStore {
            path: conf.path.clone(),
        })
    }

    /// Get the base name for a tables files
    ///
    /// # Arguments
    ///
    /// * `table` - The table to name
    fn record_name(table: &RoutingTableId) -> String {
        // scopes and names can contain anything so name files by a hash of them
        let mut raw = Vec::with_capacity(table.scope.len() + table.name.len() + 1);
        raw.extend_from_slice(table.scope.as_bytes());
        raw.push(0);
        raw.extend_from_slice(table.name.as_bytes());
        format!("{:016x}", xxh3_64(&raw))
    }

    /// Get the path to a tables ring record
    ///
    /// # Arguments
    ///
    /// * `table` - The table to get a path for
    pub(crate) fn record_path(&self, table: &RoutingTableId) -> PathBuf {
        let mut path = self.path.clone();
        path.push(format!("{}.{RING_EXT}", Self::record_name(table)));
        path
    }

    /// Open the lock file guarding writes to a table
    ///
    /// Lock files are never removed so every writer locks the same file.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to lock
    fn lock_file(&self, table: &RoutingTableId) -> Result<RwLock<File>, WeirError> {
        let mut path = self.path.clone();
        path.push(format!("{}.{LOCK_EXT}", Self::record_name(table)));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        Ok(RwLock::new(file))
    }

    /// Load a ring record if it exists
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the record to load
    fn load(path: &Path) -> Result<Option<RingRecord>, WeirError> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        // rkyv needs our bytes to be aligned
        let mut aligned = AlignedVec::<16>::with_capacity(raw.len());
        aligned.extend_from_slice(&raw);
        let record = rkyv::from_bytes::<RingRecord, rkyv::rancor::Error>(&aligned)?;
        Ok(Some(record))
    }

    /// Load a tables record making sure it is really that tables record
    ///
    /// # Arguments
    ///
    /// * `table` - The table to load
    fn load_record(&self, table: &RoutingTableId) -> Result<Option<RingRecord>, WeirError> {
        match Self::load(&self.record_path(table))? {
            // a record for another table must never be read or overwritten as ours
            Some(record) if record.table != *table => Err(RoutingError::RecordCollision {
                table: table.clone(),
                found: record.table,
            }
            .into()),
            loaded => Ok(loaded),
        }
    }

    /// Load the ring for a table rejecting rings that are not dense
    ///
    /// # Arguments
    ///
    /// * `table` - The table to load
    fn load_ring(&self, table: &RoutingTableId) -> Result<Option<RingState>, WeirError> {
        match self.load_record(table)? {
            Some(record) if !record.ring.is_dense() => {
                Err(RoutingError::CorruptRing(table.clone()).into())
            }
            Some(record) => Ok(Some(record.ring)),
            None => Ok(None),
        }
    }

    /// Write a ring record for a table
    ///
    /// # Arguments
    ///
    /// * `table` - The table to write a record for
    /// * `ring` - The ring to write
    fn persist(&self, table: &RoutingTableId, ring: &RingState) -> Result<(), WeirError> {
        let record = RingRecord {
            table: table.clone(),
            ring: ring.clone(),
        };
        let raw = rkyv::to_bytes::<rkyv::rancor::Error>(&record)?;
        // write our new record to a temp file only this writer knows about
        let mut temp = tempfile::Builder::new()
            .prefix(&Self::record_name(table))
            .suffix(RING_TEMP_SUFFIX)
            .tempfile_in(&self.path)?;
        temp.write_all(raw.as_slice())?;
        temp.as_file().sync_all()?;
        // rename our temp record over our current one
        temp.persist(self.record_path(table))
            .map_err(|error| error.error)?;
        Ok(())
    }
}

impl RingStore for FileSystemStore {
    fn read(&self, table: &RoutingTableId) -> Result<Option<RingState>, WeirError> {
        self.load_ring(table)
    }

    #[instrument(name = "FileSystemStore::write_atomic", skip_all, fields(table = %table), err(Debug))]
    fn write_atomic<F>(
        &self,
        table: &RoutingTableId,
        mutate: F,
    ) -> Result<Option<RingState>, WeirError>
    where
        F: FnOnce(Option<&RingState>) -> Result<Option<RingState>, WeirError>,
    {
        // only one writer in any process may touch this table at a time
        let mut lock = self.lock_file(table)?;
        let _guard = lock.write()?;
        let current = self.load_ring(table)?;
        match mutate(current.as_ref())? {
            Some(updated) => {
                self.persist(table, &updated)?;
                Ok(Some(updated))
            }
            None => Ok(current),
        }
    }

    #[instrument(name = "FileSystemStore::delete", skip_all, fields(table = %table), err(Debug))]
    fn delete(&self, table: &RoutingTableId) -> Result<bool, WeirError> {
        let mut lock = self.lock_file(table)?;
        let _guard = lock.write()?;
        // make sure this record is really for this table before removing it
        if self.load_record(table)?.is_none() {
            return Ok(false);
        }
        match std::fs::remove_file(self.record_path(table)) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    fn tables(&self) -> Result<Vec<RoutingTableId>, WeirError> {
        let mut tables = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let path = entry?.path();
            // skip lock files and records that are still being written
            if path.extension().and_then(|ext| ext.to_str()) != Some(RING_EXT) {
                continue;
            }
            if let Some(record) = Self::load(&path)? {
                tables.push(record.table);
            }
        }
        tables.sort();
        Ok(tables)
    }
}
