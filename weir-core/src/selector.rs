//! Picks the value on an item that gets hashed onto the ring

use tracing::instrument;
use xxhash_rust::xxh3::xxh3_64;

use crate::errors::RoutingError;
use crate::shared::traits::Routable;
use crate::shared::types::{Property, Value};

/// The argument that sets a header to hash on
pub const HASH_HEADER_ARG: &str = "hash-header";

/// The argument that sets a property to hash on
pub const HASH_PROPERTY_ARG: &str = "hash-property";

/// A key to hash onto a ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashKey {
    /// An integer that seeds the jump hash directly
    Int(i64),
    /// Raw bytes that get hashed down to a seed
    Bytes(Vec<u8>),
    /// A sequence of keys where only the first is used
    List(Vec<HashKey>),
}

impl HashKey {
    /// Reduce this key to the integer seed for a jump hash
    pub fn seed(&self) -> u64 {
        match self {
            HashKey::Int(value) => *value as u64,
            HashKey::Bytes(bytes) => xxh3_64(bytes),
            HashKey::List(keys) => match keys.first() {
                Some(first) => first.seed(),
                None => xxh3_64(&[]),
            },
        }
    }
}

impl From<Value> for HashKey {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(text) => HashKey::Bytes(text.into_bytes()),
            Value::Bytes(bytes) => HashKey::Bytes(bytes),
            Value::Int(int) => HashKey::Int(int),
            Value::Bool(flag) => HashKey::Bytes(flag.to_string().into_bytes()),
            // timestamps are hashed as text so they match a header set to the same string
            Value::Timestamp(secs) => HashKey::Bytes(secs.to_string().into_bytes()),
        }
    }
}

/// What part of an item to hash on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HashConfig {
    /// Hash on the item's routing keys
    #[default]
    RoutingKey,
    /// Hash on a named header
    Header(String),
    /// Hash on a named property
    Property(Property),
}

impl HashConfig {
    /// Build a hash config from a routing table's arguments
    ///
    /// Blank names are treated as if they were not set.
    ///
    /// # Arguments
    ///
    /// * `header` - The header to hash on if one was set
    /// * `property` - The property to hash on if one was set
    #[instrument(name = "HashConfig::from_args", err(Debug))]
    pub fn from_args(header: Option<&str>, property: Option<&str>) -> Result<Self, RoutingError> {
        // ignore any blank arguments
        let header = header.filter(|name| !name.is_empty());
        let property = property.filter(|name| !name.is_empty());
        match (header, property) {
            (Some(header), Some(property)) => Err(RoutingError::ConfigConflict {
                header: header.to_owned(),
                property: property.to_owned(),
            }),
            (Some(header), None) => Ok(HashConfig::Header(header.to_owned())),
            (None, Some(property)) => Ok(HashConfig::Property(property.parse()?)),
            (None, None) => Ok(HashConfig::RoutingKey),
        }
    }

    /// Get the key to hash for an item
    ///
    /// Returns `None` when the configured header or property is not set.
    ///
    /// # Arguments
    ///
    /// * `item` - The item to get a key from
    pub fn key<R: Routable>(&self, item: &R) -> Option<HashKey> {
        match self {
            HashConfig::RoutingKey => Some(HashKey::List(
                item.routing_keys()
                    .iter()
                    .map(|key| HashKey::Bytes(key.as_bytes().to_vec()))
                    .collect(),
            )),
            HashConfig::Header(name) => item.header(name).map(HashKey::from),
            HashConfig::Property(property) => item.property(*property).map(HashKey::from),
        }
    }
}
