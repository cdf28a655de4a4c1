//! The identifiers and values that weir routes with

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::RoutingError;

/// The identifier for a single routing table
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct RoutingTableId {
    /// The scope (virtual host) this table lives in
    pub scope: String,
    /// The name of this table within its scope
    pub name: String,
}

impl RoutingTableId {
    /// Build a new routing table id
    ///
    /// # Arguments
    ///
    /// * `scope` - The scope this table lives in
    /// * `name` - The name of this table
    pub fn new<S: Into<String>, N: Into<String>>(scope: S, name: N) -> Self {
        RoutingTableId {
            scope: scope.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RoutingTableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.name)
    }
}

/// A target that items can be routed to
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct Destination(String);

impl Destination {
    /// Build a new destination
    pub fn new<T: Into<String>>(name: T) -> Self {
        Destination(name.into())
    }

    /// Get the name of this destination
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Destination {
    fn from(name: &str) -> Self {
        Destination::new(name)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A weighted binding from a routing table to a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Where items matching this binding go
    pub destination: Destination,
    /// The number of buckets this binding owns
    pub weight: u32,
}

impl Binding {
    /// Build a new binding
    ///
    /// # Arguments
    ///
    /// * `destination` - The destination to bind
    /// * `weight` - The number of buckets to give this destination
    pub fn new<D: Into<Destination>>(destination: D, weight: u32) -> Self {
        Binding {
            destination: destination.into(),
            weight,
        }
    }
}

/// A typed header or property value on an item
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A text value
    Str(String),
    /// A raw byte value
    Bytes(Vec<u8>),
    /// A signed integer value
    Int(i64),
    /// A boolean value
    Bool(bool),
    /// A timestamp in seconds since the epoch
    Timestamp(u64),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// The item properties that can be hashed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The correlation id of an item
    CorrelationId,
    /// The message id of an item
    MessageId,
    /// The timestamp of an item
    Timestamp,
}

impl Property {
    /// Get the name this property is configured with
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::CorrelationId => "correlation-id",
            Property::MessageId => "message-id",
            Property::Timestamp => "timestamp",
        }
    }
}

impl FromStr for Property {
    type Err = RoutingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "correlation-id" | "correlation_id" => Ok(Property::CorrelationId),
            "message-id" | "message_id" => Ok(Property::MessageId),
            "timestamp" => Ok(Property::Timestamp),
            _ => Err(RoutingError::UnsupportedProperty(raw.to_owned())),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
