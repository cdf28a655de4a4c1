//! Any errors that can be encountered when routing with Weir

use crate::shared::types::RoutingTableId;

/// Any errors that can be encountered when routing with Weir
#[derive(Debug)]
pub enum WeirError {
    /// An error specific to Weir routing code
    Routing(RoutingError),
    /// An IO error
    IO(std::io::Error),
    /// An config parsing error
    Config(config::ConfigError),
    /// An rkyv error
    Rkyv(rkyv::rancor::Error),
    /// A json serialization error
    Json(serde_json::Error),
    /// Tracing was already setup for this process
    TracingInit(tracing_subscriber::util::TryInitError),
}

impl std::fmt::Display for WeirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeirError::Routing(error) => write!(f, "{error}"),
            WeirError::IO(error) => write!(f, "IO error: {error}"),
            WeirError::Config(error) => write!(f, "Config error: {error}"),
            WeirError::Rkyv(error) => write!(f, "Rkyv error: {error}"),
            WeirError::Json(error) => write!(f, "Json error: {error}"),
            WeirError::TracingInit(error) => write!(f, "Tracing error: {error}"),
        }
    }
}

impl std::error::Error for WeirError {}

impl From<RoutingError> for WeirError {
    /// Convert this error to our error type
    ///
    /// # Arguments
    ///
    /// * `error` - The error to convert
    fn from(error: RoutingError) -> Self {
        WeirError::Routing(error)
    }
}

impl From<config::ConfigError> for WeirError {
    /// Convert this error to our error type
    ///
    /// # Arguments
    ///
    /// * `error` - The error to convert
    fn from(error: config::ConfigError) -> Self {
        WeirError::Config(error)
    }
}

impl From<std::io::Error> for WeirError {
    /// Convert this error to our error type
    ///
    /// # Arguments
    ///
    /// * `error` - The error to convert
    fn from(error: std::io::Error) -> Self {
        WeirError::IO(error)
    }
}

impl From<rkyv::rancor::Error> for WeirError {
    /// Convert this error to our error type
    ///
    /// # Arguments
    ///
    /// * `error` - The error to convert
    fn from(error: rkyv::rancor::Error) -> Self {
        WeirError::Rkyv(error)
    }
}

impl From<serde_json::Error> for WeirError {
    fn from(error: serde_json::Error) -> Self {
        WeirError::Json(error)
    }
}

impl From<tracing_subscriber::util::TryInitError> for WeirError {
    fn from(error: tracing_subscriber::util::TryInitError) -> Self {
        WeirError::TracingInit(error)
    }
}

/// The errors specific to Weir routing code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Both a header and a property were set to hash on
    ConfigConflict { header: String, property: String },
    /// A property we do not know how to hash on
    UnsupportedProperty(String),
    /// A binding key that is not an integer
    InvalidBindingKey(String),
    /// A binding key that is an integer but not a usable weight
    InvalidWeight(String),
    /// A routing table has bindings but its ring was never created
    RingStateMissing(RoutingTableId),
    /// A routing table does not exist
    NotFound(RoutingTableId),
    /// A selected bucket is not in the ring
    BucketNotFound { table: RoutingTableId, bucket: u32 },
    /// Adding this weight would run past the last possible bucket
    BucketOverflow { next: u32, weight: u32 },
    /// A stored ring record belongs to a different table with the same record name
    RecordCollision {
        table: RoutingTableId,
        found: RoutingTableId,
    },
    /// A stored ring is not densely numbered
    CorruptRing(RoutingTableId),
}

impl std::fmt::Display for RoutingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingError::ConfigConflict { header, property } => write!(
                f,
                "Cannot hash on both header '{header}' and property '{property}'"
            ),
            RoutingError::UnsupportedProperty(name) => {
                write!(f, "Unsupported property '{name}' to hash on")
            }
            RoutingError::InvalidBindingKey(key) => {
                write!(f, "Binding key '{key}' is not an integer")
            }
            RoutingError::InvalidWeight(key) => {
                write!(f, "Binding key '{key}' is not a weight greater than 0")
            }
            RoutingError::RingStateMissing(table) => {
                write!(f, "No ring state exists for routing table {table}")
            }
            RoutingError::NotFound(table) => write!(f, "Routing table {table} not found"),
            RoutingError::BucketNotFound { table, bucket } => {
                write!(f, "Bucket {bucket} not found in routing table {table}")
            }
            RoutingError::BucketOverflow { next, weight } => {
                write!(f, "Cannot add weight {weight} to a ring of {next} buckets")
            }
            RoutingError::RecordCollision { table, found } => write!(
                f,
                "Ring record for routing table {table} is held by routing table {found}"
            ),
            RoutingError::CorruptRing(table) => {
                write!(f, "Stored ring for routing table {table} is not densely numbered")
            }
        }
    }
}

impl std::error::Error for RoutingError {}
