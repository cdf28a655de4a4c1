//! Weighted routing tables built on jump consistent hashing
//!
//! Each routing table keeps a dense ring of buckets where every destination
//! owns as many buckets as its weight. Items are hashed onto a bucket with
//! jump consistent hashing and routed to whoever owns it.

pub mod binding;
pub mod conf;
pub mod errors;
pub mod jump;
pub mod ring;
pub mod router;
pub mod selector;
pub mod shared;
pub mod storage;
pub mod trace;

#[cfg(test)]
mod tests;

pub use conf::Conf;
pub use errors::{RoutingError, WeirError};
pub use ring::RingState;
pub use router::HashRouter;
pub use selector::{HashConfig, HashKey};
pub use shared::message::Message;
pub use shared::traits::Routable;
pub use shared::types::{Binding, Destination, Property, RoutingTableId, Value};
pub use storage::{FileSystemStore, MemoryStore, RingStore, Stores};
