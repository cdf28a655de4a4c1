//! The traits an item must support to be routed by weir

use super::types::{Property, Value};

/// The routing data an item exposes to a hash selector
pub trait Routable {
    /// Get the routing keys for this item
    fn routing_keys(&self) -> &[String];

    /// Get a header from this item if it is set
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the header to get
    fn header(&self, name: &str) -> Option<Value>;

    /// Get a property from this item if it is set
    ///
    /// # Arguments
    ///
    /// * `property` - The property to get
    fn property(&self, property: Property) -> Option<Value>;
}
