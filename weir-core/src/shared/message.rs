//! A basic routable message

use std::collections::HashMap;

use super::traits::Routable;
use super::types::{Property, Value};

/// A message that can be routed by weir
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// The routing keys this message was published with
    routing_keys: Vec<String>,
    /// The headers set on this message
    headers: HashMap<String, Value>,
    /// The correlation id for this message
    correlation_id: Option<String>,
    /// The id for this message
    message_id: Option<String>,
    /// When this message was published in seconds since the epoch
    timestamp: Option<u64>,
}

impl Message {
    /// Create a new message with a single routing key
    ///
    /// # Arguments
    ///
    /// * `routing_key` - The routing key to publish with
    pub fn new<T: Into<String>>(routing_key: T) -> Self {
        Message {
            routing_keys: vec![routing_key.into()],
            ..Default::default()
        }
    }

    /// Add another routing key to this message
    ///
    /// # Arguments
    ///
    /// * `routing_key` - The routing key to add
    #[must_use]
    pub fn with_routing_key<T: Into<String>>(mut self, routing_key: T) -> Self {
        self.routing_keys.push(routing_key.into());
        self
    }

    /// Set a header on this message
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the header
    /// * `value` - The value to set
    #[must_use]
    pub fn with_header<N: Into<String>, V: Into<Value>>(mut self, name: N, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the correlation id for this message
    #[must_use]
    pub fn with_correlation_id<T: Into<String>>(mut self, correlation_id: T) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Set the message id for this message
    #[must_use]
    pub fn with_message_id<T: Into<String>>(mut self, message_id: T) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Set the timestamp for this message
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Routable for Message {
    fn routing_keys(&self) -> &[String] {
        &self.routing_keys
    }

    fn header(&self, name: &str) -> Option<Value> {
        self.headers.get(name).cloned()
    }

    fn property(&self, property: Property) -> Option<Value> {
        match property {
            Property::CorrelationId => self.correlation_id.clone().map(Value::Str),
            Property::MessageId => self.message_id.clone().map(Value::Str),
            Property::Timestamp => self.timestamp.map(Value::Timestamp),
        }
    }
}
