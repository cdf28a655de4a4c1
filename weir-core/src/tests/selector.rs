//! Picking hash keys off of items.

use crate::errors::RoutingError;
use crate::jump;
use crate::selector::{HashConfig, HashKey};
use crate::shared::message::Message;
use crate::shared::types::{Property, Value};

#[test]
fn test_no_args_hashes_routing_keys() {
    assert_eq!(HashConfig::from_args(None, None), Ok(HashConfig::RoutingKey));
    assert_eq!(
        HashConfig::from_args(Some(""), Some("")),
        Ok(HashConfig::RoutingKey)
    );
}

#[test]
fn test_header_and_property_conflict() {
    assert_eq!(
        HashConfig::from_args(Some("user"), Some("message-id")),
        Err(RoutingError::ConfigConflict {
            header: "user".to_owned(),
            property: "message-id".to_owned(),
        })
    );
}

#[test]
fn test_supported_properties() {
    assert_eq!(
        HashConfig::from_args(None, Some("correlation-id")),
        Ok(HashConfig::Property(Property::CorrelationId))
    );
    assert_eq!(
        HashConfig::from_args(None, Some("message_id")),
        Ok(HashConfig::Property(Property::MessageId))
    );
    assert_eq!(
        HashConfig::from_args(None, Some("timestamp")),
        Ok(HashConfig::Property(Property::Timestamp))
    );
}

#[test]
fn test_unsupported_property() {
    assert_eq!(
        HashConfig::from_args(None, Some("reply-to")),
        Err(RoutingError::UnsupportedProperty("reply-to".to_owned()))
    );
}

#[test]
fn test_routing_key_list() {
    let msg = Message::new("first").with_routing_key("second");
    let key = HashConfig::RoutingKey.key(&msg).unwrap();
    assert_eq!(
        key,
        HashKey::List(vec![
            HashKey::Bytes(b"first".to_vec()),
            HashKey::Bytes(b"second".to_vec()),
        ])
    );
    // only the first routing key matters
    assert_eq!(key.seed(), HashKey::Bytes(b"first".to_vec()).seed());
}

#[test]
fn test_missing_header_and_property_have_no_key() {
    let msg = Message::new("k");
    assert_eq!(HashConfig::Header("user".to_owned()).key(&msg), None);
    assert_eq!(HashConfig::Property(Property::MessageId).key(&msg), None);
}

#[test]
fn test_property_keys() {
    let msg = Message::new("k")
        .with_correlation_id("c-1")
        .with_message_id("m-1")
        .with_timestamp(1234);
    assert_eq!(
        HashConfig::Property(Property::CorrelationId).key(&msg),
        Some(HashKey::Bytes(b"c-1".to_vec()))
    );
    assert_eq!(
        HashConfig::Property(Property::MessageId).key(&msg),
        Some(HashKey::Bytes(b"m-1".to_vec()))
    );
    assert_eq!(
        HashConfig::Property(Property::Timestamp).key(&msg),
        Some(HashKey::Bytes(b"1234".to_vec()))
    );
}

#[test]
fn test_header_value_types() {
    assert_eq!(HashKey::from(Value::Int(-5)), HashKey::Int(-5));
    assert_eq!(
        HashKey::from(Value::Bool(true)),
        HashKey::Bytes(b"true".to_vec())
    );
    assert_eq!(
        HashKey::from(Value::Bytes(vec![1, 2])),
        HashKey::Bytes(vec![1, 2])
    );
    // strings and raw bytes with the same content hash the same
    assert_eq!(
        HashKey::from(Value::from("abc")).seed(),
        HashKey::from(Value::Bytes(b"abc".to_vec())).seed()
    );
}

#[test]
fn test_integer_keys_seed_directly() {
    assert_eq!(HashKey::Int(42).seed(), 42);
    assert_eq!(HashKey::Int(-1).seed(), u64::MAX);
    assert_eq!(jump::select(&HashKey::Int(42), 1), 0);
}

#[test]
fn test_empty_list_still_has_a_seed() {
    let empty = HashKey::List(Vec::new());
    assert_eq!(empty.seed(), HashKey::Bytes(Vec::new()).seed());
}
