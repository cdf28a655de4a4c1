//! Tests for the weir-core crate.

mod helpers;
mod properties;
mod selector;
