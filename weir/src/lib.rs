//! Weir routes items across weighted destinations with jump consistent hashing
//!
//! This crate re-exports [`weir_core`] and provides the `weir` diagnostics tool.

pub mod report;

pub use weir_core::*;
