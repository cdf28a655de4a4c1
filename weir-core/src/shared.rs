//! The types and traits shared by every part of weir

pub mod message;
pub mod traits;
pub mod types;
