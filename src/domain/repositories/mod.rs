//! Domain Repository Interfaces
//!
//! These are trait definitions only - no implementations beyond null
//! objects. Real implementations belong in the adapters/gateways layer.

pub mod key_value_store;

pub use key_value_store::{KeyValueStore, NullKeyValueStore};
