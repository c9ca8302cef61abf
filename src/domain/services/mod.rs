//! Domain Services - Stateless business logic
//!
//! Pure functions over domain entities with no I/O.

pub mod sort_engine;

pub use sort_engine::{compare_names, filter, sort, view};
