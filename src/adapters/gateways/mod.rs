//! Gateways - implementations of repository interfaces and ports
//!
//! Key-value stores and the persistence gateway implement durable state;
//! the backends implement `BackendGateway`.

pub mod file_store;
pub mod local_backend;
pub mod memory_backend;
pub mod memory_store;
pub mod persistence_gateway;
pub mod timeout_gateway;

pub use file_store::FileStore;
pub use local_backend::LocalBackend;
pub use memory_backend::MemoryBackend;
pub use memory_store::MemoryStore;
pub use persistence_gateway::PersistenceGateway;
pub use timeout_gateway::TimeoutGateway;
