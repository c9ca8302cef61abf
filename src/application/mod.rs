//! Application Layer - Use Cases and Business Workflows
//!
//! This layer orchestrates domain entities and defines application-specific workflows.
//! It contains:
//! - **Use Cases**: Single-purpose operations (LaunchApp, AddApp)
//! - **Ports**: Interfaces for external dependencies (backend, clock)
//! - **Services**: Session state (catalog store, sync engine, confirmation gate, wallpaper)
//!
//! # Clean Architecture Rules
//! - Depends on the domain layer and on the persistence gateway it writes through
//! - Defines ports that adapters implement
//! - Contains no presentation code

pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use ports::*;
pub use services::*;
pub use use_cases::*;
