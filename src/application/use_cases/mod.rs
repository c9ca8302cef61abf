//! Use Cases - Single-purpose application operations

pub mod add_app;
pub mod launch_app;

pub use add_app::{AddAppUseCase, AddOutcome, AddSource};
pub use launch_app::{LaunchAppUseCase, LaunchOutcome};
