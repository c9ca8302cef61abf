//! Application Ports - Interfaces to the outside world
//!
//! Ports are implemented by adapters; the application layer depends only
//! on these traits.

pub mod backend_gateway;
pub mod clock_port;

pub use backend_gateway::{BackendGateway, DiscoveredApp, NullBackendGateway};
pub use clock_port::{ClockPort, FixedClock, SystemClock};
