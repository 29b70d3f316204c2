//! Infrastructure layer: process and filesystem access, service wiring
//!
//! Real implementations of the I/O boundary traits live here, next to the
//! container that hands them to the application services.

pub mod di;
pub mod error;
pub mod traits;

pub use di::ServiceContainer;
pub use error::InfraError;
