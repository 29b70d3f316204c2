//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod cluster;
mod manifest;
mod simulation;

pub use cluster::ClusterService;
pub use manifest::ManifestService;
pub use simulation::SimulationService;
