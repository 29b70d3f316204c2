//! edgectl: manage KubeEdge edge nodes and ROS2 edge workloads
//!
//! Cluster access goes exclusively through `kubectl` (and `jq`) subprocesses;
//! artifacts are rendered from fixed templates.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
