//! Domain layer: entities, templates and validation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod templates;
pub mod validation;

pub use entities::*;
pub use error::DomainError;
pub use templates::{render_join_script, render_ros2_deployment};
pub use validation::{
    validate_app_name, validate_cloudcore_address, validate_domain_id, validate_image,
    validate_node_name, MAX_ROS_DOMAIN_ID,
};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Falls back to the input unchanged when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
