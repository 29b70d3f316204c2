//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors represent invalid input or unexpected object shapes.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidName {
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid ROS domain id {0}: must be between 0 and {max}", max = crate::domain::MAX_ROS_DOMAIN_ID)]
    InvalidDomainId(u16),

    #[error("invalid container image '{0}'")]
    InvalidImage(String),

    #[error("malformed {object} object: {source}")]
    MalformedObject {
        object: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DomainError {
    pub(crate) fn invalid_name(
        kind: &'static str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidName {
            kind,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
