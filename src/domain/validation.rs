//! Input validation for names that end up in cluster objects or shell scripts.

use std::net::{IpAddr, Ipv6Addr};
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::DomainError;

/// Highest ROS 2 domain id that maps to valid DDS ports on Linux.
pub const MAX_ROS_DOMAIN_ID: u16 = 232;

const MAX_SUBDOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
// `<app>-edge` must still fit in a DNS label
const MAX_APP_NAME_LEN: usize = MAX_LABEL_LEN - "-edge".len();

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"))
}

fn subdomain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .expect("valid regex")
    })
}

fn image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/:@-]*$").expect("valid regex"))
}

/// Node names are RFC 1123 subdomains.
pub fn validate_node_name(name: &str) -> Result<(), DomainError> {
    validate_subdomain("node name", name)
}

/// App names become `<app>-edge`, an RFC 1123 label.
pub fn validate_app_name(name: &str) -> Result<(), DomainError> {
    if name.len() > MAX_APP_NAME_LEN {
        return Err(DomainError::invalid_name(
            "app name",
            name,
            format!("must be at most {MAX_APP_NAME_LEN} characters"),
        ));
    }
    if !label_regex().is_match(name) {
        return Err(DomainError::invalid_name(
            "app name",
            name,
            "must consist of lowercase alphanumerics or '-', and start and end with an alphanumeric",
        ));
    }
    Ok(())
}

/// CloudCore address: an IP literal (IPv6 optionally bracketed) or a DNS name.
pub fn validate_cloudcore_address(address: &str) -> Result<(), DomainError> {
    if address.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    if let Some(inner) = address.strip_prefix('[').and_then(|a| a.strip_suffix(']')) {
        if inner.parse::<Ipv6Addr>().is_ok() {
            return Ok(());
        }
    }
    validate_subdomain("CloudCore address", address)
}

pub fn validate_image(image: &str) -> Result<(), DomainError> {
    if image_regex().is_match(image) {
        Ok(())
    } else {
        Err(DomainError::InvalidImage(image.to_string()))
    }
}

pub fn validate_domain_id(domain_id: u16) -> Result<(), DomainError> {
    if domain_id > MAX_ROS_DOMAIN_ID {
        return Err(DomainError::InvalidDomainId(domain_id));
    }
    Ok(())
}

fn validate_subdomain(kind: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() || value.len() > MAX_SUBDOMAIN_LEN {
        return Err(DomainError::invalid_name(
            kind,
            value,
            format!("must be 1 to {MAX_SUBDOMAIN_LEN} characters"),
        ));
    }
    if !subdomain_regex().is_match(value) {
        return Err(DomainError::invalid_name(
            kind,
            value,
            "must consist of lowercase alphanumerics, '-' or '.', and start and end with an alphanumeric",
        ));
    }
    Ok(())
}
