//! Domain entities and the cluster object shapes they are projected from.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Condition type that decides node readiness.
pub const READY_CONDITION: &str = "Ready";

/// Version shown for nodes whose status could not be read.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Ports exposed by the CloudCore service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CloudCorePorts {
    /// Port edge nodes join on (keadm --cloudcore-ipport)
    pub port: String,
    /// WebSocket tunnel port
    pub ws_port: String,
    /// QUIC tunnel port
    pub quic_port: String,
    /// HTTPS certificate port
    pub https_port: String,
}

impl Default for CloudCorePorts {
    fn default() -> Self {
        Self {
            port: "10000".into(),
            ws_port: "10000".into(),
            quic_port: "10001".into(),
            https_port: "10002".into(),
        }
    }
}

/// Address of the CloudCore service as seen from inside the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudCoreEndpoint {
    pub ip: String,
    pub ports: CloudCorePorts,
}

impl CloudCoreEndpoint {
    /// Build the endpoint from `kubectl get svc cloudcore -o json` output.
    pub fn from_service_json(json: &str, ports: &CloudCorePorts) -> Result<Self, DomainError> {
        let svc: ServiceObject =
            serde_json::from_str(json).map_err(|source| DomainError::MalformedObject {
                object: "service",
                source,
            })?;
        Ok(Self {
            ip: svc.spec.cluster_ip,
            ports: ports.clone(),
        })
    }
}

/// Readiness and version summary of one edge node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeNodeStatus {
    pub name: String,
    pub ready: bool,
    pub version: String,
    /// condition type -> condition status ("True", "False", "Unknown")
    pub conditions: BTreeMap<String, String>,
}

impl EdgeNodeStatus {
    /// Project `kubectl get node <name> -o json` output.
    ///
    /// `ready` is true only when the `Ready` condition reports exactly `"True"`.
    pub fn from_node_json(name: &str, json: &str) -> Result<Self, DomainError> {
        let node: NodeObject =
            serde_json::from_str(json).map_err(|source| DomainError::MalformedObject {
                object: "node",
                source,
            })?;

        let mut ready = false;
        let mut conditions = BTreeMap::new();
        for condition in node.status.conditions {
            if condition.condition_type == READY_CONDITION {
                ready = condition.status == "True";
            }
            conditions.insert(condition.condition_type, condition.status);
        }

        Ok(Self {
            name: name.to_string(),
            ready,
            version: node.status.node_info.kubelet_version,
            conditions,
        })
    }

    /// Placeholder for a node whose object could not be fetched.
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ready: false,
            version: UNKNOWN_VERSION.to_string(),
            conditions: BTreeMap::new(),
        }
    }
}

impl fmt::Display for EdgeNodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// Host part of a `host:port` pair; IPv6 literals are bracketed.
pub fn cloudcore_host(address: &str) -> String {
    if address.parse::<Ipv6Addr>().is_ok() {
        format!("[{address}]")
    } else {
        address.to_string()
    }
}

/// Inputs of the edge node join script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinScriptParams {
    pub node_name: String,
    /// Host as it goes in front of `:port`, see [`cloudcore_host`]
    pub cloudcore_ip: String,
    pub cloudcore_port: String,
    pub kubeedge_version: String,
}

/// Inputs of the ROS2 edge deployment manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ros2AppParams {
    pub app_name: String,
    pub image: String,
    pub domain_id: u16,
}

impl Ros2AppParams {
    /// Name of the rendered Deployment (`<app>-edge`).
    pub fn deployment_name(&self) -> String {
        format!("{}-edge", self.app_name)
    }
}

/// Inputs of the local edge node simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationParams {
    pub node_name: String,
    pub worker_node: String,
    pub domain_id: u16,
}

/// Turn newline-delimited `jq -r` output into names, dropping blank lines.
pub fn parse_node_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// jq filter selecting the names of nodes carrying `key=value` as a label.
///
/// Key and value are emitted as JSON string literals, which jq accepts verbatim,
/// so label keys with dots or slashes work.
pub fn edge_node_filter(label_key: &str, label_value: &str) -> String {
    let key = serde_json::Value::from(label_key).to_string();
    let value = serde_json::Value::from(label_value).to_string();
    format!(".items[] | select(.metadata.labels[{key}] == {value}) | .metadata.name")
}

// ============================================================
// CLUSTER OBJECT SHAPES
// ============================================================

#[derive(Debug, Deserialize)]
struct ServiceObject {
    spec: ServiceSpec,
}

#[derive(Debug, Deserialize)]
struct ServiceSpec {
    #[serde(rename = "clusterIP")]
    cluster_ip: String,
}

#[derive(Debug, Deserialize)]
struct NodeObject {
    status: NodeStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeStatus {
    node_info: NodeInfo,
    conditions: Vec<NodeCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeInfo {
    kubelet_version: String,
}

#[derive(Debug, Deserialize)]
struct NodeCondition {
    #[serde(rename = "type")]
    condition_type: String,
    status: String,
}
