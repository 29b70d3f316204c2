//! Cluster queries and mutations through kubectl
//!
//! Every call shells out to the configured kubectl binary; node listing pipes
//! the node list through jq to select edge nodes by label.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::command_failed;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{edge_node_filter, parse_node_names, CloudCoreEndpoint, EdgeNodeStatus};
use crate::infrastructure::traits::CommandRunner;

/// Name of the CloudCore Service and Deployment.
pub const CLOUDCORE: &str = "cloudcore";

/// Read-mostly access to cluster objects.
pub struct ClusterService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl ClusterService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// CloudCore's cluster IP plus the configured tunnel ports.
    #[instrument(skip(self))]
    pub fn cloudcore_endpoint(&self) -> ApplicationResult<CloudCoreEndpoint> {
        let namespace = self.settings.namespace.as_str();
        let json = self.kubectl(&["get", "svc", CLOUDCORE, "-n", namespace, "-o", "json"])?;
        let endpoint = CloudCoreEndpoint::from_service_json(&json, &self.settings.cloudcore)?;
        debug!("cloudcore_endpoint: ip={}", endpoint.ip);
        Ok(endpoint)
    }

    /// Names of all nodes carrying the configured edge label.
    #[instrument(skip(self))]
    pub fn list_edge_nodes(&self) -> ApplicationResult<Vec<String>> {
        let nodes = self.kubectl(&["get", "nodes", "-o", "json"])?;
        if nodes.trim().is_empty() {
            return Ok(Vec::new());
        }

        let filter = edge_node_filter(
            &self.settings.edge_label_key,
            &self.settings.edge_label_value,
        );
        let jq = self.settings.jq.as_str();
        let args = ["-r", filter.as_str()];
        debug!("list_edge_nodes: {} {:?}", jq, args);

        let output = self
            .cmd
            .run_with_stdin(jq, &args, &nodes)
            .with_command_context(jq, &args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed(jq, &args, &stderr, output.status.code()));
        }

        let names = parse_node_names(&String::from_utf8_lossy(&output.stdout));
        debug!("list_edge_nodes: found {} nodes", names.len());
        Ok(names)
    }

    /// Readiness, kubelet version and conditions of one node.
    #[instrument(skip(self))]
    pub fn edge_node_status(&self, node_name: &str) -> ApplicationResult<EdgeNodeStatus> {
        let json = self.kubectl(&["get", "node", node_name, "-o", "json"])?;
        let status = EdgeNodeStatus::from_node_json(node_name, &json)?;
        debug!(
            "edge_node_status: name={}, ready={}, version={}",
            status.name, status.ready, status.version
        );
        Ok(status)
    }

    /// Stream `kubectl get deployment cloudcore` to the terminal.
    #[instrument(skip(self))]
    pub fn show_cloudcore_deployment(&self) -> ApplicationResult<()> {
        let namespace = self.settings.namespace.as_str();
        self.kubectl_interactive(&["get", "deployment", CLOUDCORE, "-n", namespace])
    }

    /// Submit a manifest file with `kubectl apply -f`, streaming kubectl's output.
    #[instrument(skip(self))]
    pub fn apply_manifest(&self, path: &Path) -> ApplicationResult<()> {
        let path = path.to_string_lossy();
        self.kubectl_interactive(&["apply", "-f", path.as_ref()])
    }

    /// Run kubectl and return its stdout, failing on a non-zero exit.
    fn kubectl(&self, args: &[&str]) -> ApplicationResult<String> {
        let kubectl = self.settings.kubectl.as_str();
        debug!("kubectl: {} {:?}", kubectl, args);

        let output = self
            .cmd
            .run(kubectl, args)
            .with_command_context(kubectl, args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed(kubectl, args, &stderr, output.status.code()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn kubectl_interactive(&self, args: &[&str]) -> ApplicationResult<()> {
        let kubectl = self.settings.kubectl.as_str();
        debug!("kubectl_interactive: {} {:?}", kubectl, args);

        let status = self
            .cmd
            .run_interactive(kubectl, args)
            .with_command_context(kubectl, args)?;
        if !status.success() {
            return Err(command_failed(kubectl, args, "", status.code()));
        }
        Ok(())
    }
}
