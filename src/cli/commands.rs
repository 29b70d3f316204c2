//! Command dispatch
//!
//! Query commands (`status`, `list`) report cluster errors and carry on with
//! empty results. Commands producing or submitting artifacts fail hard.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument, warn};

use crate::application::services::ClusterService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{CloudCoreEndpoint, EdgeNodeStatus, Ros2AppParams, SimulationParams};
use crate::infrastructure::ServiceContainer;

/// Parse-independent entry point: load settings, wire services, dispatch.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| CliError::Usage(e.to_string()))?;
            Ok(())
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(_) => {
            let settings = load_settings(cli)?;
            let container = ServiceContainer::new(settings);
            execute_with(cli, &container)
        }
    }
}

/// Dispatch `cli` against an already wired container.
pub fn execute_with(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Status) => cmd_status(container),
        Some(Commands::JoinScript {
            node_name,
            cloudcore_ip,
            output,
        }) => cmd_join_script(container, node_name, cloudcore_ip, output.as_deref()),
        Some(Commands::List) => cmd_list(container),
        Some(Commands::SimulateEdge {
            node_name,
            worker_node,
            domain_id,
            script,
        }) => {
            let params = SimulationParams {
                node_name: node_name.clone(),
                worker_node: worker_node.clone(),
                domain_id: *domain_id,
            };
            cmd_simulate_edge(container, &params, script.as_deref())
        }
        Some(Commands::DeployRos2 {
            app_name,
            image,
            domain_id,
            output,
        }) => {
            let params = Ros2AppParams {
                app_name: app_name.clone(),
                image: image.clone(),
                domain_id: *domain_id,
            };
            cmd_deploy_ros2(container, &params, output.as_deref())
        }
        Some(Commands::Config { command }) => cmd_config(container, command),
        Some(Commands::Completion { .. }) | None => Err(CliError::Usage(
            "no cluster command given".to_string(),
        )),
    }
}

/// Settings from config file and environment, then CLI overrides.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(namespace) = &cli.namespace {
        settings.namespace = namespace.clone();
    }
    debug!("load_settings: {:?}", settings);
    Ok(settings)
}

// ============================================================
// QUERY COMMANDS (degrade to empty results)
// ============================================================

fn report_query_error(action: &str, err: &ApplicationError) {
    warn!("{}: {}", action, err);
    output::error(&format!("{}: {}", action, err));
}

/// Edge node names, or none when the cluster cannot be queried.
pub fn edge_nodes_or_empty(cluster: &ClusterService) -> Vec<String> {
    cluster.list_edge_nodes().unwrap_or_else(|e| {
        report_query_error("listing edge nodes", &e);
        Vec::new()
    })
}

/// Status of every edge node; unreadable nodes show as not ready.
pub fn edge_node_report(cluster: &ClusterService) -> Vec<EdgeNodeStatus> {
    edge_nodes_or_empty(cluster)
        .iter()
        .map(|name| {
            cluster.edge_node_status(name).unwrap_or_else(|e| {
                report_query_error(&format!("getting status for {}", name), &e);
                EdgeNodeStatus::unknown(name)
            })
        })
        .collect()
}

pub fn cloudcore_endpoint_or_none(cluster: &ClusterService) -> Option<CloudCoreEndpoint> {
    cluster
        .cloudcore_endpoint()
        .map_err(|e| report_query_error("getting CloudCore endpoint", &e))
        .ok()
}

/// Lines of the `Edge Nodes:` section of the status report.
pub fn edge_node_lines(nodes: &[EdgeNodeStatus]) -> Vec<String> {
    if nodes.is_empty() {
        return vec![output::detail_line("No edge nodes registered")];
    }
    nodes
        .iter()
        .map(|node| {
            if node.ready {
                output::ready_line(node)
            } else {
                output::not_ready_line(node)
            }
        })
        .collect()
}

/// Lines of the `CloudCore Endpoint:` section; `-` stands in for an unknown endpoint.
pub fn endpoint_lines(endpoint: Option<&CloudCoreEndpoint>) -> Vec<String> {
    let (ip, ws, quic) = match endpoint {
        Some(e) => (e.ip.as_str(), e.ports.port.as_str(), e.ports.quic_port.as_str()),
        None => ("-", "-", "-"),
    };
    vec![
        output::field_line("IP", ip),
        output::field_line("WebSocket", ws),
        output::field_line("QUIC", quic),
    ]
}

#[instrument(skip(container))]
fn cmd_status(container: &ServiceContainer) -> CliResult<()> {
    let cluster = &container.cluster;

    output::header("=== KubeEdge Cluster Status ===");
    output::info("");

    output::section("CloudCore:");
    if let Err(e) = cluster.show_cloudcore_deployment() {
        report_query_error("showing CloudCore deployment", &e);
    }

    output::info("");
    output::section("Edge Nodes:");
    for line in edge_node_lines(&edge_node_report(cluster)) {
        output::info(&line);
    }

    output::info("");
    output::section("CloudCore Endpoint:");
    for line in endpoint_lines(cloudcore_endpoint_or_none(cluster).as_ref()) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer) -> CliResult<()> {
    for node in edge_nodes_or_empty(&container.cluster) {
        output::info(&node);
    }
    Ok(())
}

// ============================================================
// ARTIFACT COMMANDS
// ============================================================

#[instrument(skip(container))]
fn cmd_join_script(
    container: &ServiceContainer,
    node_name: &str,
    cloudcore_ip: &str,
    output_path: Option<&Path>,
) -> CliResult<()> {
    let script = container.manifests.join_script(node_name, cloudcore_ip)?;
    match output_path {
        Some(path) => {
            container.manifests.write_script(path, &script)?;
            output::info(&format!("Join script written to {}", path.display()));
        }
        None => output::info(&script),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_deploy_ros2(
    container: &ServiceContainer,
    params: &Ros2AppParams,
    output_path: Option<&Path>,
) -> CliResult<()> {
    let manifest = container.manifests.ros2_deployment(params)?;
    match output_path {
        Some(path) => {
            container.manifests.write_artifact(path, &manifest)?;
            output::info(&format!("Deployment YAML written to {}", path.display()));
            container.cluster.apply_manifest(path)?;
        }
        None => output::info(&manifest),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_simulate_edge(
    container: &ServiceContainer,
    params: &SimulationParams,
    script: Option<&Path>,
) -> CliResult<()> {
    output::info(&format!("Simulating edge node: {}", params.node_name));
    output::info(&format!("Worker node: {}", params.worker_node));
    output::info(&format!("ROS Domain ID: {}", params.domain_id));
    output::info("");

    container.simulation.run(params, script)?;
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::info(&path.display());
                if !path.exists() {
                    output::warning("config file does not exist (defaults in use)");
                }
            }
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
