//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::MAX_ROS_DOMAIN_ID;

/// Manage KubeEdge edge nodes and ROS2 edge workloads
#[derive(Parser, Debug)]
#[command(name = "edgectl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// KubeEdge namespace (overrides config)
    #[arg(short, long, global = true, env = "EDGECTL_NAMESPACE")]
    pub namespace: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show KubeEdge cluster status
    Status,

    /// Generate edge node join script
    #[command(name = "join-script")]
    JoinScript {
        /// Edge node name
        #[arg(long)]
        node_name: String,
        /// CloudCore IP
        #[arg(long)]
        cloudcore_ip: String,
        /// Output file path
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List edge nodes
    List,

    /// Simulate an edge node with ROS2
    #[command(name = "simulate-edge")]
    SimulateEdge {
        /// Edge node name
        #[arg(long, default_value = "robot-edge-01")]
        node_name: String,
        /// Kubernetes worker node
        #[arg(long, default_value = "robotics-dev-worker")]
        worker_node: String,
        /// ROS_DOMAIN_ID
        #[arg(long, default_value_t = 42, value_parser = domain_id_parser())]
        domain_id: u16,
        /// Simulation script (overrides config)
        #[arg(long, value_hint = ValueHint::FilePath)]
        script: Option<PathBuf>,
    },

    /// Deploy ROS2 app on edge
    #[command(name = "deploy-ros2")]
    DeployRos2 {
        /// Application name
        #[arg(long)]
        app_name: String,
        /// Container image
        #[arg(long)]
        image: String,
        /// ROS_DOMAIN_ID
        #[arg(long, default_value_t = 42, value_parser = domain_id_parser())]
        domain_id: u16,
        /// Output YAML file (applied with kubectl after writing)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config path
    Path,
}

fn domain_id_parser() -> clap::builder::RangedI64ValueParser<u16> {
    clap::value_parser!(u16).range(0..=i64::from(MAX_ROS_DOMAIN_ID))
}
