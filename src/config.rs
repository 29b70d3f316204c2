//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/edgectl/edgectl.toml`
//! 3. Environment variables: `EDGECTL_*` prefix
//! 4. Command-line overrides (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, CloudCorePorts};

/// File name of the simulation script shipped next to the binary.
pub const SIMULATE_SCRIPT_NAME: &str = "simulate-edge-node.sh";

/// Unified configuration for edgectl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Namespace KubeEdge CloudCore is installed in
    pub namespace: String,
    /// KubeEdge release used by generated join scripts
    pub kubeedge_version: String,
    /// kubectl binary (name on PATH or absolute path)
    pub kubectl: String,
    /// jq binary (name on PATH or absolute path)
    pub jq: String,
    /// Node label key marking edge nodes
    pub edge_label_key: String,
    /// Value of `edge_label_key` on edge nodes
    pub edge_label_value: String,
    /// Script run by `simulate-edge`
    pub simulate_script: PathBuf,
    /// CloudCore service ports
    pub cloudcore: CloudCorePorts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: "kubeedge".into(),
            kubeedge_version: "1.15.0".into(),
            kubectl: "kubectl".into(),
            jq: "jq".into(),
            edge_label_key: "kubeedge".into(),
            edge_label_value: "true".into(),
            simulate_script: default_simulate_script(),
            cloudcore: CloudCorePorts::default(),
        }
    }
}

/// `simulate-edge-node.sh` beside the running executable.
fn default_simulate_script() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SIMULATE_SCRIPT_NAME)))
        .unwrap_or_else(|| PathBuf::from(SIMULATE_SCRIPT_NAME))
}

/// Raw CloudCore ports for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCloudCorePorts {
    pub port: Option<String>,
    pub ws_port: Option<String>,
    pub quic_port: Option<String>,
    pub https_port: Option<String>,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub namespace: Option<String>,
    pub kubeedge_version: Option<String>,
    pub kubectl: Option<String>,
    pub jq: Option<String>,
    pub edge_label_key: Option<String>,
    pub edge_label_value: Option<String>,
    pub simulate_script: Option<PathBuf>,
    pub cloudcore: RawCloudCorePorts,
}

/// Get the XDG config directory for edgectl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "edgectl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("edgectl.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl CloudCorePorts {
    fn merge(&self, overlay: &RawCloudCorePorts) -> Self {
        Self {
            port: overlay.port.clone().unwrap_or_else(|| self.port.clone()),
            ws_port: overlay.ws_port.clone().unwrap_or_else(|| self.ws_port.clone()),
            quic_port: overlay
                .quic_port
                .clone()
                .unwrap_or_else(|| self.quic_port.clone()),
            https_port: overlay
                .https_port
                .clone()
                .unwrap_or_else(|| self.https_port.clone()),
        }
    }
}

impl Settings {
    /// Load settings from defaults, the global config file and `EDGECTL_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_path` as the config file (skipped if absent).
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            namespace: overlay
                .namespace
                .clone()
                .unwrap_or_else(|| self.namespace.clone()),
            kubeedge_version: overlay
                .kubeedge_version
                .clone()
                .unwrap_or_else(|| self.kubeedge_version.clone()),
            kubectl: overlay
                .kubectl
                .clone()
                .unwrap_or_else(|| self.kubectl.clone()),
            jq: overlay.jq.clone().unwrap_or_else(|| self.jq.clone()),
            edge_label_key: overlay
                .edge_label_key
                .clone()
                .unwrap_or_else(|| self.edge_label_key.clone()),
            edge_label_value: overlay
                .edge_label_value
                .clone()
                .unwrap_or_else(|| self.edge_label_value.clone()),
            simulate_script: overlay
                .simulate_script
                .clone()
                .unwrap_or_else(|| self.simulate_script.clone()),
            cloudcore: self.cloudcore.merge(&overlay.cloudcore),
        }
    }

    /// Apply EDGECTL_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `EDGECTL_CLOUDCORE__PORT`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("EDGECTL").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("namespace") {
            settings.namespace = val;
        }
        if let Ok(val) = config.get_string("kubeedge_version") {
            settings.kubeedge_version = val;
        }
        if let Ok(val) = config.get_string("kubectl") {
            settings.kubectl = val;
        }
        if let Ok(val) = config.get_string("jq") {
            settings.jq = val;
        }
        if let Ok(val) = config.get_string("edge_label_key") {
            settings.edge_label_key = val;
        }
        if let Ok(val) = config.get_string("edge_label_value") {
            settings.edge_label_value = val;
        }
        if let Ok(val) = config.get_string("simulate_script") {
            settings.simulate_script = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("cloudcore.port") {
            settings.cloudcore.port = val;
        }
        if let Ok(val) = config.get_string("cloudcore.ws_port") {
            settings.cloudcore.ws_port = val;
        }
        if let Ok(val) = config.get_string("cloudcore.quic_port") {
            settings.cloudcore.quic_port = val;
        }
        if let Ok(val) = config.get_string("cloudcore.https_port") {
            settings.cloudcore.https_port = val;
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.simulate_script.to_string_lossy().as_ref());
        self.simulate_script = PathBuf::from(expanded);
        self.kubectl = expand_env_vars(&self.kubectl);
        self.jq = expand_env_vars(&self.jq);
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
