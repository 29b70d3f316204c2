//! Rendering and writing of generated artifacts (join script, deployment manifest).

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    cloudcore_host, render_join_script, render_ros2_deployment, validate_app_name,
    validate_cloudcore_address, validate_domain_id, validate_image, validate_node_name,
    JoinScriptParams, Ros2AppParams,
};
use crate::infrastructure::traits::FileSystem;

pub struct ManifestService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ManifestService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Join parameters for `node_name`, filled from settings.
    pub fn join_params(&self, node_name: &str, cloudcore_ip: &str) -> JoinScriptParams {
        JoinScriptParams {
            node_name: node_name.to_string(),
            cloudcore_ip: cloudcore_host(cloudcore_ip),
            cloudcore_port: self.settings.cloudcore.port.clone(),
            kubeedge_version: self.settings.kubeedge_version.clone(),
        }
    }

    /// Validate inputs and render the edge join script.
    #[instrument(skip(self))]
    pub fn join_script(&self, node_name: &str, cloudcore_ip: &str) -> ApplicationResult<String> {
        validate_node_name(node_name)?;
        validate_cloudcore_address(cloudcore_ip)?;
        let params = self.join_params(node_name, cloudcore_ip);
        debug!("join_script: kubeedge_version={}", params.kubeedge_version);
        Ok(render_join_script(&params))
    }

    /// Validate inputs and render the ROS2 deployment manifest.
    #[instrument(skip(self))]
    pub fn ros2_deployment(&self, params: &Ros2AppParams) -> ApplicationResult<String> {
        validate_app_name(&params.app_name)?;
        validate_image(&params.image)?;
        validate_domain_id(params.domain_id)?;
        debug!("ros2_deployment: deployment={}", params.deployment_name());
        Ok(render_ros2_deployment(params))
    }

    /// Write an artifact, creating parent directories as needed.
    pub fn write_artifact(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        debug!("write_artifact: path={}", path.display());
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, content)
            .with_path_context("write file", path)
    }

    /// Write a join script and mark it executable.
    pub fn write_script(&self, path: &Path, script: &str) -> ApplicationResult<()> {
        self.write_artifact(path, script)?;
        self.fs
            .set_executable(path)
            .with_path_context("set executable", path)
    }
}
