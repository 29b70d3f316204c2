//! Local edge node simulation via the bundled bash script.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::command_failed;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{validate_domain_id, validate_node_name, SimulationParams};
use crate::infrastructure::traits::{CommandRunner, FileSystem};

/// Shell used to run the simulation script.
pub const SHELL: &str = "bash";

pub struct SimulationService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl SimulationService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
    ) -> Self {
        Self { fs, cmd, settings }
    }

    /// Run `bash <script> <node> <worker> <domain_id>` attached to the terminal.
    ///
    /// `script` overrides the configured `simulate_script`.
    #[instrument(skip(self))]
    pub fn run(&self, params: &SimulationParams, script: Option<&Path>) -> ApplicationResult<()> {
        validate_node_name(&params.node_name)?;
        validate_node_name(&params.worker_node)?;
        validate_domain_id(params.domain_id)?;

        let script = script.unwrap_or(self.settings.simulate_script.as_path());
        if !self.fs.is_file(script) {
            return Err(ApplicationError::ScriptNotFound(script.to_path_buf()));
        }

        let script_arg = script.to_string_lossy();
        let domain_id = params.domain_id.to_string();
        let args = [
            script_arg.as_ref(),
            params.node_name.as_str(),
            params.worker_node.as_str(),
            domain_id.as_str(),
        ];
        debug!("run: {} {:?}", SHELL, args);

        let status = self
            .cmd
            .run_interactive(SHELL, &args)
            .with_command_context(SHELL, &args)?;
        if !status.success() {
            return Err(command_failed(SHELL, &args, "", status.code()));
        }
        Ok(())
    }
}
