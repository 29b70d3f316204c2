//! Shared test doubles

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use edgectl::config::Settings;
use edgectl::infrastructure::traits::{CommandRunner, RealFileSystem};
use edgectl::infrastructure::ServiceContainer;

/// One recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub interactive: bool,
}

enum Response {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    SpawnError,
}

/// Command runner returning canned responses per program, in FIFO order.
///
/// Programs without a queued response exit 0 with empty output.
#[derive(Default)]
pub struct MockCommandRunner {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<HashMap<String, VecDeque<Response>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, program: &str, code: i32, stdout: &str, stderr: &str) -> &Self {
        self.push(
            program,
            Response::Exit {
                code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn ok(&self, program: &str, stdout: &str) -> &Self {
        self.respond(program, 0, stdout, "")
    }

    pub fn fail_to_spawn(&self, program: &str) -> &Self {
        self.push(program, Response::SpawnError);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, program: &str, response: Response) {
        self.responses
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(response);
    }

    fn next(
        &self,
        cmd: &str,
        args: &[&str],
        stdin: Option<&str>,
        interactive: bool,
    ) -> io::Result<(ExitStatus, String, String)> {
        self.calls.lock().unwrap().push(Call {
            program: cmd.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            stdin: stdin.map(String::from),
            interactive,
        });
        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(cmd)
            .and_then(|queue| queue.pop_front());
        match response {
            Some(Response::Exit {
                code,
                stdout,
                stderr,
            }) => Ok((ExitStatus::from_raw(code << 8), stdout, stderr)),
            Some(Response::SpawnError) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{cmd}: not found"),
            )),
            None => Ok((ExitStatus::from_raw(0), String::new(), String::new())),
        }
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let (status, stdout, stderr) = self.next(cmd, args, None, false)?;
        Ok(Output {
            status,
            stdout: stdout.into_bytes(),
            stderr: stderr.into_bytes(),
        })
    }

    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        let (status, stdout, stderr) = self.next(cmd, args, Some(stdin), false)?;
        Ok(Output {
            status,
            stdout: stdout.into_bytes(),
            stderr: stderr.into_bytes(),
        })
    }

    fn run_interactive(&self, cmd: &str, args: &[&str]) -> io::Result<ExitStatus> {
        self.next(cmd, args, None, true).map(|(status, _, _)| status)
    }
}

/// Settings independent of the host's config file and environment.
pub fn test_settings(simulate_script: PathBuf) -> Settings {
    Settings {
        simulate_script,
        ..Settings::default()
    }
}

/// Container using the real filesystem and the given mock runner.
pub fn container(settings: Settings, cmd: Arc<MockCommandRunner>) -> ServiceContainer {
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), cmd)
}

pub const NODES_JSON: &str = r#"{"apiVersion": "v1", "kind": "List", "items": []}"#;

pub fn node_json(ready: &str, version: &str) -> String {
    format!(
        r#"{{
  "metadata": {{"name": "n", "labels": {{"kubeedge": "true"}}}},
  "status": {{
    "nodeInfo": {{"kubeletVersion": "{version}"}},
    "conditions": [
      {{"type": "DiskPressure", "status": "False"}},
      {{"type": "Ready", "status": "{ready}"}}
    ]
  }}
}}"#
    )
}

pub const SERVICE_JSON: &str = r#"{
  "kind": "Service",
  "metadata": {"name": "cloudcore", "namespace": "kubeedge"},
  "spec": {"clusterIP": "10.96.200.15", "type": "ClusterIP"}
}"#;
