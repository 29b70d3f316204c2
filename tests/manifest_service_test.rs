//! Tests for ManifestService and SimulationService

#![cfg(unix)]

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;

use tempfile::TempDir;

use edgectl::application::ApplicationError;
use edgectl::config::Settings;
use edgectl::domain::{DomainError, Ros2AppParams, SimulationParams};

use common::MockCommandRunner;

fn talker() -> Ros2AppParams {
    Ros2AppParams {
        app_name: "talker".into(),
        image: "ros:humble-ros-core".into(),
        domain_id: 42,
    }
}

// ============================================================
// join_script()
// ============================================================

#[test]
fn given_valid_inputs_when_rendering_join_script_then_uses_configured_version() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let settings = Settings {
        kubeedge_version: "1.16.1".into(),
        ..common::test_settings(temp.path().join("sim.sh"))
    };
    let container = common::container(settings, Arc::new(MockCommandRunner::new()));

    // Act
    let script = container
        .manifests
        .join_script("robot-edge-01", "172.18.0.2")
        .unwrap();

    // Assert
    assert!(script.contains(r#"KUBEEDGE_VERSION="1.16.1""#));
    assert!(script.contains(r#"CLOUDCORE_IP="172.18.0.2""#));
    assert!(script.contains(r#"CLOUDCORE_PORT="10000""#));
}

#[test]
fn given_shell_metacharacters_in_node_name_when_rendering_then_rejected() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );

    let err = container
        .manifests
        .join_script("edge\"; rm -rf / #", "172.18.0.2")
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidName { kind: "node name", .. })
    ));
}

#[test]
fn given_ipv6_cloudcore_address_when_rendering_join_script_then_host_bracketed() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );

    let script = container
        .manifests
        .join_script("robot-edge-01", "fd00::1")
        .unwrap();

    assert!(script.contains(r#"CLOUDCORE_IP="[fd00::1]""#), "{script}");
    assert!(!script.contains(r#"CLOUDCORE_IP="fd00::1""#));
}

#[test]
fn given_bracketed_ipv6_address_when_rendering_join_script_then_kept_as_is() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );

    let script = container
        .manifests
        .join_script("robot-edge-01", "[fd00::1]")
        .unwrap();

    assert!(script.contains(r#"CLOUDCORE_IP="[fd00::1]""#), "{script}");
}

#[test]
fn given_ipv6_join_script_when_expanded_by_bash_then_ipport_unambiguous() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );
    let script = container
        .manifests
        .join_script("robot-edge-01", "fd00::1")
        .unwrap();
    let assignments: String = script
        .lines()
        .filter(|l| l.starts_with("CLOUDCORE_"))
        .map(|l| format!("{l}\n"))
        .collect();

    let out = std::process::Command::new("bash")
        .arg("-c")
        .arg(format!("{assignments}echo \"$CLOUDCORE_IP:$CLOUDCORE_PORT\""))
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "[fd00::1]:10000");
}

#[test]
fn given_output_path_when_writing_script_then_file_created_executable() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );
    let path = temp.path().join("scripts/nested/join.sh");

    let script = container
        .manifests
        .join_script("robot-edge-01", "cloudcore.local")
        .unwrap();
    container.manifests.write_script(&path, &script).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), script);
    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_ne!(mode & 0o111, 0, "script should be executable");
}

// ============================================================
// ros2_deployment()
// ============================================================

#[test]
fn given_valid_app_when_rendering_deployment_then_manifest_returned() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );

    let yaml = container.manifests.ros2_deployment(&talker()).unwrap();

    assert!(yaml.contains("name: talker-edge"));
    assert!(yaml.contains("image: ros:humble-ros-core"));
    assert!(yaml.contains("value: \"42\""));
}

#[test]
fn given_uppercase_app_name_when_rendering_deployment_then_rejected() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );
    let params = Ros2AppParams {
        app_name: "Talker".into(),
        ..talker()
    };

    assert!(container.manifests.ros2_deployment(&params).is_err());
}

#[test]
fn given_out_of_range_domain_id_when_rendering_deployment_then_rejected() {
    let temp = TempDir::new().unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );
    let params = Ros2AppParams {
        domain_id: 500,
        ..talker()
    };

    let err = container.manifests.ros2_deployment(&params).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidDomainId(500))
    ));
}

#[test]
fn given_unwritable_path_when_writing_artifact_then_operation_failed() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("file");
    fs::write(&blocker, "x").unwrap();
    let container = common::container(
        common::test_settings(temp.path().join("sim.sh")),
        Arc::new(MockCommandRunner::new()),
    );

    // parent "file" is a regular file, so the directory cannot be created
    let err = container
        .manifests
        .write_artifact(&blocker.join("deploy.yaml"), "kind: Deployment\n")
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

// ============================================================
// SimulationService::run()
// ============================================================

fn sim_params() -> SimulationParams {
    SimulationParams {
        node_name: "robot-edge-01".into(),
        worker_node: "robotics-dev-worker".into(),
        domain_id: 42,
    }
}

#[test]
fn given_existing_script_when_simulating_then_runs_bash_with_positional_args() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("simulate-edge-node.sh");
    fs::write(&script, "#!/bin/bash\n").unwrap();
    let cmd = Arc::new(MockCommandRunner::new());
    let container = common::container(common::test_settings(script.clone()), cmd.clone());

    let script_arg = script.to_string_lossy().into_owned();

    // Act
    container.simulation.run(&sim_params(), None).unwrap();

    // Assert
    let calls = cmd.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "bash");
    assert!(calls[0].interactive);
    assert_eq!(
        calls[0].args,
        [
            script_arg.as_str(),
            "robot-edge-01",
            "robotics-dev-worker",
            "42"
        ]
    );
}

#[test]
fn given_script_override_when_simulating_then_override_used() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("custom.sh");
    fs::write(&custom, "#!/bin/bash\n").unwrap();
    let cmd = Arc::new(MockCommandRunner::new());
    let container = common::container(
        common::test_settings(temp.path().join("missing.sh")),
        cmd.clone(),
    );

    container
        .simulation
        .run(&sim_params(), Some(custom.as_path()))
        .unwrap();

    assert_eq!(cmd.calls()[0].args[0], custom.to_string_lossy());
}

#[test]
fn given_missing_script_when_simulating_then_script_not_found_and_nothing_run() {
    let temp = TempDir::new().unwrap();
    let cmd = Arc::new(MockCommandRunner::new());
    let container = common::container(
        common::test_settings(temp.path().join("missing.sh")),
        cmd.clone(),
    );

    let err = container.simulation.run(&sim_params(), None).unwrap_err();

    assert!(matches!(err, ApplicationError::ScriptNotFound(_)));
    assert!(cmd.calls().is_empty());
}

#[test]
fn given_script_exits_nonzero_when_simulating_then_error() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("simulate-edge-node.sh");
    fs::write(&script, "#!/bin/bash\nexit 3\n").unwrap();
    let cmd = Arc::new(MockCommandRunner::new());
    cmd.respond("bash", 3, "", "");
    let container = common::container(common::test_settings(script), cmd);

    let err = container.simulation.run(&sim_params(), None).unwrap_err();

    assert!(err.to_string().contains("exited with status 3"), "{err}");
}
