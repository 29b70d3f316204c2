//! Fixed artifact templates: edge join script and ROS2 deployment manifest.

use crate::domain::{JoinScriptParams, Ros2AppParams};

/// Base URL of KubeEdge release downloads.
pub const KEADM_RELEASE_URL: &str = "https://github.com/kubeedge/kubeedge/releases/download";

/// Node label the ROS2 deployment requires via node affinity.
pub const EDGE_ROLE_LABEL: &str = "node-role.kubernetes.io/edge";

/// Render the bash script that downloads keadm and joins the node to CloudCore.
pub fn render_join_script(params: &JoinScriptParams) -> String {
    format!(
        r#"#!/bin/bash
set -e

EDGE_NODE_NAME="{node_name}"
CLOUDCORE_IP="{cloudcore_ip}"
CLOUDCORE_PORT="{cloudcore_port}"
KUBEEDGE_VERSION="{kubeedge_version}"

echo "Joining edge node: $EDGE_NODE_NAME to $CLOUDCORE_IP:$CLOUDCORE_PORT"

# Install keadm
ARCH=$(uname -m)
if [ "$ARCH" = "aarch64" ]; then
    ARCH="arm64"
fi

curl -L {release_url}/v${{KUBEEDGE_VERSION}}/keadm-v${{KUBEEDGE_VERSION}}-linux-$ARCH \
  -o /tmp/keadm && chmod +x /tmp/keadm

# Join cluster
/tmp/keadm join --cloudcore-ipport="$CLOUDCORE_IP:$CLOUDCORE_PORT" \
  --edgenode-name=$EDGE_NODE_NAME \
  --kubeedge-version=v${{KUBEEDGE_VERSION}}

echo "Edge node $EDGE_NODE_NAME joined successfully!"
"#,
        node_name = params.node_name,
        cloudcore_ip = params.cloudcore_ip,
        cloudcore_port = params.cloudcore_port,
        kubeedge_version = params.kubeedge_version,
        release_url = KEADM_RELEASE_URL,
    )
}

/// Render a single-replica Deployment pinned to edge nodes.
pub fn render_ros2_deployment(params: &Ros2AppParams) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {name}
  namespace: default
spec:
  replicas: 1
  selector:
    matchLabels:
      app: {name}
  template:
    metadata:
      labels:
        app: {name}
    spec:
      affinity:
        nodeAffinity:
          requiredDuringSchedulingIgnoredDuringExecution:
            nodeSelectorTerms:
            - matchExpressions:
              - key: {edge_label}
                operator: In
                values:
                - "true"

      containers:
      - name: ros2-app
        image: {image}
        imagePullPolicy: IfNotPresent
        env:
        - name: ROS_DOMAIN_ID
          value: "{domain_id}"
        - name: ROS_LOCALHOST_ONLY
          value: "0"
        - name: RCUTILS_LOGGING_USE_STDOUT
          value: "1"
        resources:
          requests:
            cpu: 250m
            memory: 512Mi
          limits:
            cpu: 500m
            memory: 1Gi
"#,
        name = params.deployment_name(),
        edge_label = EDGE_ROLE_LABEL,
        image = params.image,
        domain_id = params.domain_id,
    )
}
