// src/health.rs
// Pre-flight cluster checks, consumed by operators through the
// `check_systems` binary. The pipeline itself never calls in here.
//
// The three checks are fully independent: one failing never prevents the
// others from running, and each reports a human-readable diagnostic.

use std::time::Duration;

use anyhow::{Context, Result};
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use serde::Deserialize;
use tokio::process::Command;

pub const DEFAULT_DFS_LOG_DIR: &str = "/spark-logs";
pub const DEFAULT_NODES_URL: &str = "http://hadoop-master:8088/ws/v1/cluster/nodes";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one infrastructure check.
#[derive(Debug)]
pub struct CheckReport {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

impl CheckReport {
    fn passed(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            ok: true,
            detail: detail.into(),
        }
    }

    fn failed(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Distributed-filesystem directory check: `hdfs dfs -test -d <dir>` exits 0
/// when the directory exists. A missing `hdfs` client is a failed check, not
/// a crash.
pub async fn check_dfs_dir(dir: &str) -> CheckReport {
    match Command::new("hdfs")
        .args(["dfs", "-test", "-d", dir])
        .output()
        .await
    {
        Ok(out) if out.status.success() => {
            CheckReport::passed("dfs", format!("directory {dir} exists"))
        }
        Ok(out) => CheckReport::failed(
            "dfs",
            format!(
                "directory {dir} does not exist (exit code {})",
                out.status.code().unwrap_or(-1)
            ),
        ),
        Err(e) => CheckReport::failed("dfs", format!("could not run hdfs client: {e}")),
    }
}

// Resource-manager node registry, `/ws/v1/cluster/nodes` JSON shape.
#[derive(Debug, Deserialize)]
struct NodesResponse {
    nodes: NodeList,
}

#[derive(Debug, Deserialize)]
struct NodeList {
    #[serde(default)]
    node: Vec<NodeInfo>,
}

#[derive(Debug, Deserialize)]
pub struct NodeInfo {
    pub id: String,
    pub state: String,
}

pub fn parse_node_registry(body: &str) -> Result<Vec<NodeInfo>> {
    let parsed: NodesResponse =
        serde_json::from_str(body).context("parsing node registry response")?;
    Ok(parsed.nodes.node)
}

/// Worker-node registry check against the resource manager's HTTP endpoint.
pub async fn check_node_registry(client: &reqwest::Client, url: &str) -> CheckReport {
    let result: Result<Vec<NodeInfo>> = async {
        let body = client
            .get(url)
            .send()
            .await
            .context("node registry request")?
            .error_for_status()
            .context("node registry non-2xx")?
            .text()
            .await
            .context("reading node registry body")?;
        parse_node_registry(&body)
    }
    .await;

    match result {
        Ok(nodes) => {
            let mut detail = format!("{} node(s) registered", nodes.len());
            for node in &nodes {
                detail.push_str(&format!("\n   - {} ({})", node.id, node.state));
            }
            CheckReport::passed("nodes", detail)
        }
        Err(e) => CheckReport::failed("nodes", format!("{e:#}")),
    }
}

/// Document-store check: connect, ping, write one probe document into a
/// scratch collection, then clean it up. The driver's default write concern
/// is acknowledged, so an Ok insert means the write was confirmed.
pub async fn check_document_store(uri: &str) -> CheckReport {
    let result: Result<()> = async {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("parsing connection string")?;
        options.server_selection_timeout = Some(PROBE_TIMEOUT);
        let client = mongodb::Client::with_options(options).context("building store client")?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("store ping")?;

        let probe = client.database("test").collection::<Document>("probe");
        let inserted = probe
            .insert_one(doc! { "probe": "value" })
            .await
            .context("probe insert")?;
        probe
            .delete_one(doc! { "_id": inserted.inserted_id })
            .await
            .context("probe cleanup")?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => CheckReport::passed("store", "connect and round-trip write succeeded"),
        Err(e) => CheckReport::failed("store", format!("{e:#}")),
    }
}

/// Run all three checks in order; failures are reported, never propagated.
pub async fn run_all(
    client: &reqwest::Client,
    dfs_dir: &str,
    nodes_url: &str,
    store_uri: &str,
) -> Vec<CheckReport> {
    vec![
        check_dfs_dir(dfs_dir).await,
        check_node_registry(client, nodes_url).await,
        check_document_store(store_uri).await,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_registry_parses_id_and_state() {
        let body = r#"{"nodes":{"node":[
            {"id":"hadoop-worker1:45454","state":"RUNNING","rack":"/default-rack"},
            {"id":"hadoop-worker2:45454","state":"LOST"}
        ]}}"#;
        let nodes = parse_node_registry(body).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "hadoop-worker1:45454");
        assert_eq!(nodes[1].state, "LOST");
    }

    #[test]
    fn node_registry_with_no_nodes_is_empty_not_an_error() {
        let nodes = parse_node_registry(r#"{"nodes":{}}"#).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn malformed_registry_body_is_an_error() {
        assert!(parse_node_registry("<html>503</html>").is_err());
        assert!(parse_node_registry(r#"{"unexpected": true}"#).is_err());
    }
}
