// src/bin/check_systems.rs
// Operator pre-flight: verify the distributed filesystem, the
// resource-manager node registry, and the document store are reachable
// before kicking off a pipeline run. Exits non-zero if any check fails.

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use city_mood_analyzer::config::DEFAULT_MONGO_URI;
use city_mood_analyzer::health::{self, DEFAULT_DFS_LOG_DIR, DEFAULT_NODES_URL};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().compact())
        .init();

    let dfs_dir = env_or("DFS_LOG_DIR", DEFAULT_DFS_LOG_DIR);
    let nodes_url = env_or("YARN_NODES_URL", DEFAULT_NODES_URL);
    let store_uri = env_or("MONGODB_URI", DEFAULT_MONGO_URI);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("building http client")?;

    let reports = health::run_all(&client, &dfs_dir, &nodes_url, &store_uri).await;

    let mut failures = 0usize;
    for report in &reports {
        let mark = if report.ok { "ok" } else { "FAILED" };
        println!("[{mark}] {}: {}", report.name, report.detail);
        if !report.ok {
            failures += 1;
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} checks failed", reports.len());
        std::process::exit(1);
    }
    Ok(())
}
