//! City Mood Analyzer — Binary Entrypoint
//! One pipeline run: fetch recent headlines for the configured place, score
//! and classify each one, display the labeled set, persist it to the
//! document store, and report the run summary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use city_mood_analyzer::classify::ScoreThresholds;
use city_mood_analyzer::config::AppConfig;
use city_mood_analyzer::ingest::newsapi::NewsApiSource;
use city_mood_analyzer::pipeline::{Pipeline, RunState};
use city_mood_analyzer::sentiment::LexiconAnalyzer;
use city_mood_analyzer::store::mongo::MongoSink;

/// Single network round trip per stage; keep the fetch bounded.
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the variables come from the host.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;

    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("city-mood-analyzer/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building http client")?;

    let source = NewsApiSource::new(client, &config.news_api_key);
    let sink = MongoSink::connect(&config.mongo_uri, config.store.clone())
        .await
        .context("preparing result sink")?;

    let pipeline = Pipeline::new(
        source,
        sink,
        Arc::new(LexiconAnalyzer::new()),
        ScoreThresholds::default(),
    );

    let summary = pipeline.run(&config.city, config.page_size).await;

    println!(
        "{} run for {:?}: {} scored, {} persisted to {} ({} optimism / {} neutral / {} fear-anger)",
        if summary.state == RunState::Done { "Completed" } else { "Aborted" },
        config.city,
        summary.scored,
        summary.persisted,
        config.store,
        summary.tally.optimism,
        summary.tally.neutral,
        summary.tally.fear_anger,
    );

    if let Some(err) = summary.error {
        eprintln!("run failed: {err}");
        std::process::exit(1);
    }
    Ok(())
}
