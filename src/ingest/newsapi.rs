// src/ingest/newsapi.rs
// Headline source backed by the NewsAPI `everything` endpoint.
// Auth: API key via `apiKey` query param.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::ingest::types::HeadlineSource;
use crate::ingest::{ensure_metrics_described, normalize_text};

pub const NEWSAPI_EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

/// Extract normalized titles from an `everything` response body, capped at
/// `limit`. Articles with a missing or markup-only title are skipped.
/// Separate from the HTTP call so fixtures can exercise it directly.
pub fn parse_headlines(body: &str, limit: usize) -> Result<Vec<String>> {
    let parsed: NewsApiResponse =
        serde_json::from_str(body).context("parsing newsapi response body")?;

    let mut out = Vec::with_capacity(parsed.articles.len().min(limit));
    for article in parsed.articles {
        if out.len() == limit {
            break;
        }
        let Some(title) = article.title else { continue };
        let title = normalize_text(&title);
        if title.is_empty() {
            continue;
        }
        out.push(title);
    }
    Ok(out)
}

pub struct NewsApiSource {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl NewsApiSource {
    /// The client is passed in so the caller owns timeout policy.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: NEWSAPI_EVERYTHING_URL.to_string(),
        }
    }

    /// Point the source at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Raised before any network call is attempted.
    fn check_config(&self, query: &str, limit: usize) -> PipelineResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "news API key is empty".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "query term is empty".to_string(),
            ));
        }
        if limit == 0 {
            return Err(PipelineError::Configuration(
                "result-count limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl HeadlineSource for NewsApiSource {
    async fn fetch(&self, query: &str, limit: usize) -> PipelineResult<Vec<String>> {
        self.check_config(query, limit)?;
        ensure_metrics_described();

        let t0 = std::time::Instant::now();
        let page_size = limit.to_string();

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                counter!("ingest_fetch_errors_total").increment(1);
                PipelineError::SourceUnavailable(anyhow!(e).context("newsapi request"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            counter!("ingest_fetch_errors_total").increment(1);
            return Err(PipelineError::SourceUnavailable(anyhow!(
                "newsapi returned {status}"
            )));
        }

        let body = resp.text().await.map_err(|e| {
            counter!("ingest_fetch_errors_total").increment(1);
            PipelineError::SourceUnavailable(anyhow!(e).context("reading newsapi body"))
        })?;

        let headlines = parse_headlines(&body, limit).map_err(|e| {
            counter!("ingest_fetch_errors_total").increment(1);
            PipelineError::SourceUnavailable(e)
        })?;

        histogram!("ingest_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("ingest_headlines_total").increment(headlines.len() as u64);
        tracing::info!(count = headlines.len(), query, "fetched headlines");

        Ok(headlines)
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_fails_before_any_network_call() {
        let source = NewsApiSource::new(Client::new(), "  ");
        let err = source.check_config("New York", 3).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn zero_limit_is_a_configuration_error() {
        let source = NewsApiSource::new(Client::new(), "k");
        let err = source.check_config("New York", 0).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
