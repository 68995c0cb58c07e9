// src/ingest/types.rs
use crate::error::PipelineResult;

/// Bounded, time-ordered headline acquisition for a query term.
#[async_trait::async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Most-recently-published first, at most `limit` entries. A successful
    /// response with zero articles is an empty Vec, not an error.
    async fn fetch(&self, query: &str, limit: usize) -> PipelineResult<Vec<String>>;
    fn name(&self) -> &'static str;
}
