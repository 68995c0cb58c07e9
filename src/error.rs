// src/error.rs
// Run-fatal error taxonomy. One variant per failure stage so an operator can
// tell what broke without reading transport internals.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or invalid setup. Raised before any network call, never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The news endpoint could not produce a usable response
    /// (timeout, non-2xx status, malformed body).
    #[error("news source unavailable: {0:#}")]
    SourceUnavailable(anyhow::Error),

    /// The document store could not be reached at all; nothing was written.
    #[error("document store unreachable: {0:#}")]
    StoreUnavailable(anyhow::Error),

    /// The store was reachable but did not acknowledge the whole batch.
    /// `acknowledged` is the count of records that did land.
    #[error("store write failed after {acknowledged} acknowledged record(s): {cause:#}")]
    Persistence {
        acknowledged: usize,
        cause: anyhow::Error,
    },
}

impl PipelineError {
    /// Records confirmed durable before the error, if any.
    pub fn acknowledged(&self) -> usize {
        match self {
            PipelineError::Persistence { acknowledged, .. } => *acknowledged,
            _ => 0,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
