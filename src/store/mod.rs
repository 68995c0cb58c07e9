// src/store/mod.rs
pub mod mongo;

use std::fmt;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classify::Emotion;
use crate::error::{PipelineError, PipelineResult};

/// One classified headline, exactly as written to the store.
/// Append-only; there is no update path and no deduplication key, so
/// re-running a pipeline over an unchanged headline set duplicates records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    pub headline: String,
    pub emotion: Emotion,
}

/// Database/collection address a sink writes to, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAddress {
    pub database: String,
    pub collection: String,
}

impl StoreAddress {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }
}

impl fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// Best-effort batch append. Each record is independently acknowledged or
/// not; a partially acknowledged batch surfaces as `Persistence` with the
/// acknowledged count instead of being silently dropped.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Returns the number of records the store acknowledged.
    async fn append(&self, records: &[HeadlineRecord]) -> PipelineResult<usize>;
}

// Arc blanket so tests can keep a handle on a shared sink for assertions.
#[async_trait]
impl<S: RecordSink + ?Sized> RecordSink for Arc<S> {
    async fn append(&self, records: &[HeadlineRecord]) -> PipelineResult<usize> {
        (**self).append(records).await
    }
}

/// In-memory sink for tests and dry runs. Optionally fails after a fixed
/// number of acknowledged records to exercise partial-write handling.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<HeadlineRecord>>,
    fail_after: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledge at most `n` records per batch, then report a write failure.
    pub fn failing_after(n: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_after: Some(n),
        }
    }

    /// Everything persisted so far (for test assertions).
    pub fn records(&self) -> Vec<HeadlineRecord> {
        self.records.lock().expect("memory sink mutex poisoned").clone()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn append(&self, records: &[HeadlineRecord]) -> PipelineResult<usize> {
        let mut stored = self.records.lock().expect("memory sink mutex poisoned");
        match self.fail_after {
            Some(n) if records.len() > n => {
                stored.extend_from_slice(&records[..n]);
                Err(PipelineError::Persistence {
                    acknowledged: n,
                    cause: anyhow!("injected write failure"),
                })
            }
            _ => {
                stored.extend_from_slice(records);
                Ok(records.len())
            }
        }
    }
}
