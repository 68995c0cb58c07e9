// src/pipeline.rs
//! Run orchestration.
//!
//! One run walks Fetching -> Scoring -> Persisting -> Done; Aborted is
//! reachable from Fetching and Persisting on an unrecovered error. Scoring
//! is infallible and order-preserving. The summary always states the
//! terminal state, the acknowledged count, and the aborting error.

use std::sync::Arc;

use metrics::counter;
use tracing::{error, info};

use crate::classify::{Emotion, ScoreThresholds};
use crate::error::PipelineError;
use crate::ingest::types::HeadlineSource;
use crate::sentiment::SentimentBackend;
use crate::store::{HeadlineRecord, RecordSink};

/// Pipeline stages in order, plus the two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Fetching,
    Scoring,
    Persisting,
    Done,
    Aborted,
}

/// Per-label counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct EmotionTally {
    pub optimism: usize,
    pub neutral: usize,
    pub fear_anger: usize,
}

impl EmotionTally {
    fn bump(&mut self, emotion: Emotion) {
        match emotion {
            Emotion::Optimism => self.optimism += 1,
            Emotion::Neutral => self.neutral += 1,
            Emotion::FearAnger => self.fear_anger += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.optimism + self.neutral + self.fear_anger
    }
}

/// What one invocation reports back, abort or not.
#[derive(Debug)]
pub struct RunSummary {
    /// Terminal state: Done or Aborted.
    pub state: RunState,
    /// Records built before the persisting stage (n headlines in, n out).
    pub scored: usize,
    /// Records the store acknowledged (possibly fewer than `scored`).
    pub persisted: usize,
    pub tally: EmotionTally,
    pub error: Option<PipelineError>,
}

impl RunSummary {
    fn aborted(stage: RunState, scored: usize, tally: EmotionTally, err: PipelineError) -> Self {
        error!(stage = ?stage, persisted = err.acknowledged(), error = %err, "run aborted");
        Self {
            state: RunState::Aborted,
            scored,
            persisted: err.acknowledged(),
            tally,
            error: Some(err),
        }
    }
}

/// Composes source, scorer, classifier and sink for one query term. Owns the
/// in-memory record sequence for the duration of a run; nothing retains it
/// after the sink acknowledges.
pub struct Pipeline<S, K> {
    source: S,
    sink: K,
    backend: Arc<dyn SentimentBackend>,
    thresholds: ScoreThresholds,
}

impl<S: HeadlineSource, K: RecordSink> Pipeline<S, K> {
    pub fn new(
        source: S,
        sink: K,
        backend: Arc<dyn SentimentBackend>,
        thresholds: ScoreThresholds,
    ) -> Self {
        Self {
            source,
            sink,
            backend,
            thresholds,
        }
    }

    /// One full run. Never panics; every outcome is a summary.
    pub async fn run(&self, query: &str, limit: usize) -> RunSummary {
        info!(query, limit, source = self.source.name(), "pipeline run started");

        // -- Fetching --
        let headlines = match self.source.fetch(query, limit).await {
            Ok(headlines) => headlines,
            Err(err) => {
                return RunSummary::aborted(RunState::Fetching, 0, EmotionTally::default(), err)
            }
        };

        // -- Scoring -- (cannot fail; order preserved)
        let records = score_headlines(self.backend.as_ref(), self.thresholds, &headlines);
        let mut tally = EmotionTally::default();
        for record in &records {
            tally.bump(record.emotion);
            info!(headline = %record.headline, emotion = %record.emotion, "classified");
        }
        debug_assert_eq!(records.len(), headlines.len());

        // -- Persisting --
        match self.sink.append(&records).await {
            Ok(count) => {
                counter!("pipeline_records_persisted_total").increment(count as u64);
                info!(scored = records.len(), persisted = count, "pipeline run finished");
                RunSummary {
                    state: RunState::Done,
                    scored: records.len(),
                    persisted: count,
                    tally,
                    error: None,
                }
            }
            Err(err) => RunSummary::aborted(RunState::Persisting, records.len(), tally, err),
        }
    }
}

/// Pure scoring stage: one record per headline, input order preserved.
/// A backend returning non-finite polarity is treated as neutral 0.0.
pub fn score_headlines(
    backend: &dyn SentimentBackend,
    thresholds: ScoreThresholds,
    headlines: &[String],
) -> Vec<HeadlineRecord> {
    headlines
        .iter()
        .map(|headline| {
            let mut polarity = backend.polarity(headline);
            if !polarity.is_finite() {
                polarity = 0.0;
            }
            HeadlineRecord {
                headline: headline.clone(),
                emotion: thresholds.classify(polarity),
            }
        })
        .collect()
}
