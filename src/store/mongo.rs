// src/store/mongo.rs
// MongoDB-backed result sink. Connection state is owned here and handed to
// the pipeline explicitly; nothing ambient.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use mongodb::error::ErrorKind;
use mongodb::options::{Acknowledgment, ClientOptions, WriteConcern};
use mongodb::{Client, Collection};

use super::{HeadlineRecord, RecordSink, StoreAddress};
use crate::error::{PipelineError, PipelineResult};

/// How long the driver may spend looking for a reachable server.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MongoSink {
    collection: Collection<HeadlineRecord>,
    address: StoreAddress,
}

impl MongoSink {
    /// Parses the connection string and binds the sink to its destination
    /// collection with at-least-acknowledged (w:1) write concern. The driver
    /// connects lazily, so connectivity problems surface on the first write,
    /// not here.
    pub async fn connect(uri: &str, address: StoreAddress) -> PipelineResult<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| PipelineError::Configuration(format!("invalid connection string: {e}")))?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.write_concern = Some(WriteConcern::builder().w(Acknowledgment::Nodes(1)).build());
        options.app_name = Some("city-mood-analyzer".to_string());

        let client = Client::with_options(options).map_err(|e| {
            PipelineError::StoreUnavailable(anyhow!(e).context("building store client"))
        })?;
        let collection = client
            .database(&address.database)
            .collection(&address.collection);

        Ok(Self {
            collection,
            address,
        })
    }

    pub fn address(&self) -> &StoreAddress {
        &self.address
    }
}

#[async_trait]
impl RecordSink for MongoSink {
    async fn append(&self, records: &[HeadlineRecord]) -> PipelineResult<usize> {
        // A no-op run writes nothing and skips the round trip entirely.
        if records.is_empty() {
            return Ok(0);
        }

        match self.collection.insert_many(records).await {
            Ok(outcome) => {
                let count = outcome.inserted_ids.len();
                metrics::counter!("store_records_acknowledged_total").increment(count as u64);
                tracing::info!(count, destination = %self.address, "batch append acknowledged");
                Ok(count)
            }
            Err(err) => {
                // An InsertMany error means the server was reached and some
                // subset of the batch may have landed; anything else means we
                // never got that far.
                let acknowledged = match err.kind.as_ref() {
                    ErrorKind::InsertMany(failure) => Some(failure.inserted_ids.len()),
                    _ => None,
                };
                match acknowledged {
                    Some(count) => {
                        tracing::warn!(
                            acknowledged = count,
                            destination = %self.address,
                            "batch append partially acknowledged"
                        );
                        Err(PipelineError::Persistence {
                            acknowledged: count,
                            cause: anyhow!(err)
                                .context(format!("appending to {}", self.address)),
                        })
                    }
                    None => Err(PipelineError::StoreUnavailable(
                        anyhow!(err).context(format!("reaching {}", self.address)),
                    )),
                }
            }
        }
    }
}
