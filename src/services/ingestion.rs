//! Batched ingestion of converted documents into the vector store.

use std::sync::Arc;

use crate::error::IngestError;
use crate::services::converter::DocumentSource;
use crate::services::vector_store::VectorStore;

/// What a completed ingest run did.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestReport {
    pub documents: usize,
    pub batches: usize,
}

/// Result of [`DataIngestion::ingest`]: the store handle for downstream
/// retrieval plus the run report.
pub struct IngestOutcome {
    pub store: Arc<dyn VectorStore>,
    pub report: IngestReport,
}

impl std::fmt::Debug for IngestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestOutcome")
            .field("store", &self.store.collection())
            .field("report", &self.report)
            .finish()
    }
}

/// Orchestrates the convert-then-submit sequence against the remote store.
///
/// Construction is cheap and performs no I/O; both remote clients are built
/// by the caller and handed in.
pub struct DataIngestion<S> {
    source: S,
    store: Arc<dyn VectorStore>,
    batch_size: usize,
}

impl<S: DocumentSource> DataIngestion<S> {
    /// `batch_size` must be at least 1; [`crate::models::Config::validate`]
    /// enforces this for configured values.
    pub fn new(source: S, store: Arc<dyn VectorStore>, batch_size: usize) -> Self {
        debug_assert!(batch_size > 0);
        Self {
            source,
            store,
            batch_size,
        }
    }

    pub fn store(&self) -> Arc<dyn VectorStore> {
        Arc::clone(&self.store)
    }

    /// Load documents from the source and submit them in fixed-size batches,
    /// or hand back the already-populated store when `load_existing` is set.
    ///
    /// Batches are contiguous, order-preserving windows over the converted
    /// sequence; the last batch may be shorter. Failures propagate unchanged:
    /// a batch failing mid-run leaves the collection partially ingested with
    /// no checkpoint, and re-running re-submits everything.
    pub async fn ingest(&self, load_existing: bool) -> Result<IngestOutcome, IngestError> {
        if load_existing {
            return Ok(IngestOutcome {
                store: self.store(),
                report: IngestReport::default(),
            });
        }

        let documents = self.source.load()?;

        self.store.create_collection().await?;

        let mut report = IngestReport {
            documents: documents.len(),
            batches: 0,
        };

        let mut remaining = documents.into_iter();
        loop {
            let batch: Vec<_> = remaining.by_ref().take(self.batch_size).collect();
            if batch.is_empty() {
                break;
            }
            self.store.add_documents(batch).await?;
            report.batches += 1;
        }

        Ok(IngestOutcome {
            store: self.store(),
            report,
        })
    }
}
