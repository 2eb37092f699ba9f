//! Vector store abstraction layer.
//!
//! Trait-based seam over the remote document collection so the ingestion
//! pipeline can run against the hosted backend or an in-memory test double.

mod astra;

pub use astra::AstraBackend;

use async_trait::async_trait;

use crate::error::VectorStoreError;
use crate::models::Document;

/// Collection information as reported by the remote store.
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub document_count: u64,
}

/// A handle to a remote vector collection.
///
/// The handle is long-lived and never mutated; all methods issue remote
/// calls against the same collection.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Check if the vector store is reachable.
    async fn health_check(&self) -> Result<bool, VectorStoreError>;

    /// Get information about the collection.
    /// Returns None if the collection doesn't exist yet.
    async fn get_collection_info(&self) -> Result<Option<CollectionInfo>, VectorStoreError>;

    /// Create the collection if it doesn't exist.
    async fn create_collection(&self) -> Result<(), VectorStoreError>;

    /// Embed and insert one batch of documents, returning the inserted ids.
    ///
    /// Embedding-endpoint calls happen inside this method; callers only see
    /// one "add documents" operation per batch.
    async fn add_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, VectorStoreError>;

    /// The collection name this handle writes to.
    fn collection(&self) -> &str;
}
