mod converter;
mod embedding;
mod ingestion;
mod vector_store;

pub use converter::{DataConverter, DocumentSource, ReviewRecord};
pub use embedding::{EmbeddingClient, ModelStatus};
pub use ingestion::{DataIngestion, IngestOutcome, IngestReport};
pub use vector_store::{AstraBackend, CollectionInfo, VectorStore};
