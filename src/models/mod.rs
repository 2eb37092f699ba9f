mod config;
mod document;
mod format;

pub use config::{
    Config, DEFAULT_COLLECTION, DEFAULT_DATA_FILE, DEFAULT_EMBEDDING_DIMENSION,
    DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL, DEFAULT_INGEST_BATCH_SIZE, DEFAULT_KEYSPACE,
    EmbeddingConfig, IngestionConfig, OutputConfig, VectorStoreConfig,
};
pub use document::{Document, ReviewMetadata};
pub use format::OutputFormat;
