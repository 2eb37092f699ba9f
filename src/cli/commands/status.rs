use std::sync::Arc;

use anyhow::Result;

use crate::cli::output::{StatusInfo, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::services::{AstraBackend, EmbeddingClient, VectorStore};

pub async fn handle_status(format: OutputFormat, _verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let embedding_client = EmbeddingClient::new(&config.embedding)?;
    let embedding_ready = embedding_client.health_check().await.unwrap_or(false);

    let store: Arc<dyn VectorStore> =
        Arc::new(AstraBackend::new(&config.vector_store, embedding_client)?);

    let vector_store_connected = store.health_check().await.unwrap_or(false);
    let (collection_exists, document_count) = if vector_store_connected {
        match store.get_collection_info().await {
            Ok(Some(info)) => (true, info.document_count),
            _ => (false, 0),
        }
    } else {
        (false, 0)
    };

    let status = StatusInfo {
        embedding_url: config.embedding.url.clone(),
        embedding_model: config.embedding.model.clone(),
        embedding_ready,
        vector_store_endpoint: config.vector_store.endpoint.clone(),
        vector_store_connected,
        keyspace: config.vector_store.keyspace.clone(),
        collection: config.vector_store.collection.clone(),
        collection_exists,
        document_count,
    };

    print!("{}", formatter.format_status(&status));

    if !embedding_ready || !vector_store_connected {
        eprintln!();
        if !embedding_ready {
            eprintln!("Warning: embedding endpoint not reachable. Check the URL and API token.");
        }
        if !vector_store_connected {
            eprintln!(
                "Warning: vector store not reachable. Check ASTRA_DB_API_ENDPOINT and the \
                 application token."
            );
        }
    }

    Ok(())
}
