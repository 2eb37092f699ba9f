//! Astra-style JSON Data API backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::VectorStoreError;
use crate::models::{Document, VectorStoreConfig};
use crate::services::EmbeddingClient;

use super::{CollectionInfo, VectorStore};

const TOKEN_HEADER: &str = "Token";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Client for one Data API collection. Owns the embedding client: adding
/// documents embeds their content before the insert, so callers issue a
/// single "add documents" call per batch.
pub struct AstraBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
    collection: String,
    embedding: EmbeddingClient,
}

impl AstraBackend {
    pub fn new(
        config: &VectorStoreConfig,
        embedding: EmbeddingClient,
    ) -> Result<Self, VectorStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VectorStoreError::ConnectionError(e.to_string()))?;

        let endpoint = config.endpoint.trim_end_matches('/');
        Ok(Self {
            client,
            base_url: format!("{}/api/json/v1/{}", endpoint, config.keyspace),
            token: config.token.clone(),
            collection: config.collection.clone(),
            embedding,
        })
    }

    fn keyspace_url(&self) -> String {
        self.base_url.clone()
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    /// Issue one Data API command and unwrap command-level errors, which
    /// the API reports inside a 200 response.
    async fn command(&self, url: &str, body: Value) -> Result<Value, VectorStoreError> {
        let mut request = self.client.post(url).json(&body);
        if let Some(ref token) = self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                VectorStoreError::ConnectionError(e.to_string())
            } else {
                VectorStoreError::ClientError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::ClientError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| VectorStoreError::ClientError(e.to_string()))?;

        if let Some(errors) = value.get("errors").and_then(Value::as_array)
            && !errors.is_empty()
        {
            return Err(VectorStoreError::ClientError(errors_to_string(errors)));
        }

        Ok(value)
    }
}

#[async_trait]
impl VectorStore for AstraBackend {
    async fn health_check(&self) -> Result<bool, VectorStoreError> {
        self.command(&self.keyspace_url(), json!({"findCollections": {}}))
            .await
            .map(|_| true)
    }

    async fn get_collection_info(&self) -> Result<Option<CollectionInfo>, VectorStoreError> {
        let value = self
            .command(&self.keyspace_url(), json!({"findCollections": {}}))
            .await
            .map_err(collection_error)?;

        let exists = value
            .pointer("/status/collections")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .any(|name| name.as_str() == Some(self.collection.as_str()))
            })
            .unwrap_or(false);

        if !exists {
            return Ok(None);
        }

        let value = self
            .command(&self.collection_url(), json!({"countDocuments": {}}))
            .await
            .map_err(collection_error)?;

        let document_count = value
            .pointer("/status/count")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        Ok(Some(CollectionInfo { document_count }))
    }

    async fn create_collection(&self) -> Result<(), VectorStoreError> {
        if self.get_collection_info().await?.is_some() {
            return Ok(());
        }

        let body = json!({
            "createCollection": {
                "name": self.collection,
                "options": {
                    "vector": {
                        "dimension": self.embedding.dimension(),
                        "metric": "cosine",
                    }
                }
            }
        });

        self.command(&self.keyspace_url(), body)
            .await
            .map_err(collection_error)?;

        Ok(())
    }

    async fn add_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, VectorStoreError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = self.embedding.embed_batch(texts).await?;

        let payload: Vec<Value> = documents
            .iter()
            .zip(vectors)
            .map(|(document, vector)| document_to_json(document, vector))
            .collect();

        let body = json!({
            "insertMany": {
                "documents": payload,
                "options": { "ordered": true },
            }
        });

        let value = self
            .command(&self.collection_url(), body)
            .await
            .map_err(|e| match e {
                VectorStoreError::ClientError(msg) => VectorStoreError::InsertError(msg),
                other => other,
            })?;

        let inserted = value
            .pointer("/status/insertedIds")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| id.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(inserted)
    }

    fn collection(&self) -> &str {
        &self.collection
    }
}

fn collection_error(error: VectorStoreError) -> VectorStoreError {
    match error {
        VectorStoreError::ClientError(msg) => VectorStoreError::CollectionError(msg),
        other => other,
    }
}

fn document_to_json(document: &Document, vector: Vec<f32>) -> Value {
    json!({
        "_id": document.id,
        "content": document.content,
        "metadata": {
            "product_name": document.metadata.product_name,
            "rating": document.metadata.rating,
        },
        "created_at": document.created_at,
        "$vector": vector,
    })
}

fn errors_to_string(errors: &[Value]) -> String {
    errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmbeddingConfig, ReviewMetadata};

    fn backend(config: &VectorStoreConfig) -> AstraBackend {
        let embedding = EmbeddingClient::new(&EmbeddingConfig::default()).unwrap();
        AstraBackend::new(config, embedding).unwrap()
    }

    #[test]
    fn test_urls_from_config() {
        let config = VectorStoreConfig {
            endpoint: "https://db-id-region.apps.astra.datastax.com/".to_string(),
            keyspace: "reviews".to_string(),
            collection: "electronics".to_string(),
            token: None,
        };
        let backend = backend(&config);
        assert_eq!(
            backend.keyspace_url(),
            "https://db-id-region.apps.astra.datastax.com/api/json/v1/reviews"
        );
        assert_eq!(
            backend.collection_url(),
            "https://db-id-region.apps.astra.datastax.com/api/json/v1/reviews/electronics"
        );
        assert_eq!(backend.collection(), "electronics");
    }

    #[test]
    fn test_document_to_json_shape() {
        let document = Document::new(
            "Works well".to_string(),
            ReviewMetadata {
                product_name: "Widget".to_string(),
                rating: 4.5,
            },
        );
        let value = document_to_json(&document, vec![0.1, 0.2]);

        assert_eq!(value["_id"], document.id.as_str());
        assert_eq!(value["content"], "Works well");
        assert_eq!(value["metadata"]["product_name"], "Widget");
        assert_eq!(value["$vector"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_errors_to_string() {
        let errors = vec![
            json!({"message": "collection already exists", "errorCode": "EXISTING_COLLECTION"}),
            json!({"errorCode": "UNKNOWN"}),
        ];
        assert_eq!(
            errors_to_string(&errors),
            "collection already exists; unknown error"
        );
    }
}
