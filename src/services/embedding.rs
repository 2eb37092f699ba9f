//! Embedding client for a hosted feature-extraction endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::EmbeddingError;
use crate::models::EmbeddingConfig;

/// Request body for the feature-extraction endpoint.
#[derive(Debug, Serialize)]
struct EmbedRequest {
    inputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncate: Option<bool>,
}

/// Response: one vector per input, in input order.
#[derive(Debug, Deserialize)]
struct EmbedResponse(Vec<Vec<f32>>);

/// Model status as reported by the endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ModelStatus {
    #[serde(default)]
    pub loaded: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Client for the hosted embedding endpoint.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
    batch_size: usize,
    dimension: usize,
}

impl EmbeddingClient {
    /// Create a new embedding client with the given configuration.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_token: config.api_token.clone(),
            batch_size: config.batch_size as usize,
            dimension: config.dimension as usize,
        })
    }

    /// Check whether the hosted model is loaded and ready to serve.
    pub async fn health_check(&self) -> Result<bool, EmbeddingError> {
        let url = format!("{}/status/{}", self.base_url, self.model);
        let mut request = self.client.get(&url);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmbeddingError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EmbeddingError::ServerError(format!(
                "status check failed with status: {}",
                response.status()
            )));
        }

        // Some gateways return an empty body on status checks.
        let status: ModelStatus = response.json().await.unwrap_or_default();
        Ok(status.loaded.unwrap_or(true))
    }

    /// Generate embeddings for a sequence of texts, in input order.
    ///
    /// Inputs are partitioned into request-sized chunks; the returned
    /// vectors are the concatenation of the chunk responses.
    pub async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.batch_size) {
            let embeddings = self.embed_single_batch(chunk.to_vec()).await?;
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }

    /// Internal method to embed a single request-sized chunk.
    async fn embed_single_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = texts.len();
        let url = format!(
            "{}/pipeline/feature-extraction/{}",
            self.base_url, self.model
        );
        let request = EmbedRequest {
            inputs: texts,
            truncate: Some(true),
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(ref token) = self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                EmbeddingError::Timeout
            } else {
                EmbeddingError::RequestError(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServerError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let embeddings = embed_response.0;
        if embeddings.len() != expected {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} vectors, got {}",
                expected,
                embeddings.len()
            )));
        }
        for vector in &embeddings {
            if vector.len() != self.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
        }

        Ok(embeddings)
    }

    /// Get the base URL of the embedding endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model identifier this client embeds with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Vector dimension the configured model produces.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = EmbeddingConfig::default();
        let client = EmbeddingClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trimming() {
        let config = EmbeddingConfig {
            url: "https://embeddings.example.com/".to_string(),
            ..Default::default()
        };
        let client = EmbeddingClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://embeddings.example.com");
    }

    #[test]
    fn test_request_omits_truncate_when_unset() {
        let request = EmbedRequest {
            inputs: vec!["hello".to_string()],
            truncate: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("truncate").is_none());
        assert_eq!(value["inputs"][0], "hello");
    }

    #[test]
    fn test_dimension_accessor() {
        let config = EmbeddingConfig {
            dimension: 384,
            ..Default::default()
        };
        let client = EmbeddingClient::new(&config).unwrap();
        assert_eq!(client.dimension(), 384);
    }
}
