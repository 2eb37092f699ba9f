use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::format::OutputFormat;
use crate::error::ConfigError;

pub const DEFAULT_EMBEDDING_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-base-en-v1.5";
pub const DEFAULT_EMBEDDING_DIMENSION: u32 = 768;
pub const DEFAULT_KEYSPACE: &str = "default_keyspace";
pub const DEFAULT_COLLECTION: &str = "product_reviews";
pub const DEFAULT_DATA_FILE: &str = "data/flipkart_reviews_electronics.csv";
pub const DEFAULT_INGEST_BATCH_SIZE: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub vector_store: VectorStoreConfig,

    #[serde(default)]
    pub ingestion: IngestionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ringest").join("config.toml"))
    }

    /// Load configuration from the config file, then apply environment
    /// variable overrides. Missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        config.overlay_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or_else(|| {
            ConfigError::PathError("could not determine config directory".to_string())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Environment variables take precedence over file values. The lookup is
    /// injected so tests never have to touch process-wide state.
    pub fn overlay_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("EMBEDDING_API_URL") {
            self.embedding.url = v;
        }
        if let Some(v) = var("EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Some(v) = var("HUGGINGFACEHUB_API_TOKEN") {
            self.embedding.api_token = Some(v);
        }
        if let Some(v) = var("ASTRA_DB_API_ENDPOINT") {
            self.vector_store.endpoint = v;
        }
        if let Some(v) = var("ASTRA_DB_APPLICATION_TOKEN") {
            self.vector_store.token = Some(v);
        }
        if let Some(v) = var("ASTRA_DB_KEYSPACE") {
            self.vector_store.keyspace = v;
        }
        if let Some(v) = var("REVIEWS_DATA_FILE") {
            self.ingestion.data_file = v.into();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ingestion.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "ingestion.batch_size must be at least 1".to_string(),
            ));
        }
        if self.embedding.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.batch_size must be at least 1".to_string(),
            ));
        }
        if self.embedding.dimension == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_url")]
    pub url: String,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    #[serde(default = "default_dimension")]
    pub dimension: u32,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_embed_batch_size")]
    pub batch_size: u32,
}

fn default_embedding_url() -> String {
    DEFAULT_EMBEDDING_URL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_dimension() -> u32 {
    DEFAULT_EMBEDDING_DIMENSION
}

fn default_timeout() -> u64 {
    120
}

fn default_embed_batch_size() -> u32 {
    32
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: default_embedding_url(),
            model: default_embedding_model(),
            api_token: None,
            dimension: default_dimension(),
            timeout_secs: default_timeout(),
            batch_size: default_embed_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_keyspace")]
    pub keyspace: String,

    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_endpoint() -> String {
    "http://localhost:8181".to_string()
}

fn default_keyspace() -> String {
    DEFAULT_KEYSPACE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            keyspace: default_keyspace(),
            collection: default_collection(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_ingest_batch_size")]
    pub batch_size: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_ingest_batch_size() -> usize {
    DEFAULT_INGEST_BATCH_SIZE
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            batch_size: default_ingest_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.embedding.url, DEFAULT_EMBEDDING_URL);
        assert_eq!(config.embedding.model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.vector_store.keyspace, DEFAULT_KEYSPACE);
        assert_eq!(config.vector_store.collection, DEFAULT_COLLECTION);
        assert_eq!(config.ingestion.batch_size, DEFAULT_INGEST_BATCH_SIZE);
        assert!(config.vector_store.token.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = Config::config_path();
        assert!(path.is_some());
    }

    #[test]
    fn test_overlay_env_takes_precedence() {
        let mut config = Config::default();
        config.overlay_env(|name| match name {
            "ASTRA_DB_API_ENDPOINT" => {
                Some("https://db-id-region.apps.astra.datastax.com".to_string())
            }
            "ASTRA_DB_APPLICATION_TOKEN" => Some("AstraCS:secret".to_string()),
            "EMBEDDING_MODEL" => Some("intfloat/e5-base-v2".to_string()),
            _ => None,
        });

        assert_eq!(
            config.vector_store.endpoint,
            "https://db-id-region.apps.astra.datastax.com"
        );
        assert_eq!(config.vector_store.token.as_deref(), Some("AstraCS:secret"));
        assert_eq!(config.embedding.model, "intfloat/e5-base-v2");
        // Untouched values keep their defaults.
        assert_eq!(config.vector_store.keyspace, DEFAULT_KEYSPACE);
    }

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let mut config = Config::default();
        config.ingestion.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [vector_store]
            keyspace = "reviews"
            "#,
        )
        .unwrap();
        assert_eq!(config.vector_store.keyspace, "reviews");
        assert_eq!(config.vector_store.collection, DEFAULT_COLLECTION);
        assert_eq!(config.embedding.dimension, DEFAULT_EMBEDDING_DIMENSION);
    }
}
