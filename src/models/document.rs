use serde::{Deserialize, Serialize};

/// A semantic record ready for embedding and storage: free-text review
/// content plus the attributes carried alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: ReviewMetadata,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    pub product_name: String,
    pub rating: f32,
}

impl Document {
    /// Ids are random per run; re-ingesting the same file produces new
    /// documents rather than overwriting earlier ones.
    pub fn new(content: String, metadata: ReviewMetadata) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            metadata,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
