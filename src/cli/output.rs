use std::fmt::Write as FmtWrite;

use crate::models::OutputFormat;

pub trait Formatter {
    fn format_status(&self, status: &StatusInfo) -> String;
    fn format_ingest_stats(&self, stats: &IngestStats) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub embedding_url: String,
    pub embedding_model: String,
    pub embedding_ready: bool,
    pub vector_store_endpoint: String,
    pub vector_store_connected: bool,
    pub keyspace: String,
    pub collection: String,
    pub collection_exists: bool,
    pub document_count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub documents_loaded: u64,
    pub batches_submitted: u64,
    pub loaded_existing: bool,
    pub duration_ms: u64,
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();

        let embedding_status = if status.embedding_ready {
            "[READY]"
        } else {
            "[UNREACHABLE]"
        };
        writeln!(output, "Embedding:     {}", embedding_status).unwrap();
        writeln!(output, "  Model:       {}", status.embedding_model).unwrap();
        writeln!(output, "  URL:         {}", status.embedding_url).unwrap();
        writeln!(output).unwrap();

        let store_status = if status.vector_store_connected {
            "[CONNECTED]"
        } else {
            "[DISCONNECTED]"
        };
        writeln!(output, "Vector Store:  {}", store_status).unwrap();
        writeln!(output, "  Endpoint:    {}", status.vector_store_endpoint).unwrap();
        writeln!(output, "  Keyspace:    {}", status.keyspace).unwrap();
        if status.collection_exists {
            writeln!(
                output,
                "  Collection:  {} ({} documents)",
                status.collection, status.document_count
            )
            .unwrap();
        } else {
            writeln!(
                output,
                "  Collection:  {} (not created)",
                status.collection
            )
            .unwrap();
        }

        output
    }

    fn format_ingest_stats(&self, stats: &IngestStats) -> String {
        if stats.loaded_existing {
            return "Reusing existing collection; nothing ingested.\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "Ingestion Complete").unwrap();
        writeln!(output, "------------------").unwrap();
        writeln!(output, "Documents loaded:  {}", stats.documents_loaded).unwrap();
        writeln!(output, "Batches submitted: {}", stats.batches_submitted).unwrap();
        writeln!(output, "Duration: {}ms", stats.duration_ms).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, json: &serde_json::Value) -> String {
        if self.pretty {
            serde_json::to_string_pretty(json).unwrap()
        } else {
            serde_json::to_string(json).unwrap()
        }
    }
}

impl Formatter for JsonFormatter {
    fn format_status(&self, status: &StatusInfo) -> String {
        let json = serde_json::json!({
            "embedding": {
                "url": status.embedding_url,
                "model": status.embedding_model,
                "ready": status.embedding_ready,
            },
            "vector_store": {
                "endpoint": status.vector_store_endpoint,
                "connected": status.vector_store_connected,
                "keyspace": status.keyspace,
                "collection": status.collection,
                "collection_exists": status.collection_exists,
                "documents": status.document_count,
            }
        });

        self.render(&json)
    }

    fn format_ingest_stats(&self, stats: &IngestStats) -> String {
        let json = serde_json::json!({
            "documents_loaded": stats.documents_loaded,
            "batches_submitted": stats.batches_submitted,
            "loaded_existing": stats.loaded_existing,
            "duration_ms": stats.duration_ms,
        });

        self.render(&json)
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({"message": message}).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({"error": error}).to_string()
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> StatusInfo {
        StatusInfo {
            embedding_url: "https://embeddings.example.com".to_string(),
            embedding_model: "BAAI/bge-base-en-v1.5".to_string(),
            embedding_ready: true,
            vector_store_endpoint: "https://db.example.com".to_string(),
            vector_store_connected: true,
            keyspace: "default_keyspace".to_string(),
            collection: "product_reviews".to_string(),
            collection_exists: true,
            document_count: 1200,
        }
    }

    #[test]
    fn test_text_status() {
        let output = TextFormatter.format_status(&status());
        assert!(output.contains("[READY]"));
        assert!(output.contains("[CONNECTED]"));
        assert!(output.contains("product_reviews (1200 documents)"));
    }

    #[test]
    fn test_text_status_missing_collection() {
        let mut info = status();
        info.collection_exists = false;
        let output = TextFormatter.format_status(&info);
        assert!(output.contains("product_reviews (not created)"));
    }

    #[test]
    fn test_text_ingest_stats() {
        let stats = IngestStats {
            documents_loaded: 250,
            batches_submitted: 2,
            loaded_existing: false,
            duration_ms: 1500,
        };
        let output = TextFormatter.format_ingest_stats(&stats);
        assert!(output.contains("Documents loaded:  250"));
        assert!(output.contains("Batches submitted: 2"));
    }

    #[test]
    fn test_text_ingest_stats_load_existing() {
        let stats = IngestStats {
            loaded_existing: true,
            ..Default::default()
        };
        let output = TextFormatter.format_ingest_stats(&stats);
        assert!(output.contains("Reusing existing collection"));
    }

    #[test]
    fn test_json_ingest_stats_round_trip() {
        let stats = IngestStats {
            documents_loaded: 250,
            batches_submitted: 2,
            loaded_existing: false,
            duration_ms: 1500,
        };
        let output = JsonFormatter::new(false).format_ingest_stats(&stats);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["documents_loaded"], 250);
        assert_eq!(value["batches_submitted"], 2);
    }
}
