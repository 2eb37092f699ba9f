//! CSV-to-document conversion.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConvertError;
use crate::models::{Document, ReviewMetadata};

/// One row of the review CSV. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
pub struct ReviewRecord {
    pub product_title: String,
    pub rating: f32,
    pub review: String,
}

/// Anything that can produce the full, ordered document sequence.
///
/// The ingestion pipeline is written against this seam so it can be
/// exercised without a filesystem.
pub trait DocumentSource {
    fn load(&self) -> Result<Vec<Document>, ConvertError>;
}

/// Reads a review CSV and maps each row to a [`Document`], preserving
/// row order.
#[derive(Debug, Clone)]
pub struct DataConverter {
    path: PathBuf,
}

impl DataConverter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for DataConverter {
    fn load(&self) -> Result<Vec<Document>, ConvertError> {
        let file = std::fs::File::open(&self.path).map_err(|e| ConvertError::FileRead {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut documents = Vec::new();

        for record in reader.deserialize() {
            let record: ReviewRecord = record?;
            documents.push(Document::new(
                record.review,
                ReviewMetadata {
                    product_name: record.product_title,
                    rating: record.rating,
                },
            ));
        }

        Ok(documents)
    }
}
