//! Ingest command implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::output::{IngestStats, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::services::{AstraBackend, DataConverter, DataIngestion, EmbeddingClient, VectorStore};

/// Arguments for the ingest command.
#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Path to the review CSV (defaults to the configured data file)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Reuse the already-populated collection instead of re-ingesting
    #[arg(long)]
    pub load_existing: bool,
}

/// Handle the ingest command.
pub async fn handle_ingest(args: IngestArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let data_file = args
        .file
        .unwrap_or_else(|| config.ingestion.data_file.clone());

    if verbose && !args.load_existing {
        println!("Ingesting reviews from {}", data_file.display());
    }

    let embedding_client = EmbeddingClient::new(&config.embedding)?;
    let store = Arc::new(AstraBackend::new(&config.vector_store, embedding_client)?);

    let converter = DataConverter::new(data_file);
    let ingestion = DataIngestion::new(converter, store, config.ingestion.batch_size);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(if args.load_existing {
        "Opening existing collection..."
    } else {
        "Converting and ingesting reviews..."
    });
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = ingestion
        .ingest(args.load_existing)
        .await
        .context("ingestion failed")?;

    pb.finish_and_clear();

    let stats = IngestStats {
        documents_loaded: outcome.report.documents as u64,
        batches_submitted: outcome.report.batches as u64,
        loaded_existing: args.load_existing,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    print!("{}", formatter.format_ingest_stats(&stats));

    if verbose {
        println!(
            "Collection '{}' is ready for retrieval.",
            outcome.store.collection()
        );
    }

    Ok(())
}
