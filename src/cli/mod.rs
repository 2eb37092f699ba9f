//! CLI module for the review ingestion tool.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Review ingestion CLI for hosted embeddings and a managed vector store.
#[derive(Debug, Parser)]
#[command(name = "ringest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text or json"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check infrastructure status (embedding endpoint, vector store)
    Status,

    /// Load the review CSV and ingest it into the vector store
    Ingest(commands::IngestArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
