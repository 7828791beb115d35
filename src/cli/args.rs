//! Command line argument parsing for the Halberd CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentId, DocumentStatus};
use crate::execution::ExecutionPolicy;

/// Halberd - an in-process TF-IDF search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "halberd")]
#[command(about = "Rank a JSON Lines corpus against plus/minus keyword queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HalberdArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Space-delimited stop words (overrides the configuration file)
    #[arg(long, value_name = "WORDS")]
    pub stop_words: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HalberdArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank the corpus against one or more queries
    Search(SearchArgs),

    /// Show which query terms a document contains
    Match(MatchArgs),

    /// Remove documents whose term sets duplicate an earlier document
    Dedup(DedupArgs),

    /// Show corpus statistics
    Stats(StatsArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Query strings; minus-prefixed terms exclude documents
    #[arg(value_name = "QUERY", required = true, allow_hyphen_values = true)]
    pub queries: Vec<String>,

    /// Only rank documents with this status
    #[arg(short, long, default_value = "actual")]
    pub status: DocumentStatus,

    /// Rank with the parallel strategy
    #[arg(long)]
    pub parallel: bool,

    /// Split each result list into pages of this size
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}

/// Arguments for matching a single document
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    pub query: String,

    /// Document id
    #[arg(value_name = "ID")]
    pub id: DocumentId,

    /// Match with the parallel strategy
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for duplicate removal
#[derive(Parser, Debug, Clone)]
pub struct DedupArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl SearchArgs {
    pub fn policy(&self) -> ExecutionPolicy {
        policy_for(self.parallel)
    }
}

impl MatchArgs {
    pub fn policy(&self) -> ExecutionPolicy {
        policy_for(self.parallel)
    }
}

fn policy_for(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}
