//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// skos-analysis - SKOS thesaurus term expansion
#[derive(Parser, Debug, Clone)]
#[command(name = "skos-analysis")]
#[command(about = "Expand terms against a SKOS thesaurus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SkosArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SkosArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the expansions of a single term
    Expand(ExpandArgs),

    /// Run text through the SKOS analyzer and print the token stream
    Analyze(AnalyzeArgs),

    /// Look up concepts by label or URI
    Lookup(LookupArgs),
}

/// Vocabulary and expansion options shared by the commands.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Vocabulary file (JSON Lines statements)
    #[arg(value_name = "VOCABULARY")]
    pub vocabulary: PathBuf,

    /// Expansion mode: label or uri
    #[arg(short, long, default_value = "label")]
    pub mode: String,

    /// Maximum number of relation hops
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub depth: i64,

    /// Comma separated relation kinds to follow
    #[arg(short, long, default_value = "broader,narrower,related")]
    pub relations: String,

    /// Depth origin: same_concept or label_hop
    #[arg(long, default_value = "same_concept")]
    pub depth_origin: String,

    /// Comma separated language tags to emit
    #[arg(short, long)]
    pub languages: Option<String>,

    /// Directory for the store cache
    #[arg(long, env = "SKOS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for expanding a term
#[derive(Args, Debug, Clone)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Term (label or URI, depending on mode)
    #[arg(value_name = "TERM")]
    pub term: String,
}

/// Arguments for analyzing text
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for looking up concepts
#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Vocabulary file (JSON Lines statements)
    #[arg(value_name = "VOCABULARY")]
    pub vocabulary: PathBuf,

    /// Label or URI to look up
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Treat TERM as a concept URI instead of a label
    #[arg(long)]
    pub by_id: bool,
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
