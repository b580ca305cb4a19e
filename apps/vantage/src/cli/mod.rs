//! # Vantage CLI Module
//!
//! This module implements the CLI interface for Vantage.
//!
//! ## Available Commands
//!
//! - `run` - Walk through the questionnaire in the terminal (default)
//! - `score` - Score an answers file
//! - `categorize` - Show the category for a score
//! - `show` - Print the active questionnaire
//! - `init` - Write a config file with the built-in questionnaire

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vantage_core::AssessmentError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Vantage - Observability Maturity Assessment
///
/// A multi-step questionnaire that scores your observability practice
/// and suggests where to go next.
#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (questionnaire and thresholds)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through the questionnaire interactively
    Run,

    /// Score an answers file (JSON or TOML)
    Score {
        /// Path to the answers file
        #[arg(short, long)]
        answers: PathBuf,
    },

    /// Show the maturity category for a score
    Categorize {
        /// Composite score
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Print the active questionnaire
    Show,

    /// Write a config file with the built-in questionnaire and thresholds
    Init {
        /// Output file path
        #[arg(short, long, default_value = "vantage.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), AssessmentError> {
    let config = cli.config.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Run) | None => cmd_run(config, json_mode),
        Some(Commands::Score { answers }) => cmd_score(config, json_mode, &answers),
        Some(Commands::Categorize { score }) => cmd_categorize(config, json_mode, score),
        Some(Commands::Show) => cmd_show(config, json_mode),
        Some(Commands::Init { output, force }) => cmd_init(&output, force),
    }
}
