//! # Vantage - Observability Maturity Assessment
//!
//! The main binary for the Vantage questionnaire.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 apps/vantage (THE BINARY)                 │
//! │                                                           │
//! │  ┌─────────────┐   ┌──────────────────┐   ┌───────────┐  │
//! │  │   CLI       │   │  Terminal Wizard │   │  Config   │  │
//! │  │  (clap)     │   │  (line adapter)  │   │  (toml)   │  │
//! │  └──────┬──────┘   └────────┬─────────┘   └─────┬─────┘  │
//! │         └───────────────────┼───────────────────┘        │
//! │                             ▼                            │
//! │                    ┌────────────────┐                    │
//! │                    │  vantage-core  │                    │
//! │                    │  (THE LOGIC)   │                    │
//! │                    └────────────────┘                    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Take the assessment
//! vantage run
//!
//! # Score a prepared answers file
//! vantage score -a answers.toml --json-mode
//!
//! # Customize the questionnaire
//! vantage init -o vantage.toml
//! vantage -c vantage.toml run
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vantage::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing. VANTAGE_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr so they never mix with wizard or JSON output.
    let log_format = std::env::var("VANTAGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "vantage=debug"
    } else {
        "vantage=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Vantage startup banner.
fn print_banner() {
    println!(
        r#"
  ╦  ╦╔═╗╔╗╔╔╦╗╔═╗╔═╗╔═╗
  ╚╗╔╝╠═╣║║║ ║ ╠═╣║ ╦║╣
   ╚╝ ╩ ╩╝╚╝ ╩ ╩ ╩╚═╝╚═╝

  Observability Maturity Assessment v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
