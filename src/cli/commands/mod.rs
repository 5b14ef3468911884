//! Command implementations for the geotrack processor CLI
//!
//! This module contains the main command execution logic, progress reporting,
//! and error handling for the CLI interface.

pub mod process;
pub mod shared;

// Re-export the main types and functions for backward compatibility
pub use shared::ProcessingStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Main command runner for the geotrack processor
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<ProcessingStats> {
    match args.command {
        Some(Commands::Process(process_args)) => {
            process::run_process(process_args, cancellation_token).await
        }
        None => Err(Error::configuration(
            "No command specified; run with --help for usage".to_string(),
        )),
    }
}
