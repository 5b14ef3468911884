//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the CLI command implementations.

use crate::cli::args::ProcessArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

/// Processing statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of track files discovered
    pub tracks_discovered: usize,
    /// Number of tracks processed successfully
    pub tracks_processed: usize,
    /// Number of points written across all tracks
    pub points_processed: usize,
    /// Number of points that passed the validity rules
    pub valid_points: usize,
    /// Number of errors encountered
    pub errors_encountered: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for the process command
pub fn setup_logging(args: &ProcessArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("geotrack_processor={}", log_level)));

    // Set up subscriber based on output format preference
    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build the run configuration from defaults plus CLI argument overrides
pub fn build_configuration(args: &ProcessArgs) -> Result<Config> {
    info!("Building configuration");

    let mut config = Config::default();

    // Override path settings if explicitly provided
    if let Some(input_path) = &args.input_path {
        config.processing.input_path = input_path.clone();
    }
    if let Some(output_path) = &args.output_path {
        config.processing.output_path = output_path.clone();
    }
    config.processing.archive = args.archive.clone();
    config.processing.locations_file = args.locations_file.clone();

    // Override processing settings
    config.processing.storage_bucket = args.storage_bucket.clone();
    config.processing.storage_prefix = args.storage_prefix.clone();
    config.processing.dry_run = args.dry_run;

    // Override validation settings
    config.validation.distance_threshold_meters = args.distance_threshold;

    // Override performance settings
    config.performance.parallel_workers = args.workers;

    // Override logging settings
    config.logging.level = args.get_log_level().to_string();
    config.logging.structured = !args.quiet;

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Validate and prepare the output directory
pub fn prepare_directories(config: &Config) -> Result<()> {
    info!("Preparing output directory");

    config.ensure_output_directory()?;

    info!(
        "Output directory prepared: {}",
        config.processing.output_path.display()
    );
    Ok(())
}

/// Check if an error is critical enough to stop processing
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::ProcessingInterrupted { .. }
    )
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
