//! Command-line argument definitions for the geotrack processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::{
    DEFAULT_PARALLEL_WORKERS, DEFAULT_STORAGE_BUCKET, DEFAULT_STORAGE_PREFIX,
    DEFAULT_VALID_POINT_DISTANCE_METERS,
};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the GPS track processor
///
/// Converts recorded GPS tracks (GPX files) into validated, location-tagged
/// pipe-delimited tables plus a bulk-load manifest.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geotrack-processor",
    version,
    about = "Convert GPS track files into validated delimited tables for bulk loading",
    long_about = "A production-ready tool that parses GPX track files, validates every GPS fix \
                  against speed, course and geodesic-distance rules, tags fixes with coarse \
                  place names, and writes one pipe-delimited table per track plus a JSON \
                  manifest for bulk loading into a warehouse."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the geotrack processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process GPX track files into delimited tables and a manifest
    Process(ProcessArgs),
}

/// Arguments for the process command (main data processing)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input path containing GPX track files
    ///
    /// Scanned recursively for files with a .gpx extension.
    /// If not specified, defaults to ./downloads
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input directory scanned for GPX track files"
    )]
    pub input_path: Option<PathBuf>,

    /// Output path for generated tables and the manifest
    ///
    /// Will be created if it doesn't exist. One <track>.csv file is written
    /// per input track, plus manifest.json.
    /// If not specified, defaults to ./uploads
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for delimited tables and the manifest"
    )]
    pub output_path: Option<PathBuf>,

    /// Zip archive to unpack into the input directory before discovery
    ///
    /// Covers the local half of an upstream download step: the archive is
    /// extracted in place and its track files processed like any other.
    #[arg(
        long = "archive",
        value_name = "FILE",
        help = "Zip archive unpacked into the input directory before processing"
    )]
    pub archive: Option<PathBuf>,

    /// JSON file replacing the built-in known-locations table
    ///
    /// An object mapping coordinate-prefix keys to place names, e.g.
    /// {"50.76;-1.29": "Cowes East"}.
    #[arg(
        long = "locations",
        value_name = "FILE",
        help = "JSON file of coordinate-prefix to place-name pairs"
    )]
    pub locations_file: Option<PathBuf>,

    /// Maximum plausible distance between consecutive fixes, in meters
    ///
    /// Consecutive points further apart than this are flagged as GPS jumps
    /// and marked invalid.
    #[arg(
        long = "distance-threshold",
        value_name = "METERS",
        default_value_t = DEFAULT_VALID_POINT_DISTANCE_METERS,
        help = "Distance threshold for outlier detection, in meters"
    )]
    pub distance_threshold: f64,

    /// Number of parallel workers
    ///
    /// Controls how many tracks are processed concurrently. Each track is
    /// always processed sequentially point-by-point.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = DEFAULT_PARALLEL_WORKERS,
        help = "Number of parallel track workers (0 = available cores)"
    )]
    pub workers: usize,

    /// Object-storage bucket referenced by manifest entries
    #[arg(
        long = "storage-bucket",
        value_name = "NAME",
        default_value = DEFAULT_STORAGE_BUCKET,
        help = "Object-storage bucket referenced by manifest entries"
    )]
    pub storage_bucket: String,

    /// Object-storage key prefix referenced by manifest entries
    #[arg(
        long = "storage-prefix",
        value_name = "KEY",
        default_value = DEFAULT_STORAGE_PREFIX,
        help = "Object-storage key prefix referenced by manifest entries"
    )]
    pub storage_prefix: String,

    /// Perform a dry run without actual processing
    ///
    /// Shows what would be processed without creating any output files.
    #[arg(
        long = "dry-run",
        help = "Show what would be processed without creating output files"
    )]
    pub dry_run: bool,

    /// Delete input track files after a successful run
    ///
    /// Deletion failures are logged and skipped; .gitkeep sentinels are
    /// preserved.
    #[arg(
        long = "clean",
        help = "Delete input track files after a successful run"
    )]
    pub clean_input: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", help = "Suppress non-error output")]
    pub quiet: bool,

    /// Output format for the final report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Final report format"
    )]
    pub output_format: OutputFormat,
}

/// Output formats for the final processing report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON for machine consumption
    Json,
    /// CSV metrics for data analysis
    Csv,
}

impl ProcessArgs {
    /// Resolve the log level name from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether progress bars should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate argument combinations before building the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(Error::configuration(format!(
                "--distance-threshold must be a positive number of meters, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}
