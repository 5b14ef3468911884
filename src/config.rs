//! Configuration management and validation.
//!
//! Provides configuration structures for processing paths, point validation
//! parameters, performance tuning and logging, with CLI overrides applied on
//! top of the defaults.

use crate::constants::{
    DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_PARALLEL_WORKERS, DEFAULT_STORAGE_BUCKET,
    DEFAULT_STORAGE_PREFIX, DEFAULT_VALID_POINT_DISTANCE_METERS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Processing paths and storage addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Directory scanned for track files
    pub input_path: PathBuf,

    /// Directory receiving per-track tables and the manifest
    pub output_path: PathBuf,

    /// Optional zip archive unpacked into the input directory before discovery
    pub archive: Option<PathBuf>,

    /// Optional JSON file replacing the built-in location table
    pub locations_file: Option<PathBuf>,

    /// Object-storage bucket referenced by manifest entries
    pub storage_bucket: String,

    /// Object-storage key prefix referenced by manifest entries
    pub storage_prefix: String,

    /// Show what would be processed without writing output
    pub dry_run: bool,
}

/// Point validation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum plausible distance between consecutive fixes, in meters
    pub distance_threshold_meters: f64,
}

/// Performance tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Number of tracks processed concurrently (0 = available cores)
    pub parallel_workers: usize,
}

/// Logging preferences derived from CLI flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level name ("error", "warn", "info", "debug", "trace")
    pub level: String,

    /// Whether full structured output is enabled (false in quiet mode)
    pub structured: bool,
}

/// Global configuration for track processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub validation: ValidationConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig {
                input_path: PathBuf::from(DEFAULT_INPUT_DIR),
                output_path: PathBuf::from(DEFAULT_OUTPUT_DIR),
                archive: None,
                locations_file: None,
                storage_bucket: DEFAULT_STORAGE_BUCKET.to_string(),
                storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
                dry_run: false,
            },
            validation: ValidationConfig {
                distance_threshold_meters: DEFAULT_VALID_POINT_DISTANCE_METERS,
            },
            performance: PerformanceConfig {
                parallel_workers: DEFAULT_PARALLEL_WORKERS,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                structured: true,
            },
        }
    }
}

impl Config {
    /// Create configuration with explicit input and output paths
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        let mut config = Self::default();
        config.processing.input_path = input_path;
        config.processing.output_path = output_path;
        config
    }

    /// Create configuration with a custom distance threshold
    pub fn with_distance_threshold(mut self, meters: f64) -> Self {
        self.validation.distance_threshold_meters = meters;
        self
    }

    /// Create configuration with a custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.performance.parallel_workers = workers;
        self
    }

    /// Create configuration with custom storage addressing
    pub fn with_storage(mut self, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.processing.storage_bucket = bucket.into();
        self.processing.storage_prefix = prefix.into();
        self
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self) -> Self {
        self.processing.dry_run = true;
        self
    }

    /// Number of workers after resolving the "use available cores" default
    pub fn resolved_workers(&self) -> usize {
        if self.performance.parallel_workers == 0 {
            num_cpus::get()
        } else {
            self.performance.parallel_workers
        }
    }

    /// Path the run's manifest is written to
    pub fn manifest_path(&self) -> PathBuf {
        self.processing
            .output_path
            .join(crate::constants::MANIFEST_FILE_NAME)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if !self.validation.distance_threshold_meters.is_finite()
            || self.validation.distance_threshold_meters <= 0.0
        {
            return Err(Error::configuration(format!(
                "Distance threshold must be a positive number of meters, got {}",
                self.validation.distance_threshold_meters
            )));
        }

        if self.processing.storage_bucket.trim().is_empty() {
            return Err(Error::configuration(
                "Storage bucket cannot be empty".to_string(),
            ));
        }

        if let Some(archive) = &self.processing.archive {
            if !archive.exists() {
                return Err(Error::configuration(format!(
                    "Archive does not exist: {}",
                    archive.display()
                )));
            }
        }

        if let Some(locations) = &self.processing.locations_file {
            if !locations.exists() {
                return Err(Error::configuration(format!(
                    "Locations file does not exist: {}",
                    locations.display()
                )));
            }
        }

        Ok(())
    }

    /// Ensure the output directory exists, creating it if necessary
    pub fn ensure_output_directory(&self) -> Result<()> {
        if !self.processing.output_path.exists() {
            std::fs::create_dir_all(&self.processing.output_path).map_err(|e| {
                Error::configuration(format!(
                    "Failed to create output directory '{}': {}",
                    self.processing.output_path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
