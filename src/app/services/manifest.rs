//! Bulk-load manifest builder
//!
//! Accumulates one entry per successfully processed track and writes a
//! single Redshift-style JSON manifest once all tracks are finished. Tracks
//! that failed never appear, so the loader only sees complete files.

use std::path::Path;

use tracing::info;

use crate::app::models::{Manifest, ManifestEntry};
use crate::constants::OUTPUT_FILE_EXTENSION;
use crate::{Error, Result};

/// Builder accumulating manifest entries over one processing run
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    bucket: String,
    prefix: String,
    manifest: Manifest,
}

impl ManifestBuilder {
    /// Create a builder addressing the given bucket and key prefix
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            manifest: Manifest::default(),
        }
    }

    /// Storage URL a track's output file will be loaded from
    pub fn storage_url(&self, track_name: &str) -> String {
        format!(
            "s3://{}/{}/{}.{}",
            self.bucket, self.prefix, track_name, OUTPUT_FILE_EXTENSION
        )
    }

    /// Record a successfully processed track
    pub fn add_track(&mut self, track_name: &str) {
        let url = self.storage_url(track_name);
        self.manifest.entries.push(ManifestEntry {
            url,
            mandatory: true,
        });
    }

    /// Number of recorded entries
    pub fn entry_count(&self) -> usize {
        self.manifest.entries.len()
    }

    /// The accumulated manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Write the manifest as JSON to the given path
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(&self.manifest)
            .map_err(|e| Error::manifest_writing("Failed to serialize manifest", e))?;

        std::fs::write(path, json)
            .map_err(|e| Error::io(format!("Failed to write manifest {}", path.display()), e))?;

        info!(
            "Wrote manifest with {} entries to {}",
            self.entry_count(),
            path.display()
        );

        Ok(())
    }
}
