//! Filesystem adapter: track discovery, archive unpacking, cleanup
//!
//! The cleanup helpers deliberately log and swallow deletion failures; that
//! degraded-but-non-fatal behavior is confined to this module and never
//! reaches the validation/enrichment core.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::constants::{CLEANUP_KEEP_FILE, TRACK_FILE_EXTENSION};
use crate::{Error, Result};

/// Discover track files under a directory, sorted for deterministic
/// processing order
pub fn discover_track_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(Error::file_not_found(input_dir.display().to_string()));
    }

    let mut track_files = Vec::new();

    for entry in WalkDir::new(input_dir).follow_links(false) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_track_extension(path) {
            track_files.push(path.to_path_buf());
        }
    }

    track_files.sort();

    debug!(
        "Discovered {} track files in {}",
        track_files.len(),
        input_dir.display()
    );
    for file in &track_files {
        debug!("  Found: {}", file.display());
    }

    Ok(track_files)
}

fn has_track_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRACK_FILE_EXTENSION))
}

/// Unpack a zip archive of track files into the destination directory.
///
/// Returns the number of archive members extracted.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<usize> {
    info!(
        "Extracting archive {} into {}",
        archive_path.display(),
        destination.display()
    );

    let file = File::open(archive_path).map_err(|e| {
        Error::io(
            format!("Failed to open archive {}", archive_path.display()),
            e,
        )
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        Error::archive_extraction(
            format!("Failed to read archive {}", archive_path.display()),
            e,
        )
    })?;

    let member_count = archive.len();

    archive.extract(destination).map_err(|e| {
        Error::archive_extraction(
            format!(
                "Failed to extract archive {} into {}",
                archive_path.display(),
                destination.display()
            ),
            e,
        )
    })?;

    info!("Extracted {} archive members", member_count);
    Ok(member_count)
}

/// Delete a file, logging instead of failing when deletion is impossible
pub fn remove_file_quiet(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Failed to delete {}: {}", path.display(), e);
    }
}

/// Delete all regular files directly inside a directory, preserving the
/// `.gitkeep` sentinel. Deletion failures are logged and skipped.
pub fn clean_directory(dir: &Path) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == CLEANUP_KEEP_FILE)
        {
            continue;
        }
        remove_file_quiet(&path);
    }
}
