//! Pipe-delimited row serializer for enriched tracks
//!
//! Writes one delimited file per track: a single header row with the
//! canonical field names, then one row per point in sequence order. The
//! writer is only invoked once a track has enriched completely, so a
//! malformed input file never leaves partial output behind.

use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::app::models::EnrichedPoint;
use crate::constants::{OUTPUT_FIELD_DELIMITER, OUTPUT_FILE_EXTENSION};
use crate::{Error, Result};

/// Result of writing one track's output file
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Path of the produced file
    pub output_path: PathBuf,

    /// Data rows written (excluding the header)
    pub rows_written: usize,

    /// Size of the produced file in bytes
    pub bytes_written: u64,
}

/// Writer producing per-track delimited tables
#[derive(Debug, Clone)]
pub struct TrackWriter {
    output_dir: PathBuf,
}

impl TrackWriter {
    /// Create a writer targeting an output directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the given track's table is written to
    pub fn output_path(&self, track_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", track_name, OUTPUT_FILE_EXTENSION))
    }

    /// Write one track's enriched points as a delimited table
    pub fn write_track(&self, track_name: &str, points: &[EnrichedPoint]) -> Result<WriteResult> {
        let output_path = self.output_path(track_name);
        debug!(
            "Writing {} rows to {}",
            points.len(),
            output_path.display()
        );

        let mut writer = WriterBuilder::new()
            .delimiter(OUTPUT_FIELD_DELIMITER)
            .from_path(&output_path)
            .map_err(|e| {
                Error::csv_writing(
                    format!("Failed to create output file {}", output_path.display()),
                    Some(e),
                )
            })?;

        writer.write_record(EnrichedPoint::FIELD_NAMES)?;

        for point in points {
            writer.write_record(point.output_fields())?;
        }

        writer.flush().map_err(|e| {
            Error::io(
                format!("Failed to flush output file {}", output_path.display()),
                e,
            )
        })?;

        let bytes_written = file_size(&output_path)?;

        info!(
            "Wrote track '{}': {} rows, {} bytes",
            track_name,
            points.len(),
            bytes_written
        );

        Ok(WriteResult {
            output_path,
            rows_written: points.len(),
            bytes_written,
        })
    }
}

fn file_size(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use geo::Point;
    use tempfile::TempDir;

    fn sample_points(track_name: &str) -> Vec<EnrichedPoint> {
        (0..2)
            .map(|i| {
                EnrichedPoint::new(
                    track_name.to_string(),
                    i,
                    50.76,
                    -1.29,
                    Point::new(50.76, -1.29),
                    "0101000000".to_string(),
                    Utc.with_ymd_and_hms(2021, 8, 1, 10, 0, i as u32).unwrap(),
                    5.2,
                    90.0,
                    "Cowes East".to_string(),
                    i == 0,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_write_track_produces_header_and_rows() {
        let temp_dir = TempDir::new().unwrap();
        let writer = TrackWriter::new(temp_dir.path());

        let result = writer
            .write_track("morning_sail", &sample_points("morning_sail"))
            .unwrap();

        assert_eq!(result.rows_written, 2);
        assert!(result.bytes_written > 0);

        let content = std::fs::read_to_string(&result.output_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "track_name|sequence_index|latitude|longitude|geometry|recorded_at|speed|course|location_tag|is_valid"
        );
        assert_eq!(
            lines[1],
            "morning_sail|0|50.76|-1.29|0101000000|2021-08-01 10:00:00|5.2|90|Cowes East|1"
        );
        assert!(lines[2].ends_with("|0"));
    }

    #[test]
    fn test_output_path_uses_track_name_and_extension() {
        let writer = TrackWriter::new("out");
        assert_eq!(
            writer.output_path("morning_sail"),
            PathBuf::from("out/morning_sail.csv")
        );
    }

    #[test]
    fn test_write_track_to_missing_directory_fails() {
        let writer = TrackWriter::new("/nonexistent/output/dir");
        let result = writer.write_track("morning_sail", &sample_points("morning_sail"));
        assert!(result.is_err());
    }
}
