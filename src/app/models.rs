//! Data models for track processing
//!
//! This module contains the core data structures for representing raw GPS
//! samples, validated/enriched track points, and the bulk-load manifest.

use crate::constants::OUTPUT_TIMESTAMP_FORMAT;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Track Point
// =============================================================================

/// One GPS sample exactly as it appears in the source document.
///
/// All fields are kept as strings: the parser enforces presence, while
/// numeric conversion (and its failure mode) belongs to the enricher.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrackPoint {
    /// Latitude in decimal degrees, as written in the `lat` attribute
    pub latitude: String,

    /// Longitude in decimal degrees, as written in the `lon` attribute
    pub longitude: String,

    /// ISO-8601 timestamp from the `time` element
    pub timestamp: String,

    /// Speed in source units, from the track point extension block
    pub speed: String,

    /// Course over ground in degrees, from the track point extension block
    pub course: String,
}

// =============================================================================
// Enriched Point
// =============================================================================

/// A validated, location-tagged track point ready for serialization.
///
/// Created one-at-a-time in strict sequence order by the enricher and
/// immutable afterwards; the enricher's previous-point cursor is a snapshot
/// copy of one of these, never a live reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPoint {
    /// Identifier of the originating track, stable for all points in a track
    pub track_name: String,

    /// Zero-based position within the track
    pub sequence_index: usize,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Point geometry built as (x = latitude, y = longitude).
    /// The axis order matches the binary encoding consumed downstream and
    /// must not be swapped.
    pub geometry: Point<f64>,

    /// Hex-text WKB serialization of `geometry`
    pub geometry_wkb: String,

    /// Normalized UTC timestamp of the fix
    pub recorded_at: DateTime<Utc>,

    /// Speed in source units
    pub speed: f64,

    /// Course over ground in degrees
    pub course: f64,

    /// Place name from the location index, or empty string on miss
    pub location_tag: String,

    /// Outcome of the validity decision rules
    pub is_valid: bool,
}

impl EnrichedPoint {
    /// Canonical output field names, in the order downstream consumers expect.
    ///
    /// Serialized formats must reproduce these names and this order verbatim.
    pub const FIELD_NAMES: [&'static str; 10] = [
        "track_name",
        "sequence_index",
        "latitude",
        "longitude",
        "geometry",
        "recorded_at",
        "speed",
        "course",
        "location_tag",
        "is_valid",
    ];

    /// Create a new EnrichedPoint with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        track_name: String,
        sequence_index: usize,
        latitude: f64,
        longitude: f64,
        geometry: Point<f64>,
        geometry_wkb: String,
        recorded_at: DateTime<Utc>,
        speed: f64,
        course: f64,
        location_tag: String,
        is_valid: bool,
    ) -> Result<Self> {
        let point = Self {
            track_name,
            sequence_index,
            latitude,
            longitude,
            geometry,
            geometry_wkb,
            recorded_at,
            speed,
            course,
            location_tag,
            is_valid,
        };

        point.validate()?;
        Ok(point)
    }

    /// Validate coordinate ranges and identifier consistency
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        if self.track_name.trim().is_empty() {
            return Err(Error::data_validation(
                "Track name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Coordinate pair as (latitude, longitude)
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Render the point as output field values in canonical order.
    ///
    /// Floats use the shortest round-trip rendering, the timestamp is
    /// space-separated, and validity is `1`/`0` for the bulk loader.
    pub fn output_fields(&self) -> [String; 10] {
        [
            self.track_name.clone(),
            self.sequence_index.to_string(),
            self.latitude.to_string(),
            self.longitude.to_string(),
            self.geometry_wkb.clone(),
            self.recorded_at.format(OUTPUT_TIMESTAMP_FORMAT).to_string(),
            self.speed.to_string(),
            self.course.to_string(),
            self.location_tag.clone(),
            (if self.is_valid { "1" } else { "0" }).to_string(),
        ]
    }
}

// =============================================================================
// Manifest
// =============================================================================

/// One produced output file, as referenced by the bulk loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Storage URL of the output file
    pub url: String,

    /// Whether the loader must fail if the file is missing
    pub mandatory: bool,
}

/// Summary of all output files produced by one processing run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_point() -> EnrichedPoint {
        EnrichedPoint::new(
            "morning_sail".to_string(),
            0,
            50.76,
            -1.29,
            Point::new(50.76, -1.29),
            "0101000000".to_string(),
            Utc.with_ymd_and_hms(2021, 8, 1, 10, 30, 0).unwrap(),
            5.2,
            90.0,
            "Cowes East".to_string(),
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_enriched_point_rejects_out_of_range_coordinates() {
        let mut point = sample_point();
        point.latitude = 91.0;
        assert!(point.validate().is_err());

        let mut point = sample_point();
        point.longitude = -181.0;
        assert!(point.validate().is_err());
    }

    #[test]
    fn test_enriched_point_rejects_empty_track_name() {
        let mut point = sample_point();
        point.track_name = "  ".to_string();
        assert!(point.validate().is_err());
    }

    #[test]
    fn test_output_fields_order_matches_field_names() {
        let point = sample_point();
        let fields = point.output_fields();

        assert_eq!(fields.len(), EnrichedPoint::FIELD_NAMES.len());
        assert_eq!(fields[0], "morning_sail");
        assert_eq!(fields[1], "0");
        assert_eq!(fields[2], "50.76");
        assert_eq!(fields[3], "-1.29");
        assert_eq!(fields[5], "2021-08-01 10:30:00");
        assert_eq!(fields[9], "1");
    }

    #[test]
    fn test_output_fields_renders_invalid_as_zero() {
        let mut point = sample_point();
        point.is_valid = false;
        assert_eq!(point.output_fields()[9], "0");
    }

    #[test]
    fn test_manifest_serialization_shape() {
        let manifest = Manifest {
            entries: vec![ManifestEntry {
                url: "s3://bucket/prefix/track.csv".to_string(),
                mandatory: true,
            }],
        };

        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(
            json,
            r#"{"entries":[{"url":"s3://bucket/prefix/track.csv","mandatory":true}]}"#
        );
    }
}
