//! Main track enricher implementation
//!
//! This module contains the TrackEnricher struct coordinating per-point
//! enrichment: numeric conversion of the raw fields, geometry construction,
//! location tagging, and the validity decision.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use super::geometry::{encode_wkb_hex, point_geometry};
use super::location::LocationIndex;
use super::validity::is_fix_valid;
use crate::app::models::{EnrichedPoint, RawTrackPoint};
use crate::config::ValidationConfig;
use crate::{Error, Result};

/// Point validator and enricher for GPS tracks
///
/// The enricher converts each [`RawTrackPoint`] into an [`EnrichedPoint`],
/// deciding validity and computing the location tag. The only rolling state
/// is the previously produced point, passed in explicitly as a cursor so
/// each call stays pure and tracks can be processed in parallel without
/// shared mutable state.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use geotrack_processor::app::services::track_enricher::{LocationIndex, TrackEnricher};
/// use geotrack_processor::config::ValidationConfig;
///
/// # fn example(points: Vec<geotrack_processor::app::models::RawTrackPoint>)
/// #     -> geotrack_processor::Result<()> {
/// let locations = Arc::new(LocationIndex::default());
/// let enricher = TrackEnricher::new(locations, ValidationConfig {
///     distance_threshold_meters: 1000.0,
/// });
///
/// let enriched = enricher.enrich_track("morning_sail", &points)?;
/// println!("Enriched {} points", enriched.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TrackEnricher {
    /// Location index for tag lookups
    locations: Arc<LocationIndex>,
    /// Validation configuration
    config: ValidationConfig,
}

impl TrackEnricher {
    /// Create a new enricher with a location index and validation configuration
    pub fn new(locations: Arc<LocationIndex>, config: ValidationConfig) -> Self {
        Self { locations, config }
    }

    /// Enrich a single raw point.
    ///
    /// Raw fields that fail numeric or timestamp conversion produce an error
    /// that propagates to the caller; nothing is defaulted or suppressed here.
    ///
    /// # Arguments
    ///
    /// * `track_name` - Identifier of the originating track
    /// * `sequence_index` - Zero-based position of the point within the track
    /// * `raw` - The raw sample to convert
    /// * `previous` - The immediately preceding enriched point of the same
    ///   track, or `None` for the first point
    ///
    /// # Returns
    ///
    /// The enriched point carrying validity and location-tag annotations
    pub fn enrich(
        &self,
        track_name: &str,
        sequence_index: usize,
        raw: &RawTrackPoint,
        previous: Option<&EnrichedPoint>,
    ) -> Result<EnrichedPoint> {
        let latitude = parse_numeric_field(track_name, sequence_index, "latitude", &raw.latitude)?;
        let longitude =
            parse_numeric_field(track_name, sequence_index, "longitude", &raw.longitude)?;
        let speed = parse_numeric_field(track_name, sequence_index, "speed", &raw.speed)?;
        let course = parse_numeric_field(track_name, sequence_index, "course", &raw.course)?;
        let recorded_at = parse_timestamp(track_name, sequence_index, &raw.timestamp)?;

        let geometry = point_geometry(latitude, longitude);
        let geometry_wkb = encode_wkb_hex(&geometry);

        let location_tag = self.locations.lookup(latitude, longitude);

        let is_valid = is_fix_valid(
            speed,
            course,
            (latitude, longitude),
            previous,
            self.config.distance_threshold_meters,
        );

        EnrichedPoint::new(
            track_name.to_string(),
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
        )
    }

    /// Enrich a whole track in sequence order.
    ///
    /// Drives the previous-point cursor over the points as a fold; the cursor
    /// is a snapshot copy of the last produced point, never a live reference.
    /// The first conversion failure aborts the track.
    pub fn enrich_track(
        &self,
        track_name: &str,
        points: &[RawTrackPoint],
    ) -> Result<Vec<EnrichedPoint>> {
        let mut enriched = Vec::with_capacity(points.len());
        let mut cursor: Option<EnrichedPoint> = None;

        for (sequence_index, raw) in points.iter().enumerate() {
            let point = self.enrich(track_name, sequence_index, raw, cursor.as_ref())?;
            cursor = Some(point.clone());
            enriched.push(point);
        }

        debug!(
            "Enriched track '{}': {} points, {} valid",
            track_name,
            enriched.len(),
            enriched.iter().filter(|p| p.is_valid).count()
        );

        Ok(enriched)
    }

    /// Get the location index used by this enricher
    pub fn locations(&self) -> &LocationIndex {
        &self.locations
    }

    /// Get the validation configuration used by this enricher
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

/// Parse a required numeric raw field, naming the field on failure
fn parse_numeric_field(
    track_name: &str,
    sequence_index: usize,
    field: &str,
    value: &str,
) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        Error::data_validation(format!(
            "Track '{}' point {}: field '{}' is not numeric: '{}'",
            track_name, sequence_index, field, value
        ))
    })
}

/// Parse the raw ISO-8601 timestamp into UTC.
///
/// Accepts RFC 3339 ("2021-08-01T10:00:00Z", offset forms), the bare
/// "T"-separated form without zone, and the already space-separated form;
/// naive timestamps are taken as UTC.
fn parse_timestamp(
    track_name: &str,
    sequence_index: usize,
    value: &str,
) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed.and_utc());
    }

    match NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        Ok(parsed) => Ok(parsed.and_utc()),
        Err(e) => Err(Error::datetime_parsing(
            format!(
                "Track '{}' point {}: unparseable timestamp '{}'",
                track_name, sequence_index, value
            ),
            e,
        )),
    }
}
