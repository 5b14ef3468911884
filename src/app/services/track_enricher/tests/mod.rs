//! Test utilities and fixtures for track enricher testing

use std::sync::Arc;

use crate::app::models::RawTrackPoint;
use crate::app::services::track_enricher::{LocationIndex, TrackEnricher};
use crate::config::ValidationConfig;

mod location_tests;
mod validity_tests;

/// Helper to build a raw point from string fields
pub fn raw_point(lat: &str, lon: &str, time: &str, speed: &str, course: &str) -> RawTrackPoint {
    RawTrackPoint {
        latitude: lat.to_string(),
        longitude: lon.to_string(),
        timestamp: time.to_string(),
        speed: speed.to_string(),
        course: course.to_string(),
    }
}

/// Helper to build a plausible moving fix at the given coordinates
pub fn moving_fix(lat: &str, lon: &str) -> RawTrackPoint {
    raw_point(lat, lon, "2021-08-01T10:00:00Z", "5.0", "90.0")
}

/// Helper to create an enricher with the built-in location table and the
/// default 1000 m distance threshold
pub fn create_test_enricher() -> TrackEnricher {
    TrackEnricher::new(
        Arc::new(LocationIndex::default()),
        ValidationConfig {
            distance_threshold_meters: 1000.0,
        },
    )
}
