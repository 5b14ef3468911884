//! Tests for the fix validity decision rules

use super::*;
use crate::app::services::track_enricher::validity::{geodesic_distance_meters, is_fix_valid};

fn previous_at(lat: f64, lon: f64) -> crate::app::models::EnrichedPoint {
    let enricher = create_test_enricher();
    let raw = moving_fix(&lat.to_string(), &lon.to_string());
    enricher.enrich("validity_test", 0, &raw, None).unwrap()
}

#[test]
fn test_zero_speed_is_invalid_regardless_of_anything_else() {
    // Rule 1 short-circuits: course and distance never get a say
    assert!(!is_fix_valid(0.0, 90.0, (50.76, -1.29), None, 1000.0));

    let previous = previous_at(50.76, -1.29);
    assert!(!is_fix_valid(
        0.0,
        90.0,
        (50.76, -1.29),
        Some(&previous),
        1000.0
    ));
}

#[test]
fn test_negative_speed_is_invalid() {
    assert!(!is_fix_valid(-1.5, 90.0, (50.76, -1.29), None, 1000.0));
}

#[test]
fn test_non_positive_course_is_invalid() {
    assert!(!is_fix_valid(5.0, 0.0, (50.76, -1.29), None, 1000.0));
    assert!(!is_fix_valid(5.0, -10.0, (50.76, -1.29), None, 1000.0));
}

#[test]
fn test_first_point_judged_by_speed_and_course_only() {
    // No previous point: rule 3 cannot fire even at an absurd location
    assert!(is_fix_valid(5.2, 90.0, (50.76, -1.29), None, 1000.0));
    assert!(is_fix_valid(5.2, 90.0, (12.34, 56.78), None, 1000.0));
}

#[test]
fn test_nearby_consecutive_fix_is_valid() {
    // 50.76,-1.29 to 50.76,-1.30 is roughly 700 m at this latitude
    let previous = previous_at(50.76, -1.29);
    assert!(is_fix_valid(
        5.0,
        90.0,
        (50.76, -1.30),
        Some(&previous),
        1000.0
    ));
}

#[test]
fn test_distant_consecutive_fix_is_invalid() {
    // One degree of latitude is ~111 km, far above the 1000 m threshold
    let previous = previous_at(50.76, -1.29);
    assert!(!is_fix_valid(
        5.0,
        90.0,
        (51.76, -1.29),
        Some(&previous),
        1000.0
    ));
}

#[test]
fn test_threshold_is_configurable() {
    let previous = previous_at(50.76, -1.29);

    // ~700 m hop: valid at 1000 m, invalid when the threshold drops to 100 m
    assert!(is_fix_valid(
        5.0,
        90.0,
        (50.76, -1.30),
        Some(&previous),
        1000.0
    ));
    assert!(!is_fix_valid(
        5.0,
        90.0,
        (50.76, -1.30),
        Some(&previous),
        100.0
    ));
}

#[test]
fn test_geodesic_distance_sanity() {
    // Same point
    let distance = geodesic_distance_meters((50.76, -1.29), (50.76, -1.29));
    assert!(distance.abs() < 1e-6);

    // 0.01 degrees of longitude at latitude 50.76: around 700 m
    let distance = geodesic_distance_meters((50.76, -1.29), (50.76, -1.30));
    assert!(
        (600.0..800.0).contains(&distance),
        "unexpected distance: {distance}"
    );

    // One degree of latitude: around 111 km
    let distance = geodesic_distance_meters((50.76, -1.29), (51.76, -1.29));
    assert!(
        (110_000.0..113_000.0).contains(&distance),
        "unexpected distance: {distance}"
    );
}

#[test]
fn test_geodesic_distance_is_symmetric() {
    let forward = geodesic_distance_meters((50.76, -1.29), (50.83, -0.96));
    let backward = geodesic_distance_meters((50.83, -0.96), (50.76, -1.29));
    assert!((forward - backward).abs() < 1e-6);
}
