//! Integration tests for the full track processing pipeline
//!
//! These tests drive parse -> enrich -> write -> manifest end-to-end through
//! the public library API, using GPX fixtures written to a temp directory.

use std::path::Path;
use std::sync::Arc;

use geotrack_processor::app::adapters::filesystem::discover_track_files;
use geotrack_processor::app::services::gpx_parser::GpxParser;
use geotrack_processor::app::services::manifest::ManifestBuilder;
use geotrack_processor::app::services::track_enricher::{LocationIndex, TrackEnricher};
use geotrack_processor::app::services::track_writer::TrackWriter;
use geotrack_processor::config::ValidationConfig;
use tempfile::TempDir;

fn gpx_document(points: &[(&str, &str, &str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="integration-test"
     xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">
  <trk>
    <trkseg>
"#,
    );
    for (lat, lon, time, speed, course) in points {
        body.push_str(&format!(
            r#"      <trkpt lat="{lat}" lon="{lon}">
        <time>{time}</time>
        <extensions>
          <gpxtpx:TrackPointExtension>
            <gpxtpx:speed>{speed}</gpxtpx:speed>
            <gpxtpx:course>{course}</gpxtpx:course>
          </gpxtpx:TrackPointExtension>
        </extensions>
      </trkpt>
"#
        ));
    }
    body.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
    body
}

fn create_enricher() -> TrackEnricher {
    TrackEnricher::new(
        Arc::new(LocationIndex::default()),
        ValidationConfig {
            distance_threshold_meters: 1000.0,
        },
    )
}

fn process_one(input: &Path, output_dir: &Path) -> geotrack_processor::Result<String> {
    let parser = GpxParser::new();
    let track = parser.parse_file(input)?;
    let enriched = create_enricher().enrich_track(&track.track_name, &track.points)?;
    TrackWriter::new(output_dir).write_track(&track.track_name, &enriched)?;
    Ok(track.track_name)
}

#[test]
fn test_full_pipeline_produces_expected_rows() {
    let temp_dir = TempDir::new().unwrap();

    // Three-point track: valid fix at Cowes East, moored fix, ~111 km jump
    let document = gpx_document(&[
        ("50.76", "-1.29", "2021-08-01T10:00:00Z", "5.2", "90.0"),
        ("50.76", "-1.3012", "2021-08-01T10:00:10Z", "0.0", "90.0"),
        ("51.76", "-1.3012", "2021-08-01T10:00:20Z", "5.0", "90.0"),
    ]);
    let input = temp_dir.path().join("solent_run.gpx");
    std::fs::write(&input, document).unwrap();

    let track_name = process_one(&input, temp_dir.path()).unwrap();
    assert_eq!(track_name, "solent_run");

    let content = std::fs::read_to_string(temp_dir.path().join("solent_run.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);

    // Header row appears exactly once, in canonical field order
    assert_eq!(
        lines[0],
        "track_name|sequence_index|latitude|longitude|geometry|recorded_at|speed|course|location_tag|is_valid"
    );
    assert_eq!(
        content.matches("track_name|sequence_index").count(),
        1,
        "header must appear exactly once"
    );

    // Point 0: valid, tagged Cowes East
    let fields: Vec<&str> = lines[1].split('|').collect();
    assert_eq!(fields[0], "solent_run");
    assert_eq!(fields[1], "0");
    assert_eq!(fields[2], "50.76");
    assert_eq!(fields[3], "-1.29");
    assert_eq!(fields[5], "2021-08-01 10:00:00");
    assert_eq!(fields[8], "Cowes East");
    assert_eq!(fields[9], "1");

    // Point 1: zero speed -> invalid, tagged Cowes
    let fields: Vec<&str> = lines[2].split('|').collect();
    assert_eq!(fields[1], "1");
    assert_eq!(fields[8], "Cowes");
    assert_eq!(fields[9], "0");

    // Point 2: distance jump -> invalid, no known location
    let fields: Vec<&str> = lines[3].split('|').collect();
    assert_eq!(fields[1], "2");
    assert_eq!(fields[8], "");
    assert_eq!(fields[9], "0");
}

#[test]
fn test_malformed_track_produces_no_output_file() {
    let temp_dir = TempDir::new().unwrap();

    // Second point is missing its course element
    let document = r#"<?xml version="1.0"?>
<gpx><trk><trkseg>
  <trkpt lat="50.76" lon="-1.29">
    <time>2021-08-01T10:00:00Z</time><speed>5.0</speed><course>90.0</course>
  </trkpt>
  <trkpt lat="50.76" lon="-1.30">
    <time>2021-08-01T10:00:10Z</time><speed>5.0</speed>
  </trkpt>
</trkseg></trk></gpx>"#;
    let input = temp_dir.path().join("broken_track.gpx");
    std::fs::write(&input, document).unwrap();

    let result = process_one(&input, temp_dir.path());

    assert!(result.is_err());
    assert!(
        !temp_dir.path().join("broken_track.csv").exists(),
        "malformed input must not leave partial output"
    );
}

#[test]
fn test_manifest_references_processed_tracks_only() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("in");
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::create_dir_all(&output_dir).unwrap();

    let good = gpx_document(&[("50.83", "-0.96", "2021-08-01T10:00:00Z", "3.1", "45.0")]);
    std::fs::write(input_dir.join("harbour_loop.gpx"), good).unwrap();
    std::fs::write(input_dir.join("garbage.gpx"), "<gpx><trk/></gpx>").unwrap();

    let mut manifest_builder = ManifestBuilder::new("my-test-bucket", "geo-processing");
    let mut failures = 0;

    for file in discover_track_files(&input_dir).unwrap() {
        match process_one(&file, &output_dir) {
            Ok(track_name) => manifest_builder.add_track(&track_name),
            Err(_) => failures += 1,
        }
    }

    let manifest_path = output_dir.join("manifest.json");
    manifest_builder.write(&manifest_path).unwrap();

    assert_eq!(failures, 1);
    let manifest = std::fs::read_to_string(&manifest_path).unwrap();
    assert_eq!(
        manifest,
        r#"{"entries":[{"url":"s3://my-test-bucket/geo-processing/harbour_loop.csv","mandatory":true}]}"#
    );
}

#[test]
fn test_enrichment_matches_known_location_scenarios() {
    let temp_dir = TempDir::new().unwrap();

    let document = gpx_document(&[
        ("50.83", "-0.96", "2021-08-01T09:00:00Z", "2.5", "180.0"),
        ("12.34", "56.78", "2021-08-01T09:00:05Z", "2.5", "180.0"),
    ]);
    let input = temp_dir.path().join("tag_check.gpx");
    std::fs::write(&input, document).unwrap();

    let parser = GpxParser::new();
    let track = parser.parse_file(&input).unwrap();
    let enriched = create_enricher()
        .enrich_track(&track.track_name, &track.points)
        .unwrap();

    assert_eq!(enriched[0].location_tag, "Hayling Island (Havant)");
    assert_eq!(enriched[1].location_tag, "");
}
