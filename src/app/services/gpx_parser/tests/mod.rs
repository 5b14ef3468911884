//! Test utilities and fixtures for GPX parser testing
//!
//! This module provides common GPX document fixtures and helper functions
//! used across the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a complete two-point GPX document
pub fn create_test_gpx() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1"
     xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">
  <trk>
    <name>Morning sail</name>
    <trkseg>
      <trkpt lat="50.76" lon="-1.29">
        <time>2021-08-01T10:00:00Z</time>
        <extensions>
          <gpxtpx:TrackPointExtension>
            <gpxtpx:speed>5.2</gpxtpx:speed>
            <gpxtpx:course>90.0</gpxtpx:course>
          </gpxtpx:TrackPointExtension>
        </extensions>
      </trkpt>
      <trkpt lat="50.76" lon="-1.30">
        <time>2021-08-01T10:00:10Z</time>
        <extensions>
          <gpxtpx:TrackPointExtension>
            <gpxtpx:speed>4.8</gpxtpx:speed>
            <gpxtpx:course>92.5</gpxtpx:course>
          </gpxtpx:TrackPointExtension>
        </extensions>
      </trkpt>
    </trkseg>
  </trk>
</gpx>"#
        .to_string()
}

/// Helper to create a GPX document whose point is missing the speed element
pub fn create_gpx_missing_speed() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"
     xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">
  <trk>
    <trkseg>
      <trkpt lat="50.76" lon="-1.29">
        <time>2021-08-01T10:00:00Z</time>
        <extensions>
          <gpxtpx:TrackPointExtension>
            <gpxtpx:course>90.0</gpxtpx:course>
          </gpxtpx:TrackPointExtension>
        </extensions>
      </trkpt>
    </trkseg>
  </trk>
</gpx>"#
        .to_string()
}

/// Helper to create a GPX document with no track segment
pub fn create_gpx_without_segment() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <metadata>
    <time>2021-08-01T10:00:00Z</time>
  </metadata>
  <wpt lat="50.76" lon="-1.29"><name>Buoy</name></wpt>
</gpx>"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_gpx(content: &str) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new()
        .suffix(".gpx")
        .tempfile()
        .unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
