//! Core GPX parser implementation
//!
//! This module provides the main parser orchestration: file reading, XML
//! event handling, and enforcement of the required document structure
//! (gpx → trk → trkseg → trkpt).

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info};

use super::point_builder::{PointBuilder, PointField, required_attribute};
use super::stats::{ParseStats, ParsedTrack};
use crate::app::models::RawTrackPoint;
use crate::{Error, Result};

/// GPX parser for recorded track files
///
/// This parser focuses on essential functionality:
/// - Strict structural checks (a document without a track segment is an error)
/// - Required-field enforcement per track point (no silent defaults)
/// - Namespace-agnostic matching of extension elements (speed, course)
/// - Document-order output, one pass per file
#[derive(Debug, Default)]
pub struct GpxParser;

impl GpxParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a GPX file and return its name, points and statistics
    pub fn parse_file(&self, file_path: &Path) -> Result<ParsedTrack> {
        info!("Parsing GPX file: {}", file_path.display());

        let file = file_path.display().to_string();

        let track_name = file_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.to_string())
            .ok_or_else(|| {
                Error::gpx_format(&file, "cannot derive a track name from the file name")
            })?;

        let content = std::fs::read_to_string(file_path).map_err(|e| {
            Error::io_error(format!("Failed to read file {}: {}", file_path.display(), e))
        })?;

        let (points, stats) = self.parse_document(&content, &file)?;

        info!(
            "Parsed {} points from {} segments in track '{}'",
            stats.points_parsed, stats.segments_seen, track_name
        );

        Ok(ParsedTrack {
            track_name,
            points,
            stats,
        })
    }

    /// Parse a GPX document string into points in document order
    ///
    /// The `file` argument is used for error context only.
    pub fn parse_document(&self, content: &str, file: &str) -> Result<(Vec<RawTrackPoint>, ParseStats)> {
        let mut reader = Reader::from_str(content);

        let mut stats = ParseStats::new();
        let mut points: Vec<RawTrackPoint> = Vec::new();

        let mut saw_gpx = false;
        let mut in_trk = false;
        let mut in_trkseg = false;
        let mut current: Option<PointBuilder> = None;
        let mut text_target: Option<PointField> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::gpx_format(
                    file,
                    format!("XML error at position {}: {}", reader.buffer_position(), e),
                )
            })?;

            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"gpx" => saw_gpx = true,
                    b"trk" => in_trk = true,
                    b"trkseg" if in_trk => {
                        in_trkseg = true;
                        stats.segments_seen += 1;
                    }
                    b"trkpt" if in_trkseg => {
                        let index = stats.points_parsed;
                        let lat = required_attribute(&e, "lat", file, index)?;
                        let lon = required_attribute(&e, "lon", file, index)?;
                        current = Some(PointBuilder::new(lat, lon));
                    }
                    b"time" if current.is_some() => text_target = Some(PointField::Time),
                    b"speed" if current.is_some() => text_target = Some(PointField::Speed),
                    b"course" if current.is_some() => text_target = Some(PointField::Course),
                    _ => {}
                },
                Event::Empty(e) => {
                    // A self-closing trkpt carries no time or extension block;
                    // run it through the builder so the error names the field.
                    if e.local_name().as_ref() == b"trkpt" && in_trkseg {
                        let index = stats.points_parsed;
                        let lat = required_attribute(&e, "lat", file, index)?;
                        let lon = required_attribute(&e, "lon", file, index)?;
                        let point = PointBuilder::new(lat, lon).build(file, index)?;
                        points.push(point);
                        stats.points_parsed += 1;
                    }
                }
                Event::Text(t) => {
                    if let (Some(builder), Some(field)) = (current.as_mut(), text_target) {
                        let value = t.unescape().map_err(|e| {
                            Error::gpx_format(
                                file,
                                format!(
                                    "unreadable text in element '{}': {}",
                                    field.element_name(),
                                    e
                                ),
                            )
                        })?;
                        let value = value.trim();
                        if !value.is_empty() {
                            builder.set(field, value.to_string());
                        }
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"trkpt" => {
                        if let Some(builder) = current.take() {
                            let point = builder.build(file, stats.points_parsed)?;
                            points.push(point);
                            stats.points_parsed += 1;
                        }
                        text_target = None;
                    }
                    b"time" | b"speed" | b"course" => text_target = None,
                    b"trkseg" => in_trkseg = false,
                    b"trk" => in_trk = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        // Structural checks: the chain gpx -> trk -> trkseg -> trkpt must exist
        if !saw_gpx {
            return Err(Error::gpx_format(file, "document has no 'gpx' root element"));
        }
        if stats.segments_seen == 0 {
            return Err(Error::gpx_format(
                file,
                "document contains no track segment (trk/trkseg)",
            ));
        }
        if stats.points_parsed == 0 {
            return Err(Error::gpx_format(
                file,
                "track segment contains no track points",
            ));
        }

        debug!(
            "Parsed document '{}': {} segments, {} points",
            file, stats.segments_seen, stats.points_parsed
        );

        Ok((points, stats))
    }
}
