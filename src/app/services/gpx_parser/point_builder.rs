//! Per-point field collection for GPX track points
//!
//! This module accumulates the fields of one `trkpt` element as XML events
//! arrive and enforces the required-field contract when the element closes.

use crate::app::models::RawTrackPoint;
use crate::{Error, Result};
use quick_xml::events::BytesStart;

/// Child fields of a track point captured from element text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointField {
    Time,
    Speed,
    Course,
}

impl PointField {
    /// Element name as it appears in the document (without namespace prefix)
    pub fn element_name(&self) -> &'static str {
        match self {
            PointField::Time => "time",
            PointField::Speed => "speed",
            PointField::Course => "course",
        }
    }
}

/// Collects the fields of one track point while its element is open
#[derive(Debug, Clone)]
pub struct PointBuilder {
    latitude: String,
    longitude: String,
    time: Option<String>,
    speed: Option<String>,
    course: Option<String>,
}

impl PointBuilder {
    /// Start a new point from the `trkpt` element's coordinate attributes
    pub fn new(latitude: String, longitude: String) -> Self {
        Self {
            latitude,
            longitude,
            time: None,
            speed: None,
            course: None,
        }
    }

    /// Record the text value of a captured child element
    pub fn set(&mut self, field: PointField, value: String) {
        match field {
            PointField::Time => self.time = Some(value),
            PointField::Speed => self.speed = Some(value),
            PointField::Course => self.course = Some(value),
        }
    }

    /// Finish the point, failing if any required field never appeared
    pub fn build(self, file: &str, point_index: usize) -> Result<RawTrackPoint> {
        let Self {
            latitude,
            longitude,
            time,
            speed,
            course,
        } = self;

        let timestamp = require(time, PointField::Time, file, point_index)?;
        let speed = require(speed, PointField::Speed, file, point_index)?;
        let course = require(course, PointField::Course, file, point_index)?;

        Ok(RawTrackPoint {
            latitude,
            longitude,
            timestamp,
            speed,
            course,
        })
    }
}

fn require(
    value: Option<String>,
    field: PointField,
    file: &str,
    point_index: usize,
) -> Result<String> {
    value.ok_or_else(|| {
        Error::gpx_format(
            file,
            format!(
                "track point {} is missing required element '{}'",
                point_index,
                field.element_name()
            ),
        )
    })
}

/// Read a required attribute from an element start tag
pub fn required_attribute(
    element: &BytesStart<'_>,
    name: &str,
    file: &str,
    point_index: usize,
) -> Result<String> {
    let attribute = element.try_get_attribute(name).map_err(|e| {
        Error::gpx_format(
            file,
            format!("track point {}: malformed attribute '{}': {}", point_index, name, e),
        )
    })?;

    match attribute {
        Some(attr) => {
            let value = attr.unescape_value().map_err(|e| {
                Error::gpx_format(
                    file,
                    format!(
                        "track point {}: unreadable attribute '{}': {}",
                        point_index, name, e
                    ),
                )
            })?;
            Ok(value.trim().to_string())
        }
        None => Err(Error::gpx_format(
            file,
            format!(
                "track point {} is missing required attribute '{}'",
                point_index, name
            ),
        )),
    }
}
