//! Point geometry construction and WKB hex encoding
//!
//! Enriched points carry their coordinates twice: as a point geometry and as
//! a hex-text WKB serialization of that geometry for transport in delimited
//! output. The geometry is built with x = latitude, y = longitude, the axis
//! order existing downstream decoders expect; it must never be swapped.

use geo::Point;

use crate::{Error, Result};

/// WKB byte-order marker for little-endian encoding
const WKB_LITTLE_ENDIAN: u8 = 0x01;

/// WKB geometry type id for a 2-D point
const WKB_POINT_TYPE: u32 = 1;

/// Encoded size of a 2-D point: byte order + type + two f64 coordinates
const WKB_POINT_BYTES: usize = 1 + 4 + 8 + 8;

/// Build the point geometry for a coordinate pair.
///
/// x = latitude, y = longitude.
pub fn point_geometry(latitude: f64, longitude: f64) -> Point<f64> {
    Point::new(latitude, longitude)
}

/// Serialize a point geometry as lowercase hex WKB
pub fn encode_wkb_hex(point: &Point<f64>) -> String {
    let mut bytes = Vec::with_capacity(WKB_POINT_BYTES);
    bytes.push(WKB_LITTLE_ENDIAN);
    bytes.extend_from_slice(&WKB_POINT_TYPE.to_le_bytes());
    bytes.extend_from_slice(&point.x().to_le_bytes());
    bytes.extend_from_slice(&point.y().to_le_bytes());
    hex::encode(bytes)
}

/// Decode a hex WKB string back into a point geometry
pub fn decode_wkb_hex(encoded: &str) -> Result<Point<f64>> {
    let bytes = hex::decode(encoded)
        .map_err(|e| Error::geometry_decoding(format!("invalid hex encoding: {}", e)))?;

    if bytes.len() != WKB_POINT_BYTES {
        return Err(Error::geometry_decoding(format!(
            "expected {} bytes for a WKB point, got {}",
            WKB_POINT_BYTES,
            bytes.len()
        )));
    }

    if bytes[0] != WKB_LITTLE_ENDIAN {
        return Err(Error::geometry_decoding(format!(
            "unsupported WKB byte order marker 0x{:02x}",
            bytes[0]
        )));
    }

    let geometry_type = u32::from_le_bytes(array_from(&bytes[1..5])?);
    if geometry_type != WKB_POINT_TYPE {
        return Err(Error::geometry_decoding(format!(
            "unsupported WKB geometry type {}",
            geometry_type
        )));
    }

    let x = f64::from_le_bytes(array_from(&bytes[5..13])?);
    let y = f64::from_le_bytes(array_from(&bytes[13..21])?);

    Ok(Point::new(x, y))
}

fn array_from<const N: usize>(slice: &[u8]) -> Result<[u8; N]> {
    slice
        .try_into()
        .map_err(|_| Error::geometry_decoding("truncated WKB payload".to_string()))
}
