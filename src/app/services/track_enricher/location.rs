//! Coordinate-prefix location index
//!
//! Maps truncated coordinate renderings to place names. Matching is an
//! approximate proximity heuristic, not a geometric nearest-neighbor search:
//! both coordinates are rendered as decimal strings, truncated to a fixed
//! prefix length, and joined into a lookup key. The behavior is kept
//! bit-for-bit compatible with the table existing downstream consumers were
//! built against.
//!
//! The index is immutable after construction and injected into the enricher,
//! so a proper spatial index can replace it later without touching the
//! decision algorithm's contract.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::constants::{COORDINATE_PREFIX_LEN, KNOWN_LOCATIONS, LOCATION_KEY_SEPARATOR};
use crate::{Error, Result};

/// Immutable lookup table from coordinate-prefix keys to place names
#[derive(Debug, Clone)]
pub struct LocationIndex {
    entries: HashMap<String, String>,
}

impl Default for LocationIndex {
    fn default() -> Self {
        Self::from_pairs(KNOWN_LOCATIONS)
    }
}

impl LocationIndex {
    /// Build an index from `("lat;lon", "name")` pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(key, name)| (key.to_string(), name.to_string()))
            .collect();
        Self { entries }
    }

    /// Load an index from a JSON object file (`{"50.76;-1.29": "Cowes East"}`)
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io_error(format!(
                "Failed to read locations file {}: {}",
                path.display(),
                e
            ))
        })?;

        let entries: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid locations file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            "Loaded {} known locations from {}",
            entries.len(),
            path.display()
        );

        Ok(Self { entries })
    }

    /// Find the place name for a coordinate pair, or empty string on miss.
    ///
    /// A miss is a graceful degradation, never an error.
    pub fn lookup(&self, latitude: f64, longitude: f64) -> String {
        self.entries
            .get(&Self::lookup_key(latitude, longitude))
            .cloned()
            .unwrap_or_default()
    }

    /// Build the lookup key for a coordinate pair
    pub fn lookup_key(latitude: f64, longitude: f64) -> String {
        format!(
            "{}{}{}",
            coordinate_prefix(latitude),
            LOCATION_KEY_SEPARATOR,
            coordinate_prefix(longitude)
        )
    }

    /// Number of known locations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Truncate a coordinate's decimal rendering to the configured prefix length
fn coordinate_prefix(value: f64) -> String {
    value
        .to_string()
        .chars()
        .take(COORDINATE_PREFIX_LEN)
        .collect()
}
