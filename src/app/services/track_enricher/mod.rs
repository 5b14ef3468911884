//! Point validation and enrichment for GPS tracks
//!
//! This module converts raw GPS samples into enriched, serialization-ready
//! records. For each point it decides whether the fix is trustworthy and
//! attaches a coarse location label, carrying exactly one piece of rolling
//! state: the previously produced point of the same track.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`enricher`] - Main TrackEnricher struct and per-point orchestration
//! - [`validity`] - The fix validity decision rules and geodesic distance
//! - [`location`] - Coordinate-prefix location index and lookup
//! - [`geometry`] - Point geometry construction and WKB hex encoding
//!
//! # Validity Rules
//!
//! Rules are evaluated in order; the first match wins:
//!
//! 1. Non-positive speed: stationary vessel or zero-speed sensor glitch
//! 2. Non-positive course: missing or garbage heading
//! 3. Geodesic distance to the previous point above the configured
//!    threshold: GPS jump inconsistent with plausible vessel motion
//! 4. Otherwise the fix is valid
//!
//! The first point of a track has no previous point, so rule 3 cannot fire.

pub mod enricher;
pub mod geometry;
pub mod location;
pub mod validity;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use enricher::TrackEnricher;
pub use location::LocationIndex;

// Re-export utility functions that might be useful externally
pub use geometry::{decode_wkb_hex, encode_wkb_hex, point_geometry};
pub use validity::{geodesic_distance_meters, is_fix_valid};
