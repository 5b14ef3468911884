//! GPX parser for recorded track files
//!
//! This module provides a strict parser for GPX documents focused on the
//! track → track-segment → track-point chain and the extension fields the
//! validation pipeline depends on. Required structure or fields that are
//! missing produce errors rather than silently defaulted values, since a
//! defaulted speed or course would corrupt downstream validity decisions.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Core parsing orchestration and XML event handling
//! - [`point_builder`] - Per-point field collection and required-field checks
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use geotrack_processor::app::services::gpx_parser::GpxParser;
//!
//! # fn example() -> geotrack_processor::Result<()> {
//! let parser = GpxParser::new();
//! let track = parser.parse_file(std::path::Path::new("morning_sail.gpx"))?;
//!
//! println!("Parsed {} points from track '{}'",
//!          track.stats.points_parsed,
//!          track.track_name);
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod point_builder;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::GpxParser;
pub use stats::{ParseStats, ParsedTrack};
