//! Parsing statistics and result structures

use crate::app::models::RawTrackPoint;

/// Result of parsing one GPX file
#[derive(Debug, Clone)]
pub struct ParsedTrack {
    /// Track identifier derived from the source file stem
    pub track_name: String,

    /// Points in document order; the ordering is load-bearing for the
    /// enricher's adjacency rule
    pub points: Vec<RawTrackPoint>,

    /// Statistics gathered while parsing
    pub stats: ParseStats,
}

/// Statistics for one parse operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Track segments encountered
    pub segments_seen: usize,

    /// Track points successfully parsed
    pub points_parsed: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }
}
