//! Application constants for the geotrack processor
//!
//! This module contains configuration constants, default values,
//! and the built-in location table used throughout the application.

// =============================================================================
// File Names and Patterns
// =============================================================================

/// Track file extension (matched case-insensitively during discovery)
pub const TRACK_FILE_EXTENSION: &str = "gpx";

/// Output file extension for per-track delimited tables
pub const OUTPUT_FILE_EXTENSION: &str = "csv";

/// Manifest file written once per run, after all tracks are processed
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Sentinel files preserved by directory cleanup
pub const CLEANUP_KEEP_FILE: &str = ".gitkeep";

/// Default input directory for track files
pub const DEFAULT_INPUT_DIR: &str = "downloads";

/// Default output directory for delimited tables and the manifest
pub const DEFAULT_OUTPUT_DIR: &str = "uploads";

// =============================================================================
// Point Validation Constants
// =============================================================================

/// Maximum plausible geodesic distance between consecutive fixes, in meters.
///
/// Consecutive samples further apart than this are treated as GPS jumps and
/// marked invalid. Tuned for vessel motion at typical sample rates.
pub const DEFAULT_VALID_POINT_DISTANCE_METERS: f64 = 1000.0;

/// Delimiter between fields in per-track output rows
pub const OUTPUT_FIELD_DELIMITER: u8 = b'|';

// =============================================================================
// Location Tagging Constants
// =============================================================================

/// Number of leading characters kept from each coordinate's decimal rendering
/// when building a location lookup key (e.g. "50.76")
pub const COORDINATE_PREFIX_LEN: usize = 5;

/// Separator between the truncated latitude and longitude in a lookup key
pub const LOCATION_KEY_SEPARATOR: char = ';';

/// Built-in coordinate-prefix to place-name table.
///
/// Keys are `<lat-prefix>;<lon-prefix>` with both coordinates truncated to
/// [`COORDINATE_PREFIX_LEN`] characters. Used when no location file is
/// supplied on the command line.
pub const KNOWN_LOCATIONS: &[(&str, &str)] = &[
    ("50.76;-1.29", "Cowes East"),
    ("50.76;-1.30", "Cowes"),
    ("50.83;-0.96", "Hayling Island (Havant)"),
    ("50.80;-0.94", "Hayling Island"),
];

// =============================================================================
// Storage Constants
// =============================================================================

/// Default object-storage bucket referenced by manifest entries
pub const DEFAULT_STORAGE_BUCKET: &str = "my-test-bucket";

/// Default object-storage key prefix referenced by manifest entries
pub const DEFAULT_STORAGE_PREFIX: &str = "geo-processing";

// =============================================================================
// Performance Constants
// =============================================================================

/// Default number of parallel track workers (0 = use available cores)
pub const DEFAULT_PARALLEL_WORKERS: usize = 0;

/// Timestamp rendering used in output rows (space-separated, no "T")
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
