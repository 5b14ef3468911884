//! Geotrack Processor Library
//!
//! A Rust library for converting recorded GPS tracks (GPX files) into
//! validated, location-tagged delimited tables for downstream bulk loading.
//!
//! This library provides tools for:
//! - Parsing GPX documents with strict required-field handling
//! - Validating each GPS fix against speed, course and geodesic-distance rules
//! - Tagging fixes with coarse place names from an injectable location index
//! - Writing pipe-delimited per-track output files
//! - Building a Redshift-style JSON manifest of all produced files
//! - Comprehensive error handling with per-file isolation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod gpx_parser;
        pub mod manifest;
        pub mod track_enricher;
        pub mod track_writer;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EnrichedPoint, RawTrackPoint};
pub use app::services::track_enricher::TrackEnricher;
pub use config::Config;

/// Result type alias for the geotrack processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for track processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// GPX document structure or field error
    #[error("GPX format error in file '{file}': {message}")]
    GpxFormat { file: String, message: String },

    /// CSV writing error
    #[error("CSV writing error: {message}")]
    CsvWriting {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Manifest serialization error
    #[error("Manifest writing error: {message}")]
    ManifestWriting {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Geometry decoding error
    #[error("Geometry decoding error: {message}")]
    GeometryDecoding { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Archive extraction error
    #[error("Archive extraction error: {message}")]
    ArchiveExtraction {
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::other(message_str),
        }
    }

    /// Create a GPX format error
    pub fn gpx_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GpxFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a CSV writing error with context
    pub fn csv_writing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a manifest writing error
    pub fn manifest_writing(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ManifestWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a geometry decoding error
    pub fn geometry_decoding(message: impl Into<String>) -> Self {
        Self::GeometryDecoding {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create an archive extraction error
    pub fn archive_extraction(message: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::ArchiveExtraction {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvWriting {
            message: "CSV writing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::ManifestWriting {
            message: "Manifest serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(error: zip::result::ZipError) -> Self {
        Self::ArchiveExtraction {
            message: "Archive extraction failed".to_string(),
            source: error,
        }
    }
}
