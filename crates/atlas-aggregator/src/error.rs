//! Error types for the aggregator
//!
//! - [`SourceError`]: a document could not be loaded
//! - [`AggregateError`]: configuration or output I/O failed
//! - [`FailureKind`]: classification of one failed document in a batch

use atlas_parser::{ParseError, ParseErrorKind};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Loading a document failed
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No document at the requested location
    #[error("document not found: {location}")]
    NotFound {
        /// Where the document was looked up
        location: String,
    },

    /// Repository is not of the form `owner/name`
    #[error("invalid repository {repo:?}, expected owner/name")]
    InvalidRepo {
        /// The rejected value
        repo: String,
    },

    /// The host refused access
    #[error("access denied to {location}")]
    Forbidden {
        /// Where access was refused
        location: String,
    },

    /// Document exceeds the configured size limit
    #[error("document {location} is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Where the document lives
        location: String,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Document is not valid UTF-8
    #[error("document {location} is not valid UTF-8")]
    NotUtf8 {
        /// Where the document lives
        location: String,
    },

    /// Filesystem failure
    #[error("i/o error reading {path}: {source}")]
    Io {
        /// The path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Any other host failure
    #[error("{0}")]
    Other(String),
}

impl SourceError {
    /// Create a not-found error
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::NotFound { location: location.into() }
    }

    /// Create an access-denied error
    pub fn forbidden(location: impl Into<String>) -> Self {
        Self::Forbidden { location: location.into() }
    }

    /// True when falling through to another location is appropriate
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Fatal aggregator error
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// Filesystem failure while reading config or writing output
    #[error("i/o error at {path}: {source}")]
    Io {
        /// The path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON config or data file is malformed
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// The offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// YAML config file is malformed
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        /// The offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_yaml::Error,
    },

    /// A value could not be encoded as JSON
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Config file extension is neither JSON nor YAML
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Required file is missing
    #[error("file not found: {0}")]
    Missing(PathBuf),

    /// Project id cannot be used as a file name
    #[error("project id {0:?} is not a valid file name")]
    InvalidProjectId(String),
}

impl AggregateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

/// Result type for aggregator operations
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Why a single document was dropped from a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The source had no document
    NotFound,
    /// The source failed for another reason
    Source,
    /// The parser rejected the document
    Parse(ParseErrorKind),
    /// Another document already claimed the same project id
    DuplicateProjectId,
    /// The project id cannot be used as an output file name
    InvalidProjectId,
}

impl FailureKind {
    /// Stable machine-readable name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Source => "source",
            Self::Parse(kind) => kind.as_str(),
            Self::DuplicateProjectId => "duplicate_project_id",
            Self::InvalidProjectId => "invalid_project_id",
        }
    }
}

impl Serialize for FailureKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&SourceError> for FailureKind {
    fn from(err: &SourceError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Source
        }
    }
}

impl From<&ParseError> for FailureKind {
    fn from(err: &ParseError) -> Self {
        Self::Parse(err.kind())
    }
}
