//! Error types for project document parsing
//!
//! Every error is scoped to a single document. Callers processing a batch
//! record the failure and move on to the next document.

use std::fmt;

/// Errors while turning a document into a `ParsedProject`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No start/end manifest delimiter pair was found
    #[error("manifest block not found")]
    ManifestMissing,

    /// Manifest payload is not valid JSON
    #[error("manifest is not valid JSON: {message}")]
    ManifestSyntax {
        /// JSON parser message
        message: String,
    },

    /// Manifest JSON violates the schema, one message per violation
    #[error("manifest validation failed: {}", .errors.join(", "))]
    ManifestSchema {
        /// One `<pointer>: <reason>` line per violation
        errors: Vec<String>,
    },

    /// Markdown structure could not be built
    #[error("section parse failure: {0}")]
    SectionParse(String),
}

impl ParseError {
    /// Create a JSON syntax error
    pub fn manifest_syntax(message: impl Into<String>) -> Self {
        Self::ManifestSyntax {
            message: message.into(),
        }
    }

    /// Create a section parse failure
    pub fn section_parse(message: impl Into<String>) -> Self {
        Self::SectionParse(message.into())
    }

    /// Discriminant without payload, for failure reports
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::ManifestMissing => ParseErrorKind::ManifestMissing,
            Self::ManifestSyntax { .. } => ParseErrorKind::ManifestSyntax,
            Self::ManifestSchema { .. } => ParseErrorKind::ManifestSchema,
            Self::SectionParse(_) => ParseErrorKind::SectionParse,
        }
    }

    /// True for both syntax and schema failures
    #[inline]
    #[must_use]
    pub fn is_manifest_invalid(&self) -> bool {
        matches!(self, Self::ManifestSyntax { .. } | Self::ManifestSchema { .. })
    }
}

/// Payload-free classification of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// See [`ParseError::ManifestMissing`]
    ManifestMissing,
    /// See [`ParseError::ManifestSyntax`]
    ManifestSyntax,
    /// See [`ParseError::ManifestSchema`]
    ManifestSchema,
    /// See [`ParseError::SectionParse`]
    SectionParse,
}

impl ParseErrorKind {
    /// Stable name used in logs and failure listings
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManifestMissing => "manifest_missing",
            Self::ManifestSyntax => "manifest_syntax",
            Self::ManifestSchema => "manifest_schema",
            Self::SectionParse => "section_parse",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias for parser operations
pub type ParseResult<T> = Result<T, ParseError>;
