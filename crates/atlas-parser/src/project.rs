//! Project document parser - main entry point
//!
//! Runs manifest extraction, manifest validation and section segmentation
//! in that order. There is no partial result: a document either yields a
//! complete [`ParsedProject`] or an error.

use crate::error::{ParseError, ParseResult};
use crate::manifest::{extract_manifest, parse_manifest};
use crate::segment::segment;
use atlas_model::ParsedProject;
use std::path::Path;

/// Project document parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectParser;

impl ProjectParser {
    /// Create new project parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a project document.
    ///
    /// # Errors
    /// - `ParseError::ManifestMissing` if no manifest block is present
    /// - `ParseError::ManifestSyntax` / `ParseError::ManifestSchema` if the
    ///   manifest is invalid
    /// - `ParseError::SectionParse` if the markdown body cannot be structured
    pub fn parse(&self, content: &str) -> ParseResult<ParsedProject> {
        let block = extract_manifest(content).ok_or(ParseError::ManifestMissing)?;
        let manifest = parse_manifest(&block.payload)?;
        let body = segment(&block.body)?;

        tracing::debug!(
            project_id = %manifest.project_id,
            sections = body.sections.len(),
            work_items = body.work_items.len(),
            "parsed project document"
        );

        Ok(ParsedProject::new(manifest, body.sections))
    }

    /// Check if this parser can handle the given path
    #[must_use]
    pub fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().contains(&ext))
            .unwrap_or(false)
    }

    /// Supported file extensions (without dot)
    #[must_use]
    pub fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }
}

/// Parse a project document with the default parser
///
/// # Errors
/// See [`ProjectParser::parse`].
pub fn parse_project(content: &str) -> ParseResult<ParsedProject> {
    ProjectParser::new().parse(content)
}
