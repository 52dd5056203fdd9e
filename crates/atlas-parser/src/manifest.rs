//! Manifest block extraction
//!
//! A project document embeds its manifest between two HTML comment markers:
//!
//! ````text
//! <!-- PROJECT-MANIFEST:START -->
//! ```json
//! { "schemaVersion": 1, ... }
//! ```
//! <!-- PROJECT-MANIFEST:END -->
//! ````

use crate::error::{ParseError, ParseResult};
use crate::schema::validate_manifest;
use atlas_model::Manifest;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Opening manifest delimiter
pub const MANIFEST_START: &str = "<!-- PROJECT-MANIFEST:START -->";

/// Closing manifest delimiter
pub const MANIFEST_END: &str = "<!-- PROJECT-MANIFEST:END -->";

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("json fence pattern compiles"));

/// A located manifest and the document body around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBlock {
    /// Raw JSON payload, fence removed
    pub payload: String,
    /// Document with the delimited region removed, trimmed
    pub body: String,
}

/// Locate the manifest block.
///
/// Returns `None` when either delimiter is missing or the end delimiter does
/// not follow the start delimiter.
#[must_use]
pub fn extract_manifest(content: &str) -> Option<ManifestBlock> {
    let start = content.find(MANIFEST_START)?;
    let end = content.find(MANIFEST_END)?;
    if end <= start {
        return None;
    }

    let inner = content.get(start + MANIFEST_START.len()..end)?.trim();
    let payload = JSON_FENCE
        .captures(inner)
        .and_then(|caps| caps.get(1))
        .map_or(inner, |m| m.as_str())
        .trim()
        .to_string();

    let mut body = String::with_capacity(content.len());
    body.push_str(&content[..start]);
    body.push_str(&content[end + MANIFEST_END.len()..]);

    Some(ManifestBlock {
        payload,
        body: body.trim().to_string(),
    })
}

/// Parse a manifest payload and validate it.
///
/// # Errors
/// - `ParseError::ManifestSyntax` if the payload is not JSON
/// - `ParseError::ManifestSchema` if the JSON violates the manifest schema
pub fn parse_manifest(payload: &str) -> ParseResult<Manifest> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ParseError::manifest_syntax(e.to_string()))?;

    validate_manifest(&value).map_err(|errors| ParseError::ManifestSchema { errors })
}
