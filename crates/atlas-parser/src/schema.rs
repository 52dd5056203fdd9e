//! Manifest schema validation
//!
//! The manifest is checked against a draft-7 JSON Schema before it is
//! deserialized into the typed [`Manifest`]. Unknown properties are allowed
//! so that documents written for newer schema versions still carry their
//! extra fields through untouched.

use atlas_model::{Manifest, SCHEMA_VERSION};
use jsonschema::{JSONSchema, ValidationError};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static MANIFEST_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    JSONSchema::compile(&manifest_schema()).expect("manifest schema is a valid draft-7 document")
});

/// The manifest schema for [`SCHEMA_VERSION`]
#[must_use]
pub fn manifest_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "schemaVersion",
            "projectId",
            "name",
            "repo",
            "visibility",
            "status",
            "domain",
            "type",
            "lastUpdated",
            "links",
            "tags"
        ],
        "properties": {
            "schemaVersion": { "type": "number", "const": SCHEMA_VERSION },
            "projectId": { "type": "string" },
            "name": { "type": "string" },
            "repo": { "type": "string" },
            "visibility": { "type": "string", "enum": ["public", "staging", "private"] },
            "status": { "type": "string", "enum": ["active", "mvp", "paused", "archived"] },
            "domain": { "type": "string", "enum": ["music", "minecraft", "management", "other"] },
            "type": {
                "type": "string",
                "enum": ["webapp", "microservice", "tool", "cli", "library", "other"]
            },
            "lastUpdated": { "type": "string" },
            "links": {
                "type": "object",
                "required": ["prod", "staging"],
                "properties": {
                    "prod": { "type": ["string", "null"] },
                    "staging": { "type": ["string", "null"] }
                }
            },
            "tags": { "type": "array", "items": { "type": "string" } }
        },
        "additionalProperties": true
    })
}

/// Validate a JSON value and convert it into a typed manifest.
///
/// # Errors
/// Returns one message per violated constraint, each prefixed with the
/// JSON pointer of the offending field.
pub fn validate_manifest(value: &Value) -> Result<Manifest, Vec<String>> {
    if let Err(errors) = MANIFEST_SCHEMA.validate(value) {
        return Err(errors.map(|e| describe(&e)).collect());
    }

    serde_json::from_value(value.clone()).map_err(|e| vec![format!("/: {e}")])
}

fn describe(error: &ValidationError<'_>) -> String {
    let path = error.instance_path.to_string();
    if path.is_empty() {
        format!("/: {error}")
    } else {
        format!("{path}: {error}")
    }
}
