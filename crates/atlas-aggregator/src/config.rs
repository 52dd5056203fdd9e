//! Aggregator configuration
//!
//! The project list is a JSON or YAML array of [`ProjectEntry`] values;
//! the format is picked from the file extension.

use crate::error::{AggregateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder replaced by the project id in [`AggregatorConfig::reference_template`]
pub const PROJECT_ID_PLACEHOLDER: &str = "{projectId}";

/// One project to aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    /// Expected project id, also used to name reference files
    pub project_id: String,
    /// Hosting repository, `owner/name`
    pub repo: String,
    /// Document path inside the repository
    pub path: String,
    /// Branch to try before the defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl ProjectEntry {
    /// Create an entry without an explicit branch
    pub fn new(project_id: impl Into<String>, repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            repo: repo.into(),
            path: path.into(),
            branch: None,
        }
    }

    /// Set the preferred branch
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

/// Batch aggregation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Documents loaded at the same time
    pub concurrency: usize,
    /// Documents larger than this are rejected unread
    pub max_document_bytes: u64,
    /// Reference file name; `{projectId}` is substituted
    pub reference_template: String,
}

impl AggregatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the load concurrency; zero is treated as one
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the document size limit
    #[must_use]
    pub fn with_max_document_bytes(mut self, bytes: u64) -> Self {
        self.max_document_bytes = bytes;
        self
    }

    /// Set the reference file name template
    #[must_use]
    pub fn with_reference_template(mut self, template: impl Into<String>) -> Self {
        self.reference_template = template.into();
        self
    }

    /// Reference file name for one project
    #[must_use]
    pub fn reference_file(&self, project_id: &str) -> String {
        self.reference_template.replace(PROJECT_ID_PLACEHOLDER, project_id)
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_document_bytes: 1024 * 1024,
            reference_template: format!("{PROJECT_ID_PLACEHOLDER}-project-summary-converted.md"),
        }
    }
}

/// Load the project list from a `.json`, `.yaml` or `.yml` file
///
/// # Errors
/// Returns `AggregateError` if the file cannot be read, is malformed or has
/// an unknown extension.
pub fn load_project_entries(path: &Path) -> Result<Vec<ProjectEntry>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let content = std::fs::read_to_string(path).map_err(|e| AggregateError::io(path, e))?;

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&content).map_err(|e| AggregateError::json(path, e)),
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|source| AggregateError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(AggregateError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_template_substitutes_project_id() {
        let config = AggregatorConfig::default();
        assert_eq!(config.reference_file("atlas"), "atlas-project-summary-converted.md");
    }

    #[test]
    fn builders_override_defaults() {
        let config = AggregatorConfig::new()
            .with_concurrency(0)
            .with_max_document_bytes(10)
            .with_reference_template("{projectId}.md");

        assert_eq!(config.concurrency, 1);
        assert_eq!(config.max_document_bytes, 10);
        assert_eq!(config.reference_file("x"), "x.md");
    }

    #[test]
    fn loads_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("projects.json");
        std::fs::write(
            &json,
            r#"[{"projectId":"a","repo":"acme/a","path":"PROJECT.md","branch":"dev"}]"#,
        )
        .unwrap();
        let yaml = dir.path().join("projects.yml");
        std::fs::write(&yaml, "- projectId: b\n  repo: acme/b\n  path: docs/PROJECT.md\n").unwrap();

        assert_eq!(
            load_project_entries(&json).unwrap(),
            vec![ProjectEntry::new("a", "acme/a", "PROJECT.md").with_branch("dev")]
        );
        assert_eq!(
            load_project_entries(&yaml).unwrap(),
            vec![ProjectEntry::new("b", "acme/b", "docs/PROJECT.md")]
        );
    }

    #[test]
    fn rejects_unknown_extension_and_bad_json() {
        let dir = TempDir::new().unwrap();
        let toml = dir.path().join("projects.toml");
        std::fs::write(&toml, "").unwrap();
        let broken = dir.path().join("projects.json");
        std::fs::write(&broken, "[{").unwrap();

        assert!(matches!(
            load_project_entries(&toml),
            Err(AggregateError::UnsupportedFormat(_))
        ));
        assert!(matches!(load_project_entries(&broken), Err(AggregateError::Json { .. })));
        assert!(matches!(
            load_project_entries(&dir.path().join("absent.json")),
            Err(AggregateError::Io { .. })
        ));
    }
}
