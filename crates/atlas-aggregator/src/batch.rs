//! Batch aggregation
//!
//! Loads every configured document with bounded concurrency, parses each one
//! independently and collects failures instead of stopping. Results keep the
//! order of the configured entries.

use crate::config::{AggregatorConfig, ProjectEntry};
use crate::error::FailureKind;
use crate::source::DocumentSource;
use crate::writer::is_valid_project_id;
use atlas_model::{ParsedProject, ProjectSummary};
use atlas_parser::ProjectParser;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashSet;

/// One document that did not make it into the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFailure {
    /// Configured project id of the document
    pub document_id: String,
    /// Failure classification
    pub kind: FailureKind,
    /// Human-readable detail
    pub message: String,
}

/// Outcome of one aggregation run
#[derive(Debug, Clone, Default)]
pub struct AggregationReport {
    /// Successfully parsed projects, in configuration order
    pub projects: Vec<ParsedProject>,
    /// Documents that failed, in configuration order
    pub failures: Vec<DocumentFailure>,
}

impl AggregationReport {
    /// True when nothing failed or at least one project was parsed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() || !self.projects.is_empty()
    }

    /// Counts-only projection of every parsed project
    #[must_use]
    pub fn summaries(&self) -> Vec<ProjectSummary> {
        self.projects.iter().map(ProjectSummary::from_project).collect()
    }
}

/// Load and parse every entry.
///
/// Per-document failures are recorded in the report; this never fails as a
/// whole. A document whose `projectId` is not a plain file name is rejected
/// as [`FailureKind::InvalidProjectId`]; one whose `projectId` was already
/// produced by an earlier entry is rejected as
/// [`FailureKind::DuplicateProjectId`].
pub async fn aggregate<S>(entries: &[ProjectEntry], source: &S, config: &AggregatorConfig) -> AggregationReport
where
    S: DocumentSource + ?Sized,
{
    let parser = &ProjectParser::new();

    let outcomes: Vec<(&ProjectEntry, Result<ParsedProject, DocumentFailure>)> =
        stream::iter(entries)
            .map(|entry| async move { (entry, load_one(entry, source, parser).await) })
            .buffered(config.concurrency.max(1))
            .collect()
            .await;

    let mut report = AggregationReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (entry, outcome) in outcomes {
        let failure = match outcome {
            Ok(project) if !is_valid_project_id(&project.manifest.project_id) => DocumentFailure {
                document_id: entry.project_id.clone(),
                kind: FailureKind::InvalidProjectId,
                message: format!(
                    "projectId {:?} cannot be used as a file name",
                    project.manifest.project_id
                ),
            },
            Ok(project) if seen.insert(project.manifest.project_id.clone()) => {
                report.projects.push(project);
                continue;
            }
            Ok(project) => DocumentFailure {
                document_id: entry.project_id.clone(),
                kind: FailureKind::DuplicateProjectId,
                message: format!(
                    "projectId {:?} already produced by an earlier document",
                    project.manifest.project_id
                ),
            },
            Err(failure) => failure,
        };

        tracing::warn!(
            document = %failure.document_id,
            kind = %failure.kind,
            "{}",
            failure.message
        );
        report.failures.push(failure);
    }

    tracing::info!(
        parsed = report.projects.len(),
        failed = report.failures.len(),
        "aggregation finished"
    );
    report
}

async fn load_one<S>(entry: &ProjectEntry, source: &S, parser: &ProjectParser) -> Result<ParsedProject, DocumentFailure>
where
    S: DocumentSource + ?Sized,
{
    let content = source.load(entry).await.map_err(|e| DocumentFailure {
        document_id: entry.project_id.clone(),
        kind: FailureKind::from(&e),
        message: e.to_string(),
    })?;

    parser.parse(&content).map_err(|e| DocumentFailure {
        document_id: entry.project_id.clone(),
        kind: FailureKind::from(&e),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rule() {
        let failure = DocumentFailure {
            document_id: "x".into(),
            kind: FailureKind::NotFound,
            message: String::new(),
        };

        assert!(AggregationReport::default().is_success());
        assert!(!AggregationReport {
            projects: vec![],
            failures: vec![failure],
        }
        .is_success());
    }
}
