//! Aggregation pipeline tests over temporary directories and a mock host.

use atlas_aggregator::{
    aggregate, export_report, write_outputs, AggregateError, AggregatorConfig, FailureKind,
    FileHost, LocalSource, ProjectEntry, RemoteSource, SourceError, INDEX_FILE,
};
use atlas_model::{ParsedProject, ProjectSummary};
use atlas_parser::ParseErrorKind;
use atlas_test_utils::{project_document, sample_document};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

fn entry(id: &str) -> ProjectEntry {
    ProjectEntry::new(id, format!("acme/{id}"), "PROJECT_SUMMARY.md")
}

fn write_reference(dir: &Path, id: &str, content: &str) {
    let name = AggregatorConfig::default().reference_file(id);
    std::fs::write(dir.join(name), content).unwrap();
}

#[tokio::test]
async fn local_batch_collects_failures_in_order() {
    let refs = TempDir::new().unwrap();
    write_reference(refs.path(), "alpha", &sample_document("alpha"));
    write_reference(refs.path(), "broken", "no manifest here\n");
    write_reference(refs.path(), "beta", &project_document("beta", "## Bugs\n\n- [ ] crash\n"));
    // a second document claiming "alpha"
    write_reference(refs.path(), "alpha-copy", &sample_document("alpha"));

    let entries = vec![
        entry("alpha"),
        entry("missing"),
        entry("broken"),
        entry("beta"),
        entry("alpha-copy"),
    ];
    let config = AggregatorConfig::default().with_concurrency(2);
    let source = LocalSource::new(refs.path(), config.clone());

    let report = aggregate(&entries, &source, &config).await;

    let ids: Vec<&str> = report.projects.iter().map(ParsedProject::project_id).collect();
    assert_eq!(ids, vec!["alpha", "beta"]);

    let failures: Vec<(&str, FailureKind)> = report
        .failures
        .iter()
        .map(|f| (f.document_id.as_str(), f.kind))
        .collect();
    assert_eq!(
        failures,
        vec![
            ("missing", FailureKind::NotFound),
            ("broken", FailureKind::Parse(ParseErrorKind::ManifestMissing)),
            ("alpha-copy", FailureKind::DuplicateProjectId),
        ]
    );
    assert!(report.is_success());
}

#[tokio::test]
async fn oversize_documents_are_rejected() {
    let refs = TempDir::new().unwrap();
    write_reference(refs.path(), "big", &sample_document("big"));

    let config = AggregatorConfig::default().with_max_document_bytes(16);
    let source = LocalSource::new(refs.path(), config.clone());
    let report = aggregate(&[entry("big")], &source, &config).await;

    assert!(report.projects.is_empty());
    assert_eq!(report.failures[0].kind, FailureKind::Source);
    assert!(!report.is_success());
}

#[tokio::test]
async fn writer_and_exporter_round_trip() {
    let refs = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_reference(refs.path(), "alpha", &sample_document("alpha"));
    write_reference(refs.path(), "beta", &project_document("beta", "## Enhancements\n\n- [x] faster\n"));

    let config = AggregatorConfig::default();
    let source = LocalSource::new(refs.path(), config.clone());
    let report = aggregate(&[entry("alpha"), entry("beta")], &source, &config).await;

    let written = write_outputs(&report.projects, out.path()).await.unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0], out.path().join("alpha.json"));
    assert_eq!(written[2], out.path().join(INDEX_FILE));

    let index: Vec<ProjectSummary> =
        serde_json::from_str(&std::fs::read_to_string(out.path().join(INDEX_FILE)).unwrap()).unwrap();
    assert_eq!(index, report.summaries());

    let alpha: ParsedProject =
        serde_json::from_str(&std::fs::read_to_string(out.path().join("alpha.json")).unwrap()).unwrap();
    assert_eq!(alpha, report.projects[0]);

    // drop one project file; export must skip it but still count it
    std::fs::remove_file(out.path().join("beta.json")).unwrap();
    let output = out.path().join("export").join("all.md");
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let exported = export_report(out.path(), &output, at).await.unwrap();
    assert_eq!(exported, 2);

    let markdown = std::fs::read_to_string(&output).unwrap();
    assert!(markdown.contains("**Total Projects**: 2"));
    assert!(markdown.contains("## Project alpha"));
    assert!(!markdown.contains("## Project beta"));
    assert!(markdown.contains("### Bugs\n\n- [ ] Crash on empty file\n- [x] Wrong percentage\n- [ ] Slow startup\n"));
    assert!(markdown.contains("#### Notes\n\nRemember to bump versions.\n\n"));
    assert!(markdown.contains("  - Enhancements: 1"));
}

#[tokio::test]
async fn ids_that_are_not_file_names_fail_alone() {
    let refs = TempDir::new().unwrap();
    write_reference(refs.path(), "alpha", &sample_document("alpha"));
    write_reference(refs.path(), "nested", &project_document("team/alpha", ""));
    write_reference(refs.path(), "escape", &project_document("..", ""));

    let config = AggregatorConfig::default();
    let source = LocalSource::new(refs.path(), config.clone());
    let report = aggregate(&[entry("nested"), entry("alpha"), entry("escape")], &source, &config).await;

    let ids: Vec<&str> = report.projects.iter().map(ParsedProject::project_id).collect();
    assert_eq!(ids, vec!["alpha"]);
    let failures: Vec<(&str, FailureKind)> = report
        .failures
        .iter()
        .map(|f| (f.document_id.as_str(), f.kind))
        .collect();
    assert_eq!(
        failures,
        vec![
            ("nested", FailureKind::InvalidProjectId),
            ("escape", FailureKind::InvalidProjectId),
        ]
    );

    let out = TempDir::new().unwrap();
    write_outputs(&report.projects, out.path()).await.unwrap();
    assert!(out.path().join("alpha.json").exists());
    assert!(out.path().join(INDEX_FILE).exists());
}

#[tokio::test]
async fn writer_rejects_unsafe_ids_before_writing() {
    let refs = TempDir::new().unwrap();
    write_reference(refs.path(), "alpha", &sample_document("alpha"));
    let config = AggregatorConfig::default();
    let source = LocalSource::new(refs.path(), config.clone());
    let mut projects = aggregate(&[entry("alpha")], &source, &config).await.projects;

    let mut escaping = projects[0].clone();
    escaping.manifest.project_id = "../x".into();
    projects.push(escaping);

    let root = TempDir::new().unwrap();
    let out = root.path().join("data");
    let err = write_outputs(&projects, &out).await.unwrap_err();

    assert!(matches!(err, AggregateError::InvalidProjectId(ref id) if id == "../x"));
    assert!(!out.exists());
    assert!(!root.path().join("x.json").exists());
}

#[tokio::test]
async fn export_without_index_fails() {
    let dir = TempDir::new().unwrap();
    let err = export_report(dir.path(), &dir.path().join("out.md"), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AggregateError::Missing(_)));
}

/// Serves files keyed by branch and records every request
#[derive(Default)]
struct MockHost {
    files: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl MockHost {
    fn with(mut self, branch: &str, result: Result<String, u16>) -> Self {
        self.files.insert(branch.to_string(), result);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileHost for MockHost {
    async fn fetch(&self, owner: &str, repo: &str, path: &str, branch: &str) -> Result<String, SourceError> {
        self.requests.lock().unwrap().push(branch.to_string());
        let location = format!("{owner}/{repo}/{path}@{branch}");
        match self.files.get(branch) {
            Some(Ok(content)) => Ok(content.clone()),
            Some(Err(403)) => Err(SourceError::forbidden(location)),
            Some(Err(status)) => Err(SourceError::Other(format!("status {status}"))),
            None => Err(SourceError::not_found(location)),
        }
    }
}

#[tokio::test]
async fn remote_prefers_configured_branch() {
    let host = MockHost::default()
        .with("dev", Ok(project_document("r", "")))
        .with("main", Ok(String::from("wrong")));
    let source = RemoteSource::new(host, &AggregatorConfig::default());

    let doc = source
        .fetch_document("acme/r", "PROJECT.md", Some("dev"))
        .await
        .unwrap();
    assert!(doc.contains("\"projectId\": \"r\""));
    assert_eq!(source.host().requested(), vec!["dev"]);
}

#[tokio::test]
async fn remote_falls_back_past_not_found() {
    let host = MockHost::default().with("master", Ok(project_document("r", "")));
    let source = RemoteSource::new(host, &AggregatorConfig::default());

    source
        .fetch_document("acme/r", "PROJECT.md", Some("dev"))
        .await
        .unwrap();
    assert_eq!(source.host().requested(), vec!["dev", "main", "master"]);
}

#[tokio::test]
async fn remote_stops_on_forbidden() {
    let host = MockHost::default()
        .with("main", Err(403))
        .with("master", Ok(project_document("r", "")));
    let source = RemoteSource::new(host, &AggregatorConfig::default());

    let err = source
        .fetch_document("acme/r", "PROJECT.md", None)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Forbidden { .. }));
    assert_eq!(source.host().requested(), vec!["main"]);
}

#[tokio::test]
async fn remote_reports_not_found_and_bad_repo() {
    let source = RemoteSource::new(MockHost::default(), &AggregatorConfig::default());

    let err = source.fetch_document("acme/r", "PROJECT.md", None).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(source.host().requested(), vec!["main", "master"]);

    let err = source.fetch_document("acme", "PROJECT.md", None).await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidRepo { .. }));
}

#[tokio::test]
async fn remote_source_drives_a_batch() {
    let host = MockHost::default().with("main", Ok(sample_document("remote")));
    let config = AggregatorConfig::default();
    let source = RemoteSource::new(host, &config);

    let report = aggregate(&[entry("remote")], &source, &config).await;
    assert_eq!(report.projects.len(), 1);
    assert_eq!(report.summaries()[0].work_items_summary.total, 7);
}
