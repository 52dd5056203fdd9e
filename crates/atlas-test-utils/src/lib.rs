//! Testing utilities for the Project Atlas workspace
//!
//! Shared fixtures: manifest JSON, complete project documents and summary
//! builders.

#![allow(missing_docs)]

use atlas_model::{
    completion_percentage, Manifest, ProjectStatus, ProjectSummary, TypeCounts,
    WorkItemsSummary,
};
use serde_json::{json, Value};

pub const START: &str = "<!-- PROJECT-MANIFEST:START -->";
pub const END: &str = "<!-- PROJECT-MANIFEST:END -->";

pub fn manifest_json(project_id: &str) -> Value {
    json!({
        "schemaVersion": 1,
        "projectId": project_id,
        "name": format!("Project {project_id}"),
        "repo": format!("acme/{project_id}"),
        "visibility": "public",
        "status": "active",
        "domain": "other",
        "type": "tool",
        "lastUpdated": "2025-01-10",
        "links": { "prod": null, "staging": null },
        "tags": ["fixture"]
    })
}

pub fn manifest(project_id: &str) -> Manifest {
    serde_json::from_value(manifest_json(project_id)).unwrap()
}

/// Wrap a manifest value and a markdown body into a project document
pub fn document_with(manifest: &Value, body: &str) -> String {
    let pretty = serde_json::to_string_pretty(manifest).unwrap();
    format!("# Project Summary\n\n{START}\n```json\n{pretty}\n```\n{END}\n\n{body}")
}

pub fn project_document(project_id: &str, body: &str) -> String {
    document_with(&manifest_json(project_id), body)
}

/// A realistic document exercising every block kind
pub fn sample_document(project_id: &str) -> String {
    project_document(
        project_id,
        r#"Intro text that belongs to no section.

## Overview

A **small** tool for tracking things.

### Goals

- Keep it simple
- [x] Not a work item here

## Features Done

- [x] Markdown parsing
- [x] Manifest validation

## Features in progress

- [ ] Insights dashboard

## Known Issues

- [ ] Crash on empty file
- [x] Wrong percentage
- [ ] Slow startup

## Outstanding Tasks

- [ ] Write docs

```sh
cargo test
```

## Notes

> Remember to bump versions.
"#,
    )
}

/// Builder for `ProjectSummary` fixtures
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    manifest: Manifest,
    completed: usize,
    incomplete: usize,
    by_type: TypeCounts,
}

impl SummaryBuilder {
    pub fn new(project_id: &str) -> Self {
        Self {
            manifest: manifest(project_id),
            completed: 0,
            incomplete: 0,
            by_type: TypeCounts::default(),
        }
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.manifest.status = status;
        self
    }

    pub fn last_updated(mut self, date: &str) -> Self {
        self.manifest.last_updated = date.to_string();
        self
    }

    /// Completed and incomplete counts; remaining items are tasks
    pub fn items(mut self, completed: usize, incomplete: usize) -> Self {
        self.completed = completed;
        self.incomplete = incomplete;
        self
    }

    pub fn bugs(mut self, bugs: usize) -> Self {
        self.by_type.bugs = bugs;
        self
    }

    pub fn features(mut self, features: usize) -> Self {
        self.by_type.features = features;
        self
    }

    pub fn build(self) -> ProjectSummary {
        let total = self.completed + self.incomplete;
        let mut by_type = self.by_type;
        let typed = by_type.features + by_type.enhancements + by_type.bugs;
        by_type.tasks = total.saturating_sub(typed);

        ProjectSummary {
            manifest: self.manifest,
            work_items_summary: WorkItemsSummary {
                total,
                completed: self.completed,
                incomplete: self.incomplete,
                completion_percentage: completion_percentage(self.completed, total),
                by_type,
            },
        }
    }
}

pub fn summary(project_id: &str) -> SummaryBuilder {
    SummaryBuilder::new(project_id)
}
