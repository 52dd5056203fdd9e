//! JSON output files

use crate::error::{AggregateError, Result};
use atlas_model::{ParsedProject, ProjectSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the summary index inside the output directory
pub const INDEX_FILE: &str = "index.json";

/// Per-project data file name
#[must_use]
pub fn project_file(project_id: &str) -> String {
    format!("{project_id}.json")
}

/// True when `project_id` names a single file inside the output directory:
/// non-empty, no path separators or NUL, and not `.` or `..`.
#[must_use]
pub fn is_valid_project_id(project_id: &str) -> bool {
    !project_id.is_empty()
        && project_id != "."
        && project_id != ".."
        && !project_id.contains(['/', '\\', '\0'])
}

/// Write one `<projectId>.json` per project, then `index.json` with every
/// summary, creating `out_dir` if needed. Returns the written paths, index
/// last.
///
/// Every project id is checked before anything is written, so an invalid id
/// leaves the directory untouched.
///
/// # Errors
/// Returns `AggregateError::InvalidProjectId` for an id that is not a plain
/// file name and `AggregateError::Io` if the directory or a file cannot be
/// written.
pub async fn write_outputs(projects: &[ParsedProject], out_dir: &Path) -> Result<Vec<PathBuf>> {
    if let Some(bad) = projects.iter().map(ParsedProject::project_id).find(|id| !is_valid_project_id(id)) {
        return Err(AggregateError::InvalidProjectId(bad.to_string()));
    }

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| AggregateError::io(out_dir, e))?;

    let mut written = Vec::with_capacity(projects.len() + 1);
    for project in projects {
        let path = out_dir.join(project_file(project.project_id()));
        written.push(write_json(&path, project).await?);
    }

    let summaries: Vec<ProjectSummary> = projects.iter().map(ProjectSummary::from_project).collect();
    written.push(write_json(&out_dir.join(INDEX_FILE), &summaries).await?);

    tracing::info!(
        dir = %out_dir.display(),
        projects = projects.len(),
        "wrote project files and index"
    );
    Ok(written)
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AggregateError::json(path, e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AggregateError::io(path, e))?;
    Ok(path.to_path_buf())
}
