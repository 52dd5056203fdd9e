//! Single-file markdown export of aggregated project data

use crate::error::{AggregateError, Result};
use crate::writer::{project_file, INDEX_FILE};
use atlas_model::{completion_percentage, ParsedProject, ProjectSummary, TypeCounts, WorkItemType};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

/// Report title
pub const REPORT_TITLE: &str = "# Project Atlas - All Projects Export";

const RULE: &str = "---";

/// One index entry and its project data, if the data file exists
#[derive(Debug, Clone)]
pub struct ExportEntry {
    /// Index summary
    pub summary: ProjectSummary,
    /// Full project; `None` when its data file was missing
    pub project: Option<ParsedProject>,
}

/// Render the export report.
///
/// Header counts and summary statistics cover every entry; per-project
/// detail is emitted only for entries with project data.
///
/// # Errors
/// Returns `AggregateError::Encode` if a manifest cannot be encoded.
pub fn render_report(entries: &[ExportEntry], generated_at: DateTime<Utc>) -> Result<String> {
    let mut md: Vec<String> = vec![
        REPORT_TITLE.to_string(),
        String::new(),
        format!(
            "**Generated**: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!("**Total Projects**: {}", entries.len()),
        String::new(),
        RULE.to_string(),
        String::new(),
    ];

    summary_statistics(&mut md, entries);

    for entry in entries {
        if let Some(project) = &entry.project {
            project_detail(&mut md, &entry.summary, project)?;
        }
    }

    Ok(md.join("\n"))
}

fn summary_statistics(md: &mut Vec<String>, entries: &[ExportEntry]) {
    let (total, completed, by_type) = entries.iter().fold(
        (0usize, 0usize, TypeCounts::default()),
        |(total, completed, mut by_type), entry| {
            let counts = &entry.summary.work_items_summary;
            by_type.absorb(&counts.by_type);
            (total + counts.total, completed + counts.completed, by_type)
        },
    );

    md.push("## Summary Statistics".to_string());
    md.push(String::new());
    md.push(format!("- **Total Work Items**: {total}"));
    if total > 0 {
        md.push(format!(
            "- **Completed**: {completed} ({}%)",
            completion_percentage(completed, total)
        ));
        md.push(format!("- **Incomplete**: {}", total - completed));
    }
    push_type_counts(md, &by_type);
    md.push(String::new());
    md.push(RULE.to_string());
    md.push(String::new());
}

fn project_detail(md: &mut Vec<String>, summary: &ProjectSummary, project: &ParsedProject) -> Result<()> {
    let manifest = serde_json::to_string_pretty(&project.manifest).map_err(AggregateError::Encode)?;
    let counts = &summary.work_items_summary;

    md.push(format!("## {}", project.manifest.name));
    md.push(String::new());
    md.push("### Manifest".to_string());
    md.push(String::new());
    md.push("```json".to_string());
    md.push(manifest);
    md.push("```".to_string());
    md.push(String::new());

    md.push("### Work Items Summary".to_string());
    md.push(String::new());
    md.push(format!("- **Total**: {}", counts.total));
    md.push(format!(
        "- **Completed**: {} ({}%)",
        counts.completed, counts.completion_percentage
    ));
    md.push(format!("- **Incomplete**: {}", counts.incomplete));
    push_type_counts(md, &counts.by_type);
    md.push(String::new());

    for item_type in WorkItemType::ALL {
        let mut items = project.items_of(item_type).peekable();
        if items.peek().is_none() {
            continue;
        }
        md.push(format!("### {}", item_type.label()));
        md.push(String::new());
        md.extend(items.map(|item| item.to_checkbox_line()));
        md.push(String::new());
    }

    if !project.sections.is_empty() {
        md.push("### Project Sections".to_string());
        md.push(String::new());
        for section in &project.sections {
            md.push(format!("#### {}", section.heading));
            md.push(String::new());
            md.push(section.content.clone());
            md.push(String::new());
        }
    }

    md.push(RULE.to_string());
    md.push(String::new());
    Ok(())
}

fn push_type_counts(md: &mut Vec<String>, by_type: &TypeCounts) {
    md.push("- **By Type**:".to_string());
    for item_type in WorkItemType::ALL {
        md.push(format!("  - {}: {}", item_type.label(), by_type.get(item_type)));
    }
}

/// Read `index.json` and the project files from `data_dir` and write the
/// rendered report to `output_path`. Returns the number of index entries.
///
/// Projects whose data file is missing are skipped with a warning.
///
/// # Errors
/// Returns `AggregateError::Missing` if there is no index, `Json` for
/// malformed data files and `Io` for read or write failures.
pub async fn export_report(data_dir: &Path, output_path: &Path, generated_at: DateTime<Utc>) -> Result<usize> {
    let index_path = data_dir.join(INDEX_FILE);
    if !tokio::fs::try_exists(&index_path)
        .await
        .map_err(|e| AggregateError::io(&index_path, e))?
    {
        return Err(AggregateError::Missing(index_path));
    }
    let summaries: Vec<ProjectSummary> = read_json(&index_path).await?;

    let mut entries = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let path = data_dir.join(project_file(&summary.manifest.project_id));
        let project = match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(read_json::<ParsedProject>(&path).await?),
            Ok(false) => {
                tracing::warn!(path = %path.display(), "project file not found, skipping");
                None
            }
            Err(e) => return Err(AggregateError::io(&path, e)),
        };
        entries.push(ExportEntry { summary, project });
    }

    let report = render_report(&entries, generated_at)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AggregateError::io(parent, e))?;
    }
    tokio::fs::write(output_path, report)
        .await
        .map_err(|e| AggregateError::io(output_path, e))?;

    tracing::info!(
        projects = entries.len(),
        output = %output_path.display(),
        "exported projects"
    );
    Ok(entries.len())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AggregateError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| AggregateError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_test_utils::summary;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn empty_report_omits_percentages() {
        let report = render_report(&[], at()).unwrap();

        assert!(report.starts_with("# Project Atlas - All Projects Export\n\n"));
        assert!(report.contains("**Generated**: 2025-03-01T09:30:00.000Z"));
        assert!(report.contains("**Total Projects**: 0"));
        assert!(report.contains("- **Total Work Items**: 0\n- **By Type**:"));
        assert!(!report.contains("- **Completed**"));
    }

    #[test]
    fn statistics_span_entries_without_data() {
        let entries = vec![
            ExportEntry {
                summary: summary("a").items(1, 2).build(),
                project: None,
            },
            ExportEntry {
                summary: summary("b").items(1, 0).bugs(1).build(),
                project: None,
            },
        ];

        let report = render_report(&entries, at()).unwrap();
        assert!(report.contains("**Total Projects**: 2"));
        assert!(report.contains("- **Completed**: 2 (50%)"));
        assert!(report.contains("- **Incomplete**: 2"));
        assert!(report.contains("  - Bugs: 1\n  - Tasks: 3"));
        assert!(!report.contains("### Manifest"));
    }
}
