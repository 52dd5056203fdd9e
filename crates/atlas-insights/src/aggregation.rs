//! Cross-project totals

use atlas_model::{ProjectStatus, ProjectSummary, TypeCounts};
use serde::{Deserialize, Serialize};

/// Project counts per lifecycle status; every bucket is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Projects in active development
    pub active: usize,
    /// Projects at minimum viable product
    pub mvp: usize,
    /// Projects on hold
    pub paused: usize,
    /// Retired projects
    pub archived: usize,
}

impl StatusCounts {
    /// Count for one status
    #[must_use]
    pub fn get(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Active => self.active,
            ProjectStatus::Mvp => self.mvp,
            ProjectStatus::Paused => self.paused,
            ProjectStatus::Archived => self.archived,
        }
    }

    fn bump(&mut self, status: ProjectStatus) {
        match status {
            ProjectStatus::Active => self.active += 1,
            ProjectStatus::Mvp => self.mvp += 1,
            ProjectStatus::Paused => self.paused += 1,
            ProjectStatus::Archived => self.archived += 1,
        }
    }
}

/// Work item and status totals across every project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossProjectAggregation {
    /// Number of summaries
    pub total_projects: usize,
    /// Work items across all projects
    pub total_work_items: usize,
    /// Checked work items
    pub completed_work_items: usize,
    /// Unchecked work items
    pub incomplete_work_items: usize,
    /// Work items per category
    pub by_type: TypeCounts,
    /// Projects per lifecycle status
    pub by_status: StatusCounts,
}

/// Sum counts across all summaries
#[must_use]
pub fn aggregate(summaries: &[ProjectSummary]) -> CrossProjectAggregation {
    summaries.iter().fold(
        CrossProjectAggregation {
            total_projects: summaries.len(),
            ..CrossProjectAggregation::default()
        },
        |mut acc, summary| {
            let counts = &summary.work_items_summary;
            acc.total_work_items += counts.total;
            acc.completed_work_items += counts.completed;
            acc.incomplete_work_items += counts.incomplete;
            acc.by_type.absorb(&counts.by_type);
            acc.by_status.bump(summary.manifest.status);
            acc
        },
    )
}
