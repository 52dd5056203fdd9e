//! Counts-only projection of a parsed project
//!
//! `ProjectSummary` is what the index file stores and what the insights
//! engine consumes. It is lossy: sections and item text are dropped.

use crate::manifest::Manifest;
use crate::project::{ParsedProject, WorkItem, WorkItemType};
use serde::{Deserialize, Serialize};

/// Per-category work item counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    /// Items under a features section
    pub features: usize,
    /// Items under an enhancements section
    pub enhancements: usize,
    /// Items under a bugs section
    pub bugs: usize,
    /// Items under a tasks section
    pub tasks: usize,
}

impl TypeCounts {
    /// Count for one category
    #[inline]
    #[must_use]
    pub fn get(&self, item_type: WorkItemType) -> usize {
        match item_type {
            WorkItemType::Features => self.features,
            WorkItemType::Enhancements => self.enhancements,
            WorkItemType::Bugs => self.bugs,
            WorkItemType::Tasks => self.tasks,
        }
    }

    /// Increment the counter for one category
    #[inline]
    pub fn bump(&mut self, item_type: WorkItemType) {
        match item_type {
            WorkItemType::Features => self.features += 1,
            WorkItemType::Enhancements => self.enhancements += 1,
            WorkItemType::Bugs => self.bugs += 1,
            WorkItemType::Tasks => self.tasks += 1,
        }
    }

    /// Element-wise sum
    #[inline]
    pub fn absorb(&mut self, other: &TypeCounts) {
        self.features += other.features;
        self.enhancements += other.enhancements;
        self.bugs += other.bugs;
        self.tasks += other.tasks;
    }
}

/// Rollup counts of a project's work items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemsSummary {
    /// Number of work items
    pub total: usize,
    /// Ticked items
    pub completed: usize,
    /// Unticked items
    pub incomplete: usize,
    /// `completed / total` as a rounded percentage; 0 when there are no items
    pub completion_percentage: u8,
    /// Counts per category
    pub by_type: TypeCounts,
}

impl WorkItemsSummary {
    /// Summarize a sequence of work items
    #[must_use]
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> Self {
        let mut summary = Self::default();
        for item in items {
            summary.total += 1;
            if item.completed {
                summary.completed += 1;
            }
            summary.by_type.bump(item.item_type);
        }
        summary.incomplete = summary.total - summary.completed;
        summary.completion_percentage = completion_percentage(summary.completed, summary.total);
        summary
    }
}

/// Manifest plus rollup counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// The project's manifest, unchanged
    pub manifest: Manifest,
    /// Rollup over every work item
    pub work_items_summary: WorkItemsSummary,
}

impl ProjectSummary {
    /// Project the full record down to counts
    #[must_use]
    pub fn from_project(project: &ParsedProject) -> Self {
        Self {
            manifest: project.manifest.clone(),
            work_items_summary: WorkItemsSummary::from_items(&project.work_items),
        }
    }

    /// Number of bug work items
    #[inline]
    #[must_use]
    pub fn bug_count(&self) -> usize {
        self.work_items_summary.by_type.bugs
    }

    /// Completion percentage
    #[inline]
    #[must_use]
    pub fn completion(&self) -> u8 {
        self.work_items_summary.completion_percentage
    }
}

impl From<&ParsedProject> for ProjectSummary {
    fn from(project: &ParsedProject) -> Self {
        Self::from_project(project)
    }
}

/// Rounded (half up) integer percentage of `completed` over `total`.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    // floor(100c/t + 1/2) == floor((200c + t) / 2t), exact in integers
    let pct = (200 * completed + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}
