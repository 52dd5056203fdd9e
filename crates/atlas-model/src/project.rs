//! Parsed project document types

use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level that opens a top-level section
pub const SECTION_LEVEL: u8 = 2;

/// Work item category, derived from the owning section heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkItemType {
    /// New functionality
    Features,
    /// Improvements to existing functionality
    Enhancements,
    /// Defects and known issues
    Bugs,
    /// Chores and outstanding tasks
    Tasks,
}

impl WorkItemType {
    /// Every category, in report order
    pub const ALL: [WorkItemType; 4] = [
        WorkItemType::Features,
        WorkItemType::Enhancements,
        WorkItemType::Bugs,
        WorkItemType::Tasks,
    ];

    /// Wire name of the category
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemType::Features => "features",
            WorkItemType::Enhancements => "enhancements",
            WorkItemType::Bugs => "bugs",
            WorkItemType::Tasks => "tasks",
        }
    }

    /// Capitalized label used in rendered reports
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            WorkItemType::Features => "Features",
            WorkItemType::Enhancements => "Enhancements",
            WorkItemType::Bugs => "Bugs",
            WorkItemType::Tasks => "Tasks",
        }
    }
}

impl fmt::Display for WorkItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checkbox entry classified by its section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Category of the owning section
    #[serde(rename = "type")]
    pub item_type: WorkItemType,
    /// Checkbox label, trimmed
    pub content: String,
    /// Whether the box was ticked
    pub completed: bool,
    /// Heading text of the owning section
    pub section: String,
}

impl WorkItem {
    /// Render as a markdown checkbox line
    #[must_use]
    pub fn to_checkbox_line(&self) -> String {
        let mark = if self.completed { "[x]" } else { "[ ]" };
        format!("- {mark} {}", self.content)
    }
}

/// A top-level (depth 2) region of a project document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Flattened heading text
    pub heading: String,
    /// Heading level (always 2)
    pub level: u8,
    /// Accumulated markdown-ish body
    pub content: String,
    /// Work items found in this section, in document order
    pub work_items: Vec<WorkItem>,
}

impl Section {
    /// Create an empty top-level section
    #[inline]
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            level: SECTION_LEVEL,
            content: String::new(),
            work_items: Vec::new(),
        }
    }
}

/// Fully parsed project document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProject {
    /// Validated manifest
    pub manifest: Manifest,
    /// Sections in document order
    pub sections: Vec<Section>,
    /// Every section's work items, concatenated in section order
    pub work_items: Vec<WorkItem>,
}

impl ParsedProject {
    /// Assemble a project; the flat work item list is derived from `sections`.
    #[must_use]
    pub fn new(manifest: Manifest, sections: Vec<Section>) -> Self {
        let work_items = sections
            .iter()
            .flat_map(|s| s.work_items.iter().cloned())
            .collect();
        Self {
            manifest,
            sections,
            work_items,
        }
    }

    /// Project identifier from the manifest
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.manifest.project_id
    }

    /// Work items of a single category
    pub fn items_of(&self, item_type: WorkItemType) -> impl Iterator<Item = &WorkItem> + '_ {
        self.work_items
            .iter()
            .filter(move |item| item.item_type == item_type)
    }
}
