//! Work item classification
//!
//! A section heading decides the category of every checkbox listed under
//! it. Categories are tried in a fixed order and the first match wins, so
//! "Feature bugs" is a features section.

use atlas_model::{WorkItem, WorkItemType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered (pattern, category) table.
///
/// Only the first alternative of the bugs and tasks patterns is anchored;
/// "Open issues" or a heading mentioning "todo" anywhere still match.
const CATEGORY_PATTERNS: [(&str, WorkItemType); 4] = [
    (
        r"^features?\s*(done|completed|in progress|in-progress)?",
        WorkItemType::Features,
    ),
    (r"^enhancements?", WorkItemType::Enhancements),
    (r"^(known\s+)?issues?|(active\s+)?bugs?|open\s+issues?", WorkItemType::Bugs),
    (r"^(outstanding\s+)?tasks?|todo", WorkItemType::Tasks),
];

static CATEGORIES: Lazy<Vec<(Regex, WorkItemType)>> = Lazy::new(|| {
    CATEGORY_PATTERNS
        .iter()
        .map(|(pattern, item_type)| {
            (Regex::new(pattern).expect("category pattern compiles"), *item_type)
        })
        .collect()
});

static CHECKBOX_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s*\[([ x])\]\s*(.+)$").expect("checkbox pattern compiles"));

/// Category denoted by a section heading, if any
#[must_use]
pub fn classify_heading(heading: &str) -> Option<WorkItemType> {
    let normalized = heading.trim().to_lowercase();
    CATEGORIES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&normalized))
        .map(|(_, item_type)| *item_type)
}

/// A parsed `- [ ] ...` / `- [x] ...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    /// Marker was a lowercase `x`
    pub completed: bool,
    /// Label after the marker, trimmed
    pub content: String,
}

/// Parse one physical line as a checkbox.
///
/// Only `[ ]` and `[x]` are markers; `[X]` is not a checkbox.
#[must_use]
pub fn parse_checkbox_line(line: &str) -> Option<Checkbox> {
    let caps = CHECKBOX_LINE.captures(line)?;
    Some(Checkbox {
        completed: &caps[1] == "x",
        content: caps[2].trim().to_string(),
    })
}

/// Turn every checkbox line of a rendered list block into a work item
#[must_use]
pub fn extract_work_items(block: &str, section: &str, item_type: WorkItemType) -> Vec<WorkItem> {
    block
        .lines()
        .filter_map(parse_checkbox_line)
        .map(|checkbox| WorkItem {
            item_type,
            content: checkbox.content,
            completed: checkbox.completed,
            section: section.to_string(),
        })
        .collect()
}
