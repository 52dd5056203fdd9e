//! Project health signals
//!
//! Each signal filters the summaries with fixed thresholds, projects the
//! matches into a small record and sorts them. Sorts are stable, so ties
//! keep input order.

use crate::staleness::days_since_update;
use atlas_model::{ProjectStatus, ProjectSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Drift: an active project is stale after this many whole days
pub const DRIFT_THRESHOLD_DAYS: i64 = 20;
/// Quick win: at most this many open items
pub const QUICK_WIN_MAX_INCOMPLETE: usize = 5;
/// Quick win: at least this completion percentage
pub const QUICK_WIN_MIN_COMPLETION: u8 = 50;
/// High risk: at least this many bugs
pub const HIGH_RISK_MIN_BUGS: usize = 3;
/// High risk: completion strictly below this
pub const HIGH_RISK_COMPLETION_CEILING: u8 = 70;
/// Release ready: at least this completion percentage
pub const RELEASE_READY_MIN_COMPLETION: u8 = 80;
/// Release ready: bugs strictly below this
pub const RELEASE_READY_BUG_CEILING: usize = 3;

/// Active project that has not been updated recently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftProject {
    /// Manifest project id
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Lifecycle status, always active
    pub status: ProjectStatus,
    /// Whole days between `lastUpdated` and the reference time
    pub days_since_update: i64,
}

/// Project close to done with only a handful of open items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickWin {
    /// Manifest project id
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Open work items
    pub incomplete_count: usize,
    /// Completed share, 0-100
    pub completion_percentage: u8,
}

/// Project with many bugs and low progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskProject {
    /// Manifest project id
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Work items under bug sections
    pub bug_count: usize,
    /// Completed share, 0-100
    pub completion_percentage: u8,
    /// All work items
    pub total_work_items: usize,
}

/// Project with high completion and few bugs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReadyProject {
    /// Manifest project id
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Completed share, 0-100
    pub completion_percentage: u8,
    /// Work items under bug sections
    pub bug_count: usize,
    /// All work items
    pub total_work_items: usize,
}

/// Active projects whose last update is more than
/// [`DRIFT_THRESHOLD_DAYS`] whole days before `now`, stalest first.
///
/// Projects with an unparseable `lastUpdated` are never reported.
#[must_use]
pub fn detect_drift(summaries: &[ProjectSummary], now: DateTime<Utc>) -> Vec<DriftProject> {
    let mut drift: Vec<DriftProject> = summaries
        .iter()
        .filter(|s| s.manifest.status == ProjectStatus::Active)
        .filter_map(|s| {
            let days = days_since_update(&s.manifest.last_updated, now)?;
            (days > DRIFT_THRESHOLD_DAYS).then(|| DriftProject {
                project_id: s.manifest.project_id.clone(),
                name: s.manifest.name.clone(),
                status: s.manifest.status,
                days_since_update: days,
            })
        })
        .collect();

    drift.sort_by(|a, b| b.days_since_update.cmp(&a.days_since_update));
    drift
}

/// Projects with `0 < incomplete <= 5` and at least 50% completion,
/// fewest open items first.
#[must_use]
pub fn find_quick_wins(summaries: &[ProjectSummary]) -> Vec<QuickWin> {
    let mut wins: Vec<QuickWin> = summaries
        .iter()
        .filter(|s| {
            let incomplete = s.work_items_summary.incomplete;
            incomplete > 0
                && incomplete <= QUICK_WIN_MAX_INCOMPLETE
                && s.completion() >= QUICK_WIN_MIN_COMPLETION
        })
        .map(|s| QuickWin {
            project_id: s.manifest.project_id.clone(),
            name: s.manifest.name.clone(),
            incomplete_count: s.work_items_summary.incomplete,
            completion_percentage: s.completion(),
        })
        .collect();

    wins.sort_by_key(|w| w.incomplete_count);
    wins
}

/// Projects with at least 3 bugs and under 70% completion, most bugs
/// first, then least complete.
#[must_use]
pub fn find_high_risk(summaries: &[ProjectSummary]) -> Vec<HighRiskProject> {
    let mut risky: Vec<HighRiskProject> = summaries
        .iter()
        .filter(|s| s.bug_count() >= HIGH_RISK_MIN_BUGS && s.completion() < HIGH_RISK_COMPLETION_CEILING)
        .map(|s| HighRiskProject {
            project_id: s.manifest.project_id.clone(),
            name: s.manifest.name.clone(),
            bug_count: s.bug_count(),
            completion_percentage: s.completion(),
            total_work_items: s.work_items_summary.total,
        })
        .collect();

    risky.sort_by(|a, b| {
        b.bug_count
            .cmp(&a.bug_count)
            .then(a.completion_percentage.cmp(&b.completion_percentage))
    });
    risky
}

/// Non-archived projects with at least 80% completion and fewer than 3
/// bugs, most complete first, then fewest bugs.
#[must_use]
pub fn find_release_ready(summaries: &[ProjectSummary]) -> Vec<ReleaseReadyProject> {
    let mut ready: Vec<ReleaseReadyProject> = summaries
        .iter()
        .filter(|s| {
            s.completion() >= RELEASE_READY_MIN_COMPLETION
                && s.bug_count() < RELEASE_READY_BUG_CEILING
                && s.manifest.status != ProjectStatus::Archived
        })
        .map(|s| ReleaseReadyProject {
            project_id: s.manifest.project_id.clone(),
            name: s.manifest.name.clone(),
            completion_percentage: s.completion(),
            bug_count: s.bug_count(),
            total_work_items: s.work_items_summary.total,
        })
        .collect();

    ready.sort_by(|a, b| {
        b.completion_percentage
            .cmp(&a.completion_percentage)
            .then(a.bug_count.cmp(&b.bug_count))
    });
    ready
}
