//! Project Atlas insights engine
//!
//! Pure analytics over [`ProjectSummary`] values. Nothing here performs I/O
//! or reads the clock; callers pass `now` explicitly so results are
//! reproducible.
//!
//! - [`detect_drift`]: active projects without recent updates
//! - [`find_quick_wins`]: nearly finished projects
//! - [`find_high_risk`]: bug-heavy projects with low progress
//! - [`find_release_ready`]: complete projects with few bugs
//! - [`aggregate`]: totals across all projects
//!
//! [`calculate_insights`] runs all of them at once.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod aggregation;
pub mod signals;
pub mod staleness;

pub use aggregation::{aggregate, CrossProjectAggregation, StatusCounts};
pub use signals::{
    detect_drift, find_high_risk, find_quick_wins, find_release_ready, DriftProject,
    HighRiskProject, QuickWin, ReleaseReadyProject,
};
pub use staleness::{days_since_update, parse_last_updated};

use atlas_model::ProjectSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every insight for one set of projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Stale active projects
    pub drift: Vec<DriftProject>,
    /// Nearly finished projects
    pub quick_wins: Vec<QuickWin>,
    /// Buggy projects with low progress
    pub high_risk: Vec<HighRiskProject>,
    /// Projects ready to ship
    pub release_ready: Vec<ReleaseReadyProject>,
    /// Totals across every project
    pub aggregation: CrossProjectAggregation,
}

/// Compute all insights for `summaries` as of `now`
#[must_use]
pub fn calculate_insights(summaries: &[ProjectSummary], now: DateTime<Utc>) -> Insights {
    Insights {
        drift: detect_drift(summaries, now),
        quick_wins: find_quick_wins(summaries),
        high_risk: find_high_risk(summaries),
        release_ready: find_release_ready(summaries),
        aggregation: aggregate(summaries),
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
