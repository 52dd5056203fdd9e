//! Insight invariants over generated project summaries.

use atlas_insights::{calculate_insights, find_high_risk, find_release_ready};
use atlas_model::{ProjectStatus, ProjectSummary};
use atlas_test_utils::summary;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(ProjectStatus::ALL.to_vec())
}

fn summary_strategy() -> impl Strategy<Value = ProjectSummary> {
    (0usize..20, 0usize..20, 0usize..8, status_strategy(), 0u32..90).prop_map(
        |(completed, incomplete, bugs, status, age)| {
            let day = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(u64::from(age)))
                .unwrap();
            summary(&format!("p-{completed}-{incomplete}-{bugs}-{age}"))
                .status(status)
                .last_updated(&day.format("%Y-%m-%d").to_string())
                .items(completed, incomplete)
                .bugs(bugs.min(completed + incomplete))
                .build()
        },
    )
}

#[test]
fn sample_portfolio() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let summaries = vec![
        summary("drifting").last_updated("2025-01-01").items(2, 8).bugs(4).build(),
        summary("shipping").last_updated("2025-02-28").items(9, 1).build(),
        summary("parked")
            .status(ProjectStatus::Archived)
            .last_updated("2024-01-01")
            .items(10, 0)
            .build(),
    ];

    let insights = calculate_insights(&summaries, now);

    assert_eq!(insights.drift.len(), 1);
    assert_eq!(insights.drift[0].project_id, "drifting");
    assert_eq!(insights.drift[0].days_since_update, 59);
    assert_eq!(insights.quick_wins.len(), 1);
    assert_eq!(insights.quick_wins[0].project_id, "shipping");
    assert_eq!(insights.high_risk.len(), 1);
    assert_eq!(insights.high_risk[0].project_id, "drifting");
    assert_eq!(insights.release_ready.len(), 1);
    assert_eq!(insights.release_ready[0].project_id, "shipping");
    assert_eq!(insights.aggregation.total_projects, 3);
    assert_eq!(insights.aggregation.by_status.archived, 1);

    let value = serde_json::to_value(&insights).unwrap();
    assert!(value.get("quickWins").is_some());
    assert!(value.get("releaseReady").is_some());
    assert_eq!(value["aggregation"]["byStatus"]["mvp"], 0);
}

proptest! {
    #[test]
    fn prop_high_risk_and_release_ready_are_disjoint(
        summaries in proptest::collection::vec(summary_strategy(), 0..24)
    ) {
        let risky = find_high_risk(&summaries);
        let ready = find_release_ready(&summaries);

        for r in &risky {
            prop_assert!(ready.iter().all(|x| x.project_id != r.project_id));
        }
    }

    #[test]
    fn prop_insight_content_ignores_input_order(
        summaries in proptest::collection::vec(summary_strategy(), 0..16)
    ) {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut reversed = summaries.clone();
        reversed.reverse();

        let forward = calculate_insights(&summaries, now);
        let backward = calculate_insights(&reversed, now);

        prop_assert_eq!(forward.aggregation, backward.aggregation);
        prop_assert_eq!(forward.drift.len(), backward.drift.len());
        prop_assert_eq!(forward.quick_wins.len(), backward.quick_wins.len());
        prop_assert_eq!(forward.high_risk.len(), backward.high_risk.len());
        prop_assert_eq!(forward.release_ready.len(), backward.release_ready.len());
    }

    #[test]
    fn prop_aggregation_totals_balance(
        summaries in proptest::collection::vec(summary_strategy(), 0..16)
    ) {
        let aggregation = atlas_insights::aggregate(&summaries);
        let by_status: usize = ProjectStatus::ALL.iter().map(|s| aggregation.by_status.get(*s)).sum();

        prop_assert_eq!(by_status, summaries.len());
        prop_assert_eq!(
            aggregation.completed_work_items + aggregation.incomplete_work_items,
            aggregation.total_work_items
        );
    }
}
