//! Overdue and expiring-soon deadline alerts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use zagfer_storage::models::{HistoryRecord, Tool, ToolStatus};

use crate::reconcile::find_owning_checkout;

/// A tool held past its deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverdueAlert {
    pub tool: Tool,
    pub record: HistoryRecord,
    /// Whole hours past the deadline, never below 1
    pub hours_late: i64,
    pub deadline: DateTime<Utc>,
}

/// A tool whose deadline falls inside the near-future horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiringAlert {
    pub tool: Tool,
    pub record: HistoryRecord,
    /// Whole hours until the deadline; 0 means less than an hour left
    pub hours_left: i64,
    pub deadline: DateTime<Utc>,
}

fn unreturned_with_deadline<'a>(
    tools: &'a [Tool],
    history: &'a [HistoryRecord],
) -> impl Iterator<Item = (&'a Tool, &'a HistoryRecord, DateTime<Utc>)> {
    tools
        .iter()
        .filter(|t| t.status == ToolStatus::Unavailable)
        .filter_map(|tool| {
            find_owning_checkout(&tool.id, history)
                .map(|record| (tool, record, record.effective_deadline()))
        })
}

/// Alerts for every unavailable tool whose deadline has passed, sorted
/// most overdue first. A deadline passed by less than an hour still
/// reports `hours_late = 1` so a fresh overdue never reads as zero.
pub fn compute_overdue_alerts(
    tools: &[Tool],
    history: &[HistoryRecord],
    now: DateTime<Utc>,
) -> Vec<OverdueAlert> {
    let mut alerts: Vec<OverdueAlert> = unreturned_with_deadline(tools, history)
        .filter(|(_, _, deadline)| now > *deadline)
        .map(|(tool, record, deadline)| OverdueAlert {
            tool: tool.clone(),
            record: record.clone(),
            hours_late: (now - deadline).num_hours().max(1),
            deadline,
        })
        .collect();

    alerts.sort_by(|a, b| b.hours_late.cmp(&a.hours_late));
    alerts
}

/// Alerts for every unavailable tool whose deadline falls in
/// `(now, now + horizon_hours]`, sorted most urgent first. Disjoint from
/// the overdue set for the same `now`.
pub fn compute_expiring_soon(
    tools: &[Tool],
    history: &[HistoryRecord],
    now: DateTime<Utc>,
    horizon_hours: i64,
) -> Vec<ExpiringAlert> {
    let horizon = now + Duration::hours(horizon_hours);
    let mut alerts: Vec<ExpiringAlert> = unreturned_with_deadline(tools, history)
        .filter(|(_, _, deadline)| *deadline > now && *deadline <= horizon)
        .map(|(tool, record, deadline)| ExpiringAlert {
            tool: tool.clone(),
            record: record.clone(),
            hours_left: (deadline - now).num_hours(),
            deadline,
        })
        .collect();

    alerts.sort_by(|a, b| a.hours_left.cmp(&b.hours_left));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{checkout_record, unavailable_tool};
    use zagfer_core::constants::EXPIRING_HORIZON_HOURS;

    #[test]
    fn one_hour_late_after_explicit_deadline() {
        let t0 = Utc::now() - Duration::hours(30);
        let tools = vec![unavailable_tool("t1", "Serra")];
        let history = vec![checkout_record("h1", t0, &["t1"], Some(t0 + Duration::hours(24)))];

        let alerts = compute_overdue_alerts(&tools, &history, t0 + Duration::hours(25));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hours_late, 1);
        assert_eq!(alerts[0].deadline, t0 + Duration::hours(24));
    }

    #[rstest::rstest]
    #[case(10, 1)] // just became overdue, rounds up to 1
    #[case(59, 1)]
    #[case(90, 1)]
    #[case(150, 2)]
    fn hours_late_floors_with_a_minimum_of_one(#[case] minutes_late: i64, #[case] expected: i64) {
        let t0 = Utc::now() - Duration::hours(48);
        let tools = vec![unavailable_tool("t1", "Serra")];
        let history = vec![checkout_record("h1", t0, &["t1"], Some(t0 + Duration::hours(24)))];

        let now = t0 + Duration::hours(24) + Duration::minutes(minutes_late);
        let alerts = compute_overdue_alerts(&tools, &history, now);
        assert_eq!(alerts[0].hours_late, expected);
    }

    #[test]
    fn missing_deadline_defaults_to_a_day() {
        let t0 = Utc::now() - Duration::hours(48);
        let tools = vec![unavailable_tool("t1", "Serra")];
        let history = vec![checkout_record("h1", t0, &["t1"], None)];

        let alerts = compute_overdue_alerts(&tools, &history, t0 + Duration::hours(27));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hours_late, 3);
    }

    #[test]
    fn most_overdue_comes_first() {
        let t0 = Utc::now() - Duration::hours(100);
        let tools = vec![unavailable_tool("t1", "Serra"), unavailable_tool("t2", "Alicate")];
        let history = vec![
            checkout_record("h2", t0 + Duration::hours(40), &["t2"], None),
            checkout_record("h1", t0, &["t1"], None),
        ];

        let alerts = compute_overdue_alerts(&tools, &history, t0 + Duration::hours(90));
        assert_eq!(alerts[0].tool.id, "t1");
        assert_eq!(alerts[1].tool.id, "t2");
    }

    #[test]
    fn expiring_one_hour_left() {
        let t0 = Utc::now() - Duration::hours(29);
        let tools = vec![unavailable_tool("t2", "Alicate")];
        let history = vec![checkout_record("h1", t0, &["t2"], Some(t0 + Duration::hours(30)))];

        let alerts =
            compute_expiring_soon(&tools, &history, t0 + Duration::hours(29), EXPIRING_HORIZON_HOURS);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hours_left, 1);
    }

    #[test]
    fn deadline_exactly_now_is_not_expiring() {
        let t0 = Utc::now();
        let tools = vec![unavailable_tool("t1", "Serra")];
        let history = vec![checkout_record("h1", t0, &["t1"], Some(t0 + Duration::hours(10)))];

        let alerts = compute_expiring_soon(
            &tools,
            &history,
            t0 + Duration::hours(10),
            EXPIRING_HORIZON_HOURS,
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn deadline_at_horizon_boundary_is_included() {
        let now = Utc::now();
        let tools = vec![unavailable_tool("t1", "Serra")];
        let history = vec![checkout_record("h1", now, &["t1"], Some(now + Duration::hours(48)))];

        let alerts = compute_expiring_soon(&tools, &history, now, EXPIRING_HORIZON_HOURS);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hours_left, 48);
    }

    #[test]
    fn overdue_and_expiring_are_disjoint() {
        let t0 = Utc::now() - Duration::hours(50);
        let tools = vec![
            unavailable_tool("t1", "Serra"),
            unavailable_tool("t2", "Alicate"),
            unavailable_tool("t3", "Martelo"),
        ];
        let now = t0 + Duration::hours(40);
        let history = vec![
            checkout_record("h3", t0, &["t3"], Some(now + Duration::hours(100))),
            checkout_record("h2", t0, &["t2"], Some(now + Duration::hours(12))),
            checkout_record("h1", t0, &["t1"], Some(now - Duration::hours(5))),
        ];

        let overdue = compute_overdue_alerts(&tools, &history, now);
        let expiring = compute_expiring_soon(&tools, &history, now, EXPIRING_HORIZON_HOURS);

        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].tool.id, "t1");
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].tool.id, "t2");
        assert!(!expiring.iter().any(|e| overdue.iter().any(|o| o.tool.id == e.tool.id)));
    }

    #[test]
    fn empty_inputs_yield_empty_alerts() {
        let now = Utc::now();
        assert!(compute_overdue_alerts(&[], &[], now).is_empty());
        assert!(compute_expiring_soon(&[], &[], now, EXPIRING_HORIZON_HOURS).is_empty());
    }
}
