//! Usage statistics over the history log.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use zagfer_core::constants::{MONTH_ABBREV_PT, REMOVED_TOOL_LABEL};
use zagfer_storage::models::{HistoryRecord, Tool};

/// One row of the most-borrowed ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopTool {
    pub tool_id: String,
    /// Current catalog name, or the removed-tool placeholder
    pub name: String,
    pub count: usize,
}

/// One calendar-month bucket of checkout activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyLoanCount {
    /// Abbreviated Portuguese month name
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// Rank tool ids by checkout occurrences in the trailing window.
///
/// Every appearance of a tool id in a `CHECKOUT` record counts once.
/// Names come from the current catalog; ids no longer in it keep their
/// count under the removed-tool placeholder.
pub fn compute_top_tools(
    tools: &[Tool],
    history: &[HistoryRecord],
    now: DateTime<Utc>,
    window_days: i64,
    limit: usize,
) -> Vec<TopTool> {
    let cutoff = now - Duration::days(window_days);
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in history
        .iter()
        .filter(|r| r.is_checkout() && r.timestamp >= cutoff)
    {
        for tool_id in &record.tool_ids {
            match counts.iter_mut().find(|(id, _)| id == tool_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((tool_id.clone(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);

    counts
        .into_iter()
        .map(|(tool_id, count)| {
            let name = tools
                .iter()
                .find(|t| t.id == tool_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| REMOVED_TOOL_LABEL.to_string());
            TopTool { tool_id, name, count }
        })
        .collect()
}

/// Checkout counts per calendar month for the trailing `months` buckets,
/// current month included, oldest first. Months without activity still
/// get a zero bucket.
pub fn compute_monthly_loan_counts(
    history: &[HistoryRecord],
    now: DateTime<Utc>,
    months: u32,
) -> Vec<MonthlyLoanCount> {
    let mut buckets = Vec::with_capacity(months as usize);

    for offset in (0..months as i32).rev() {
        // Month arithmetic on a (year, month-1) index avoids day overflow.
        let index = now.year() * 12 + now.month0() as i32 - offset;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;

        let count = history
            .iter()
            .filter(|r| {
                r.is_checkout() && r.timestamp.year() == year && r.timestamp.month() == month
            })
            .count();

        buckets.push(MonthlyLoanCount {
            label: MONTH_ABBREV_PT[(month - 1) as usize].to_string(),
            year,
            month,
            count,
        });
    }

    buckets
}
