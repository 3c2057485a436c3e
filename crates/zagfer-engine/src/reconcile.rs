//! Owning-checkout resolution and active-checkout grouping.
//!
//! Everything here is a pure function over catalog and history snapshots.
//! History slices are always scanned in their stored order, newest
//! appended first; that order, not the timestamps, is what resolves which
//! checkout currently owns a tool.

use serde::Serialize;
use zagfer_storage::models::{HistoryRecord, Tool, ToolStatus};

/// A checkout with tools still out, derived on every read and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveCheckout {
    /// The originating checkout record, unmodified
    pub record: HistoryRecord,
    /// Tools from that checkout still marked unavailable
    pub pending_tools: Vec<Tool>,
}

impl ActiveCheckout {
    pub fn checkout_id(&self) -> &str {
        &self.record.id
    }
}

/// Resolve the checkout record that currently owns `tool_id`.
///
/// Returns the first `CHECKOUT` record in stored order whose `tool_ids`
/// contain the id. With history newest-first, a tool that was checked
/// out, returned, and checked out again resolves to the latest checkout.
/// Returns `None` when no checkout references the tool.
pub fn find_owning_checkout<'a>(
    tool_id: &str,
    history: &'a [HistoryRecord],
) -> Option<&'a HistoryRecord> {
    history
        .iter()
        .find(|record| record.is_checkout() && record.tool_ids.iter().any(|id| id == tool_id))
}

/// Group every unavailable tool under its owning checkout.
///
/// Tools whose owning checkout cannot be resolved are skipped; that is a
/// data-integrity gap, not an error. Groups come back ordered by checkout
/// timestamp, newest first.
pub fn compute_active_checkouts(tools: &[Tool], history: &[HistoryRecord]) -> Vec<ActiveCheckout> {
    let mut groups: Vec<ActiveCheckout> = Vec::new();

    for tool in tools.iter().filter(|t| t.status == ToolStatus::Unavailable) {
        let Some(record) = find_owning_checkout(&tool.id, history) else {
            continue;
        };
        match groups.iter_mut().find(|g| g.record.id == record.id) {
            Some(group) => {
                if !group.pending_tools.iter().any(|t| t.id == tool.id) {
                    group.pending_tools.push(tool.clone());
                }
            }
            None => groups.push(ActiveCheckout {
                record: record.clone(),
                pending_tools: vec![tool.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| b.record.timestamp.cmp(&a.record.timestamp));
    groups
}
