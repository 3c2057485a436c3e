//! Reconciliation engine for the ZAGFER tool room tracker.
//!
//! Derives every "what is out right now" view from two snapshots: the
//! current tool catalog and the append-only history log. Nothing here is
//! persisted or async; the engine is pure functions recomputed on every
//! read.
//!
//! - [`find_owning_checkout`] / [`compute_active_checkouts`] - which
//!   checkout currently owns each unavailable tool
//! - [`compute_overdue_alerts`] / [`compute_expiring_soon`] - deadline
//!   alerts, mutually disjoint for any given instant
//! - [`compute_top_tools`] / [`compute_monthly_loan_counts`] - dashboard
//!   statistics
//!
//! All functions are total: empty inputs produce empty outputs, and
//! unresolvable data is skipped rather than reported as an error.

pub mod alerts;
pub mod reconcile;
pub mod stats;

pub use alerts::{ExpiringAlert, OverdueAlert, compute_expiring_soon, compute_overdue_alerts};
pub use reconcile::{ActiveCheckout, compute_active_checkouts, find_owning_checkout};
pub use stats::{MonthlyLoanCount, TopTool, compute_monthly_loan_counts, compute_top_tools};
