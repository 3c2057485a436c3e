//! Domain constants for the ZAGFER tool-room tracker.
//!
//! Centralizes the loan and alert windows used by the reconciliation
//! engine and the transaction processor, together with the display labels
//! shared between dashboards and exports.
//!
//! # Usage
//!
//! ```
//! use zagfer_core::constants::*;
//!
//! assert_eq!(DEFAULT_LOAN_HOURS, 24);
//! assert_eq!(EXPIRING_HORIZON_HOURS, 48);
//! ```

/// Default loan window in hours, applied when a checkout record carries no
/// explicit expected return date.
pub const DEFAULT_LOAN_HOURS: i64 = 24;

/// Horizon for "expiring soon" alerts, in hours.
pub const EXPIRING_HORIZON_HOURS: i64 = 48;

/// Trailing window for the most-borrowed-tools ranking, in days.
pub const TOP_TOOLS_WINDOW_DAYS: i64 = 30;

/// Number of entries in the most-borrowed-tools ranking.
pub const TOP_TOOLS_LIMIT: usize = 5;

/// Number of trailing calendar months covered by the monthly loan chart,
/// current month included.
pub const MONTHLY_BUCKET_COUNT: u32 = 6;

/// Placeholder label for tools referenced by history but since deleted
/// from the catalog. History never cascades on tool deletion.
pub const REMOVED_TOOL_LABEL: &str = "Ferramenta Removida";

/// Abbreviated Portuguese month names, indexed by `month - 1`.
pub const MONTH_ABBREV_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];
