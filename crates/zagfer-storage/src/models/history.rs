use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use zagfer_core::constants::DEFAULT_LOAN_HOURS;

/// Kind of history transaction.
///
/// The TEXT codes `CHECKOUT`/`RETURN` are part of the stable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ActionType {
    Checkout,
    Return,
}

impl ActionType {
    /// Stable TEXT code for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkout => "CHECKOUT",
            Self::Return => "RETURN",
        }
    }

    /// Human-readable name in Portuguese.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Checkout => "Retirada",
            Self::Return => "Devolução",
        }
    }
}

/// An append-only history log entry.
///
/// Records are immutable once appended, with one exception: renewal
/// updates `expected_return_date` in place by id.
///
/// The dispatcher is the logged-in operator who registered the
/// transaction; the responsible party is whoever physically took (or
/// returned) the tools, entered at the counter. `RETURN` records carry
/// the responsible identity copied from their originating checkout, never
/// re-entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique record id (UUID v4)
    pub id: String,

    /// When the transaction occurred
    pub timestamp: DateTime<Utc>,

    /// Checkout or return
    pub action_type: ActionType,

    /// Operator who registered the transaction
    pub dispatcher_id: String,
    pub dispatcher_name: String,
    pub dispatcher_matricula: String,

    /// Party responsible for the tools
    pub responsible_name: String,
    pub responsible_matricula: String,

    /// Ids of the tools moved by this transaction, never empty.
    /// May reference tools since deleted from the catalog.
    pub tool_ids: Vec<String>,

    /// Comma-joined tool names captured at transaction time
    pub tools_summary: String,

    /// Agreed return deadline; checkouts should set it, returns never do.
    /// Mutable in place via renewal.
    pub expected_return_date: Option<DateTime<Utc>>,
}

impl HistoryRecord {
    /// Create a new history record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        action_type: ActionType,
        dispatcher_id: impl Into<String>,
        dispatcher_name: impl Into<String>,
        dispatcher_matricula: impl Into<String>,
        responsible_name: impl Into<String>,
        responsible_matricula: impl Into<String>,
        tool_ids: Vec<String>,
        tools_summary: impl Into<String>,
        expected_return_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            action_type,
            dispatcher_id: dispatcher_id.into(),
            dispatcher_name: dispatcher_name.into(),
            dispatcher_matricula: dispatcher_matricula.into(),
            responsible_name: responsible_name.into(),
            responsible_matricula: responsible_matricula.into(),
            tool_ids,
            tools_summary: tools_summary.into(),
            expected_return_date,
        }
    }

    /// Check if this record is a checkout.
    pub fn is_checkout(&self) -> bool {
        self.action_type == ActionType::Checkout
    }

    /// The deadline this record is held to: the explicit expected return
    /// date, or `timestamp + 24h` when none was set.
    pub fn effective_deadline(&self) -> DateTime<Utc> {
        self.expected_return_date
            .unwrap_or(self.timestamp + Duration::hours(DEFAULT_LOAN_HOURS))
    }
}
