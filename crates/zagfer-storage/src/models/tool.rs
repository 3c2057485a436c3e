use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Availability status of a tool.
///
/// The TEXT codes `AVAILABLE`/`UNAVAILABLE` are part of the stable
/// contract: they are stored verbatim in the `tools.status` column and
/// serialized verbatim over the API.
///
/// Only the transaction processor may flip this status; catalog edits
/// preserve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ToolStatus {
    /// In the tool room, free to be checked out
    Available,
    /// Out on an open checkout
    Unavailable,
}

impl ToolStatus {
    /// Stable TEXT code for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }

    /// Human-readable name in Portuguese.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Available => "Disponível",
            Self::Unavailable => "Em Uso",
        }
    }
}

/// A tool in the tool-room catalog.
///
/// Identity is the caller-assigned `id` string. Status is mutated only by
/// the transaction processor; the remaining fields are edited through the
/// catalog CRUD. Deletion does not cascade into history: stale ids in old
/// records are tolerated and rendered with a placeholder label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tool {
    /// Caller-assigned unique identifier
    pub id: String,

    /// Display name (e.g. "Chave de Fenda")
    pub name: String,

    /// Catalog category (e.g. "Manual", "Elétrica", "Medição")
    pub category: String,

    /// Optional size designation (e.g. `1/4"`, `150mm`)
    pub size: Option<String>,

    /// Optional asset/patrimony code
    pub bmp: Option<String>,

    /// Sector the tool belongs to
    pub sector: String,

    /// Current availability status
    pub status: ToolStatus,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Tool {
    /// Create a new available tool with the given catalog fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            size: None,
            bmp: None,
            sector: sector.into(),
            status: ToolStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the tool is free to be checked out.
    pub fn is_available(&self) -> bool {
        self.status == ToolStatus::Available
    }
}
