#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::{ActionType, HistoryRecord};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Repository trait for the append-only history log.
///
/// Records are immutable once appended except for the single mutable
/// column `expected_return_date` (renewals).
pub trait HistoryRepository: Send + Sync {
    /// Get the full history in stored order: newest appended first.
    ///
    /// The reconciliation engine depends on this exact ordering
    /// (`timestamp DESC`, insertion order breaking ties) to resolve a
    /// tool's owning checkout deterministically.
    async fn find_all(&self) -> StorageResult<Vec<HistoryRecord>>;

    /// Find a record by its id
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<HistoryRecord>>;

    /// Append a new record
    async fn append(&self, record: &HistoryRecord) -> StorageResult<()>;

    /// Update the expected return date of a record in place
    async fn update_deadline(&self, id: &str, deadline: DateTime<Utc>) -> StorageResult<()>;
}

/// Raw row shape for the history table; `tool_ids` is stored as a JSON
/// array in a TEXT column.
#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: String,
    timestamp: DateTime<Utc>,
    action_type: ActionType,
    dispatcher_id: String,
    dispatcher_name: String,
    dispatcher_matricula: String,
    responsible_name: String,
    responsible_matricula: String,
    tool_ids: String,
    tools_summary: String,
    expected_return_date: Option<DateTime<Utc>>,
}

impl TryFrom<HistoryRow> for HistoryRecord {
    type Error = StorageError;

    fn try_from(row: HistoryRow) -> StorageResult<HistoryRecord> {
        let tool_ids: Vec<String> = serde_json::from_str(&row.tool_ids).map_err(|e| {
            StorageError::CorruptRow(format!(
                "history {} has malformed tool_ids: {e}",
                row.id
            ))
        })?;

        Ok(HistoryRecord {
            id: row.id,
            timestamp: row.timestamp,
            action_type: row.action_type,
            dispatcher_id: row.dispatcher_id,
            dispatcher_name: row.dispatcher_name,
            dispatcher_matricula: row.dispatcher_matricula,
            responsible_name: row.responsible_name,
            responsible_matricula: row.responsible_matricula,
            tool_ids,
            tools_summary: row.tools_summary,
            expected_return_date: row.expected_return_date,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, timestamp, action_type,
           dispatcher_id, dispatcher_name, dispatcher_matricula,
           responsible_name, responsible_matricula,
           tool_ids, tools_summary, expected_return_date
    FROM history
"#;

/// SQLite implementation of HistoryRepository
#[derive(Clone)]
pub struct SqliteHistoryRepository {
    pool: SqlitePool,
}

impl SqliteHistoryRepository {
    /// Create a new SQLite history repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HistoryRepository for SqliteHistoryRepository {
    async fn find_all(&self) -> StorageResult<Vec<HistoryRecord>> {
        // rowid DESC makes same-timestamp batches resolve newest-insert
        // first, keeping the ordering deterministic.
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY timestamp DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(HistoryRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<HistoryRecord>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(HistoryRecord::try_from).transpose()
    }

    async fn append(&self, record: &HistoryRecord) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;
        crate::transaction::append_history(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_deadline(&self, id: &str, deadline: DateTime<Utc>) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;
        crate::transaction::update_history_deadline(&mut tx, id, deadline).await?;
        tx.commit().await?;
        Ok(())
    }
}
